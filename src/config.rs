use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{VdResult, VoiceDeskError};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub vision: VisionConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Chat-completions endpoint (OpenAI-compatible).
    pub api_base: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Env var holding the planner API key.
    #[serde(default = "default_planner_key_env")]
    pub api_key_env: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1/chat/completions".into(),
            model: "llama-3.3-70b-versatile".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key_env: default_planner_key_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base env var for the credential pool; numbered suffixes (`_1`, `_2`, …)
    /// extend the pool.
    #[serde(default = "default_credential_env")]
    pub credential_env: String,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            credential_env: default_credential_env(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default = "default_capture_interval_ms")]
    pub capture_interval_ms: u64,
    /// Frames are downscaled so neither side exceeds this.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            capture_interval_ms: default_capture_interval_ms(),
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Extra index roots on top of the user profile folders
    /// (Desktop/Documents/Downloads).
    #[serde(default = "default_extra_roots")]
    pub extra_roots: Vec<String>,
    /// Where `create folder` puts new folders.
    #[serde(default = "default_create_root")]
    pub create_root: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extra_roots: default_extra_roots(),
            create_root: default_create_root(),
        }
    }
}

fn default_temperature() -> f64 {
    0.1
}

fn default_max_tokens() -> u32 {
    200
}

fn default_planner_key_env() -> String {
    "VOICEDESK_PLANNER_API_KEY".into()
}

fn default_credential_env() -> String {
    "VOICEDESK_API_KEY".into()
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_capture_interval_ms() -> u64 {
    1000
}

fn default_max_dimension() -> u32 {
    1280
}

fn default_jpeg_quality() -> u8 {
    85
}

fn default_extra_roots() -> Vec<String> {
    vec!["D:/".into(), "C:/Users/Public".into()]
}

fn default_create_root() -> String {
    "D:/".into()
}

fn resolve_config_path() -> VdResult<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("config.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join("config.toml");
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(candidate);
    }

    Err(VoiceDeskError::Config(
        "config.toml not found next to executable or in working directory".into(),
    ))
}

pub fn load_config() -> VdResult<AppConfig> {
    let path = resolve_config_path()?;
    let content = std::fs::read_to_string(&path)?;
    let config: AppConfig = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), model = %config.planner.model, "config loaded");
    Ok(config)
}
