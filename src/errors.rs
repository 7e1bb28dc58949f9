use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Planner error: {0}")]
    Planner(String),

    #[error("Planner rate limit exceeded")]
    RateLimited,

    #[error("Session error: {0}")]
    Session(String),

    #[error("Credential pool exhausted after {0} attempts")]
    CredentialsExhausted(usize),

    #[error("Desktop error: {0}")]
    Desktop(String),

    #[error("Vision error: {0}")]
    Vision(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type VdResult<T> = Result<T, VoiceDeskError>;
