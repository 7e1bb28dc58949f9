use std::sync::Arc;

use voicedesk::actions::ToolRegistry;
use voicedesk::config::{self, AppConfig};
use voicedesk::desktop::{Desktop, NativeDesktop};
use voicedesk::errors::{VdResult, VoiceDeskError};
use voicedesk::planner::PlannerBridge;
use voicedesk::session::console::ConsoleDriver;
use voicedesk::session::{CredentialPool, SessionSupervisor};
use voicedesk::vision::{ActiveSessionSink, ScreenSource, VisionStreamer};

#[tokio::main]
async fn main() -> VdResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "no usable config.toml, running with defaults");
            AppConfig::default()
        }
    };

    let planner_key = std::env::var(&config.planner.api_key_env).map_err(|_| {
        VoiceDeskError::Config(format!(
            "planner API key env var '{}' is not set",
            config.planner.api_key_env
        ))
    })?;

    let desktop: Arc<dyn Desktop> = Arc::new(NativeDesktop::new());
    let sink = Arc::new(ActiveSessionSink::new());
    let streamer = Arc::new(VisionStreamer::new(
        Arc::new(ScreenSource::new()),
        sink.clone(),
        config.vision.clone(),
    ));
    let registry = Arc::new(ToolRegistry::builtin(
        desktop.clone(),
        streamer.clone(),
        &config,
    ));
    let bridge = Arc::new(PlannerBridge::new(
        config.planner.clone(),
        planner_key.clone(),
        registry,
    ));

    // The console driver authenticates through the planner key, so a missing
    // session pool falls back to a single-entry one instead of refusing to
    // start.
    let pool = match CredentialPool::from_env(&config.session.credential_env) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "no session credentials, using the planner key");
            CredentialPool::from_keys(vec![planner_key])?
        }
    };

    let driver = ConsoleDriver::new(bridge, desktop, sink);
    SessionSupervisor::new(driver, pool, &config.session)
        .run()
        .await
}
