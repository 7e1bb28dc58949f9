use std::time::Duration;

use async_trait::async_trait;

use super::CredentialPool;
use crate::config::SessionConfig;
use crate::errors::{VdResult, VoiceDeskError};

/// Failure signatures that mean "try again with another key": provider
/// quota and rate-limit wording, plus the websocket policy/internal close
/// codes realtime providers send when a key runs dry mid-session.
const RECOVERABLE_MARKERS: &[&str] = &[
    "429",
    "rate limit",
    "quota",
    "resource_exhausted",
    "1008",
    "1011",
    "connection closed",
    "connection reset",
];

/// A session that ended on its own terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The remote side or the user hung up normally.
    Disconnected,
}

/// A session that died. `was_active` marks whether the session did useful
/// work before failing; an active session proves its credential was good, so
/// the supervisor restarts its failure count instead of burning the pool.
#[derive(Debug, Clone)]
pub struct SessionError {
    pub message: String,
    pub was_active: bool,
}

impl SessionError {
    pub fn recoverable(&self) -> bool {
        let lowered = self.message.to_lowercase();
        RECOVERABLE_MARKERS.iter().any(|m| lowered.contains(m))
    }
}

/// One conversational session from connect to teardown. Implementations run
/// the whole session against the given credential and report how it ended.
#[async_trait]
pub trait SessionDriver: Send + Sync {
    async fn run(&self, credential: &str) -> Result<SessionEnd, SessionError>;
}

/// Keeps a session alive across recoverable failures by rotating through the
/// credential pool. Fatal failures propagate; a full ring of consecutive
/// recoverable failures means every key is dead and the loop gives up.
pub struct SessionSupervisor<D: SessionDriver> {
    driver: D,
    pool: CredentialPool,
    retry_delay: Duration,
}

impl<D: SessionDriver> SessionSupervisor<D> {
    pub fn new(driver: D, pool: CredentialPool, config: &SessionConfig) -> Self {
        Self {
            driver,
            pool,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    pub async fn run(mut self) -> VdResult<()> {
        let mut consecutive_failures = 0usize;

        loop {
            tracing::info!("starting session");
            let err = match self.driver.run(self.pool.current()).await {
                Ok(SessionEnd::Disconnected) => {
                    tracing::info!("session disconnected normally");
                    return Ok(());
                }
                Err(err) => err,
            };

            if err.was_active {
                consecutive_failures = 0;
            }

            if !err.recoverable() {
                tracing::error!(error = %err.message, "fatal session failure");
                return Err(VoiceDeskError::Session(err.message));
            }

            consecutive_failures += 1;
            tracing::warn!(
                error = %err.message,
                consecutive_failures,
                pool = self.pool.len(),
                "recoverable session failure"
            );
            if consecutive_failures >= self.pool.len() {
                return Err(VoiceDeskError::CredentialsExhausted(consecutive_failures));
            }

            self.pool.advance();
            tokio::time::sleep(self.retry_delay).await;
        }
    }
}
