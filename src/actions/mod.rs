pub mod close;
pub mod folder_file;
pub mod media;
pub mod open;
pub mod registry;
pub mod screen_share;
pub mod system;
pub mod window_state;

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::VoiceDeskError;

pub use registry::ToolRegistry;

/// A concrete request for one executor: the free-text target plus optional
/// modifiers. Produced by the conversational tool-call layer or parsed out of
/// a planner reply.
#[derive(Debug, Clone, Default)]
pub struct ActionInvocation {
    pub argument: String,
    /// Explicit user override: launch even if a matching window exists.
    pub force_new: bool,
}

impl ActionInvocation {
    pub fn of(argument: impl Into<String>) -> Self {
        Self {
            argument: argument.into(),
            force_new: false,
        }
    }
}

/// Executor failure taxonomy. Everything here is converted to a spoken-reply
/// string at the registry boundary; the `Display` text is what the assistant
/// reads aloud, so it must stand on its own.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Could not find anything matching '{0}'.")]
    NotFound(String),

    #[error("'{existing}' is already open. Do you want to open a new instance?")]
    DuplicateDetected { existing: String },

    #[error("Tried to close '{target}' but could not confirm it: {detail}")]
    VerificationFailed { target: String, detail: String },

    #[error("I did not understand that: {0}")]
    InvalidInput(String),

    #[error("That did not work: {0}")]
    Platform(#[from] VoiceDeskError),
}

/// One voice-invokable capability: an async handler taking a directive and
/// returning a human-readable status string. Every executor implements this;
/// the registry is the only way callers reach one.
#[async_trait]
pub trait ToolAction: Send + Sync {
    fn name(&self) -> &'static str;

    /// Shown to the conversational model when the tool is registered.
    fn description(&self) -> &'static str;

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError>;
}
