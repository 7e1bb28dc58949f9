pub mod directory;
pub mod native;
#[cfg(test)]
pub mod testing;
pub mod types;
#[cfg(windows)]
mod win32;

use std::path::Path;

use crate::errors::VdResult;

pub use directory::WindowDirectory;
pub use native::NativeDesktop;
pub use types::WindowRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Mute,
    Unmute,
    VolumeUp,
    VolumeDown,
}

impl SystemCommand {
    pub fn parse(command: &str) -> Option<Self> {
        match command.trim().to_lowercase().as_str() {
            "mute" => Some(Self::Mute),
            "unmute" => Some(Self::Unmute),
            "volume up" => Some(Self::VolumeUp),
            "volume down" => Some(Self::VolumeDown),
            _ => None,
        }
    }
}

/// OS capability surface consumed by the executors. Platform backends are
/// substitutable; tests drive the executors through in-memory fakes.
///
/// None of these calls are transactional: the window set can change between
/// any two of them, which is why executors re-enumerate before verifying.
pub trait Desktop: Send + Sync {
    /// Live enumeration of top-level windows. Never cached.
    fn list_windows(&self) -> Vec<WindowRef>;

    fn foreground_window(&self) -> Option<WindowRef>;

    /// Restore if minimized, then bring to foreground.
    fn activate(&self, window: &WindowRef) -> VdResult<()>;

    fn minimize(&self, window: &WindowRef) -> VdResult<()>;

    fn maximize(&self, window: &WindowRef) -> VdResult<()>;

    /// The platform's standard close gesture (Alt+F4 against the focused
    /// window). The target must have been activated first.
    fn close_gesture(&self, window: &WindowRef) -> VdResult<()>;

    /// Direct close request to the window itself; escalation path when the
    /// polite gesture did not take.
    fn destroy_window(&self, window: &WindowRef) -> VdResult<()>;

    /// Open the OS application-search affordance (Start menu).
    fn open_launcher(&self) -> VdResult<()>;

    /// Type text into whatever currently has focus.
    fn type_text(&self, text: &str) -> VdResult<()>;

    /// Confirm the current input (Enter).
    fn confirm_input(&self) -> VdResult<()>;

    fn kill_process(&self, image: &str) -> VdResult<()>;

    fn open_path(&self, path: &Path) -> VdResult<()>;

    fn open_url(&self, url: &str) -> VdResult<()>;

    fn system_command(&self, command: SystemCommand) -> VdResult<()>;
}
