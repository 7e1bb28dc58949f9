use std::path::Path;
use std::process::Command;

use super::{Desktop, SystemCommand, WindowRef};
use crate::errors::VdResult;
#[cfg(not(windows))]
use crate::errors::VoiceDeskError;

/// The real OS backend. Window management and input simulation are
/// Windows-only; other platforms get live-but-empty enumeration and
/// descriptive Unsupported errors, so the engine still loads for
/// development on them.
#[derive(Default)]
pub struct NativeDesktop;

impl NativeDesktop {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
fn unsupported(op: &str) -> VoiceDeskError {
    VoiceDeskError::Desktop(format!("{op} is not supported on this platform"))
}

#[cfg(windows)]
fn keyboard() -> VdResult<enigo::Enigo> {
    use crate::errors::VoiceDeskError;
    enigo::Enigo::new(&enigo::Settings::default())
        .map_err(|e| VoiceDeskError::Desktop(format!("input backend unavailable: {e}")))
}

#[cfg(windows)]
fn key_error(e: impl std::fmt::Display) -> crate::errors::VoiceDeskError {
    crate::errors::VoiceDeskError::Desktop(format!("key simulation failed: {e}"))
}

impl Desktop for NativeDesktop {
    fn list_windows(&self) -> Vec<WindowRef> {
        #[cfg(windows)]
        {
            super::win32::enumerate_windows()
        }
        #[cfg(not(windows))]
        {
            Vec::new()
        }
    }

    fn foreground_window(&self) -> Option<WindowRef> {
        #[cfg(windows)]
        {
            super::win32::foreground_window()
        }
        #[cfg(not(windows))]
        {
            None
        }
    }

    #[allow(unused_variables)]
    fn activate(&self, window: &WindowRef) -> VdResult<()> {
        #[cfg(windows)]
        {
            let Some(raw) = window.handle else {
                return Err(crate::errors::VoiceDeskError::Desktop(format!(
                    "window '{}' has no handle to activate",
                    window.title
                )));
            };
            if super::win32::is_minimized(raw) {
                super::win32::restore(raw);
            }
            if !super::win32::set_foreground(raw) {
                tracing::warn!(title = %window.title, "SetForegroundWindow declined");
            }
            Ok(())
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("activate"))
        }
    }

    #[allow(unused_variables)]
    fn minimize(&self, window: &WindowRef) -> VdResult<()> {
        #[cfg(windows)]
        {
            match window.handle {
                Some(raw) => {
                    super::win32::minimize(raw);
                    Ok(())
                }
                None => Err(crate::errors::VoiceDeskError::Desktop(format!(
                    "window '{}' has no handle to minimize",
                    window.title
                ))),
            }
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("minimize"))
        }
    }

    #[allow(unused_variables)]
    fn maximize(&self, window: &WindowRef) -> VdResult<()> {
        #[cfg(windows)]
        {
            match window.handle {
                Some(raw) => {
                    if super::win32::is_minimized(raw) {
                        super::win32::restore(raw);
                    }
                    super::win32::maximize(raw);
                    Ok(())
                }
                None => Err(crate::errors::VoiceDeskError::Desktop(format!(
                    "window '{}' has no handle to maximize",
                    window.title
                ))),
            }
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("maximize"))
        }
    }

    #[allow(unused_variables)]
    fn close_gesture(&self, window: &WindowRef) -> VdResult<()> {
        #[cfg(windows)]
        {
            use enigo::{Direction, Key, Keyboard};
            let mut kb = keyboard()?;
            kb.key(Key::Alt, Direction::Press).map_err(key_error)?;
            kb.key(Key::F4, Direction::Click).map_err(key_error)?;
            kb.key(Key::Alt, Direction::Release).map_err(key_error)?;
            Ok(())
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("close gesture"))
        }
    }

    #[allow(unused_variables)]
    fn destroy_window(&self, window: &WindowRef) -> VdResult<()> {
        #[cfg(windows)]
        {
            match window.handle {
                Some(raw) => super::win32::post_close(raw),
                None => Err(crate::errors::VoiceDeskError::Desktop(format!(
                    "window '{}' has no handle to close",
                    window.title
                ))),
            }
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("direct close"))
        }
    }

    fn open_launcher(&self) -> VdResult<()> {
        #[cfg(windows)]
        {
            use enigo::{Direction, Key, Keyboard};
            let mut kb = keyboard()?;
            kb.key(Key::Meta, Direction::Click).map_err(key_error)?;
            Ok(())
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("launcher"))
        }
    }

    #[allow(unused_variables)]
    fn type_text(&self, text: &str) -> VdResult<()> {
        #[cfg(windows)]
        {
            use enigo::Keyboard;
            let mut kb = keyboard()?;
            kb.text(text).map_err(key_error)?;
            Ok(())
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("text input"))
        }
    }

    fn confirm_input(&self) -> VdResult<()> {
        #[cfg(windows)]
        {
            use enigo::{Direction, Key, Keyboard};
            let mut kb = keyboard()?;
            kb.key(Key::Return, Direction::Click).map_err(key_error)?;
            Ok(())
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("confirm input"))
        }
    }

    #[allow(unused_variables)]
    fn kill_process(&self, image: &str) -> VdResult<()> {
        #[cfg(windows)]
        {
            let status = Command::new("taskkill").args(["/IM", image, "/F"]).status()?;
            if status.success() {
                Ok(())
            } else {
                Err(crate::errors::VoiceDeskError::Desktop(format!(
                    "taskkill for '{image}' exited with {status}"
                )))
            }
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("process kill"))
        }
    }

    fn open_path(&self, path: &Path) -> VdResult<()> {
        open_with_shell(&path.display().to_string())
    }

    fn open_url(&self, url: &str) -> VdResult<()> {
        open_with_shell(url)
    }

    #[allow(unused_variables)]
    fn system_command(&self, command: SystemCommand) -> VdResult<()> {
        #[cfg(windows)]
        {
            use enigo::{Direction, Key, Keyboard};
            let key = match command {
                // Mute and unmute are the same toggle key on this platform.
                SystemCommand::Mute | SystemCommand::Unmute => Key::VolumeMute,
                SystemCommand::VolumeUp => Key::VolumeUp,
                SystemCommand::VolumeDown => Key::VolumeDown,
            };
            let mut kb = keyboard()?;
            kb.key(key, Direction::Click).map_err(key_error)?;
            Ok(())
        }
        #[cfg(not(windows))]
        {
            Err(unsupported("system command"))
        }
    }
}

/// Hand the target to the OS default handler (`start` / `xdg-open`).
fn open_with_shell(target: &str) -> VdResult<()> {
    #[cfg(windows)]
    let status = Command::new("cmd").args(["/C", "start", "", target]).status()?;
    #[cfg(not(windows))]
    let status = Command::new("xdg-open").arg(target).status()?;

    if status.success() {
        Ok(())
    } else {
        Err(crate::errors::VoiceDeskError::Desktop(format!(
            "shell open for '{target}' exited with {status}"
        )))
    }
}
