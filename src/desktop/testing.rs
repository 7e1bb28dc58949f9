//! In-memory [`Desktop`] double used by executor unit tests. Scripts the
//! window set and records every OS interaction so tests can assert on the
//! exact call sequence without touching a real desktop.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{Desktop, SystemCommand, WindowRef};
use crate::errors::VdResult;

#[derive(Default)]
pub struct ScriptedDesktop {
    windows: Mutex<Vec<WindowRef>>,
    foreground: Mutex<Option<WindowRef>>,
    /// Window that appears once the launch sequence is confirmed.
    pending_launch: Mutex<Option<WindowRef>>,

    /// When set, the polite close gesture does nothing (app ignores Alt+F4).
    gesture_noop: AtomicBool,
    /// When set, even the direct close request does nothing.
    destroy_noop: AtomicBool,

    launcher_opens: AtomicUsize,
    activations: AtomicUsize,
    typed: Mutex<Vec<String>>,
    killed: Mutex<Vec<String>>,
    opened_paths: Mutex<Vec<PathBuf>>,
    opened_urls: Mutex<Vec<String>>,
    system_commands: Mutex<Vec<SystemCommand>>,
}

impl ScriptedDesktop {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_windows(windows: Vec<WindowRef>) -> Self {
        let desktop = Self::default();
        *desktop.windows.lock().unwrap() = windows;
        desktop
    }

    pub fn appear_after_launch(&self, window: WindowRef) {
        *self.pending_launch.lock().unwrap() = Some(window);
    }

    pub fn set_foreground_window(&self, window: WindowRef) {
        *self.foreground.lock().unwrap() = Some(window);
    }

    pub fn make_gesture_noop(&self) {
        self.gesture_noop.store(true, Ordering::SeqCst);
    }

    pub fn make_destroy_noop(&self) {
        self.destroy_noop.store(true, Ordering::SeqCst);
    }

    pub fn launcher_opens(&self) -> usize {
        self.launcher_opens.load(Ordering::SeqCst)
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn typed(&self) -> Vec<String> {
        self.typed.lock().unwrap().clone()
    }

    pub fn killed(&self) -> Vec<String> {
        self.killed.lock().unwrap().clone()
    }

    pub fn opened_paths(&self) -> Vec<PathBuf> {
        self.opened_paths.lock().unwrap().clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened_urls.lock().unwrap().clone()
    }

    pub fn system_commands(&self) -> Vec<SystemCommand> {
        self.system_commands.lock().unwrap().clone()
    }

    fn remove(&self, window: &WindowRef) {
        let mut windows = self.windows.lock().unwrap();
        windows.retain(|w| match (w.handle, window.handle) {
            (Some(a), Some(b)) => a != b,
            _ => w.title != window.title,
        });
    }
}

impl Desktop for ScriptedDesktop {
    fn list_windows(&self) -> Vec<WindowRef> {
        self.windows.lock().unwrap().clone()
    }

    fn foreground_window(&self) -> Option<WindowRef> {
        self.foreground.lock().unwrap().clone()
    }

    fn activate(&self, _window: &WindowRef) -> VdResult<()> {
        self.activations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn minimize(&self, window: &WindowRef) -> VdResult<()> {
        let mut windows = self.windows.lock().unwrap();
        if let Some(w) = windows.iter_mut().find(|w| w.title == window.title) {
            w.minimized = true;
        }
        Ok(())
    }

    fn maximize(&self, window: &WindowRef) -> VdResult<()> {
        let mut windows = self.windows.lock().unwrap();
        if let Some(w) = windows.iter_mut().find(|w| w.title == window.title) {
            w.minimized = false;
        }
        Ok(())
    }

    fn close_gesture(&self, window: &WindowRef) -> VdResult<()> {
        if !self.gesture_noop.load(Ordering::SeqCst) {
            self.remove(window);
        }
        Ok(())
    }

    fn destroy_window(&self, window: &WindowRef) -> VdResult<()> {
        if !self.destroy_noop.load(Ordering::SeqCst) {
            self.remove(window);
        }
        Ok(())
    }

    fn open_launcher(&self) -> VdResult<()> {
        self.launcher_opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn type_text(&self, text: &str) -> VdResult<()> {
        self.typed.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn confirm_input(&self) -> VdResult<()> {
        if let Some(window) = self.pending_launch.lock().unwrap().take() {
            self.windows.lock().unwrap().push(window);
        }
        Ok(())
    }

    fn kill_process(&self, image: &str) -> VdResult<()> {
        self.killed.lock().unwrap().push(image.to_string());
        Ok(())
    }

    fn open_path(&self, path: &Path) -> VdResult<()> {
        self.opened_paths.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn open_url(&self, url: &str) -> VdResult<()> {
        self.opened_urls.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn system_command(&self, command: SystemCommand) -> VdResult<()> {
        self.system_commands.lock().unwrap().push(command);
        Ok(())
    }
}
