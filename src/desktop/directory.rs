use std::sync::Arc;

use super::{Desktop, WindowRef};

/// Shell-owned surfaces that show up in enumeration but are never valid
/// targets for a user directive.
const GHOST_TITLES: &[&str] = &["Program Manager", "Default IME", "MSCTFIME UI", "Windows Input Experience"];

const MIN_DIMENSION: u32 = 30;

/// Derived queries over the live window set. Holds no window state of its
/// own; every call re-enumerates because the set changes between directives.
#[derive(Clone)]
pub struct WindowDirectory {
    desktop: Arc<dyn Desktop>,
}

impl WindowDirectory {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        Self { desktop }
    }

    /// Visible, titled, non-ghost windows. Tiny windows are dropped — 1×1
    /// helper windows from background processes otherwise pollute matching.
    pub fn enumerate(&self) -> Vec<WindowRef> {
        self.desktop
            .list_windows()
            .into_iter()
            .filter(|w| {
                w.visible
                    && !w.title.trim().is_empty()
                    && w.width > MIN_DIMENSION
                    && w.height > MIN_DIMENSION
                    && !GHOST_TITLES.contains(&w.title.trim())
            })
            .collect()
    }

    pub fn titles(&self) -> Vec<String> {
        self.enumerate().into_iter().map(|w| w.title).collect()
    }

    /// First visible window whose title contains `term` (case-insensitive).
    pub fn find_by_substring(&self, term: &str) -> Option<WindowRef> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.enumerate()
            .into_iter()
            .find(|w| w.title.to_lowercase().contains(&needle))
    }

    /// Existence check by stable handle against a fresh enumeration. Used by
    /// close-verification, where titles can collide but handles cannot.
    pub fn contains_handle(&self, handle: isize) -> bool {
        self.desktop
            .list_windows()
            .iter()
            .any(|w| w.handle == Some(handle))
    }

    /// Title-equality existence check, the fallback when the target had no
    /// stable handle.
    pub fn contains_title(&self, title: &str) -> bool {
        self.desktop.list_windows().iter().any(|w| w.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::testing::ScriptedDesktop;

    fn directory_with(windows: Vec<WindowRef>) -> WindowDirectory {
        WindowDirectory::new(Arc::new(ScriptedDesktop::with_windows(windows)))
    }

    #[test]
    fn ghost_and_tiny_windows_are_filtered() {
        let mut tiny = WindowRef::titled("Background helper");
        tiny.width = 1;
        tiny.height = 1;
        let dir = directory_with(vec![
            WindowRef::titled("Program Manager"),
            WindowRef::titled("Untitled - Notepad"),
            tiny,
        ]);
        let titles = dir.titles();
        assert_eq!(titles, vec!["Untitled - Notepad".to_string()]);
    }

    #[test]
    fn substring_lookup_is_case_insensitive() {
        let dir = directory_with(vec![WindowRef::titled("lofi beats - YouTube - Google Chrome")]);
        assert!(dir.find_by_substring("youtube").is_some());
        assert!(dir.find_by_substring("firefox").is_none());
    }

    #[test]
    fn handle_check_reflects_live_state() {
        let mut w = WindowRef::titled("Notepad");
        w.handle = Some(42);
        let dir = directory_with(vec![w]);
        assert!(dir.contains_handle(42));
        assert!(!dir.contains_handle(43));
    }
}
