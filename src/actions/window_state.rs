use std::sync::Arc;

use async_trait::async_trait;

use super::{ActionError, ActionInvocation, ToolAction};
use crate::desktop::{Desktop, WindowDirectory, WindowRef};
use crate::resolver::{self, GENERIC_THRESHOLD};

/// Two-stage lookup shared by minimize/maximize: literal substring first,
/// then a fuzzy best-guess above the generic threshold. The not-found reply
/// lists a few open titles so the user can correct themselves.
fn locate(directory: &WindowDirectory, raw: &str) -> Result<WindowRef, ActionError> {
    let term = expand_shorthand(raw.trim());
    if term.is_empty() {
        return Err(ActionError::InvalidInput("no window name given".into()));
    }

    if let Some(w) = directory.find_by_substring(&term) {
        return Ok(w);
    }

    let windows = directory.enumerate();
    let titles: Vec<&str> = windows.iter().map(|w| w.title.as_str()).collect();
    if let Some(m) = resolver::resolve(&term, titles.iter().copied(), GENERIC_THRESHOLD) {
        if let Some(w) = windows.iter().find(|w| w.title == m.name).cloned() {
            tracing::info!(title = %w.title, score = m.score, "window located via fuzzy match");
            return Ok(w);
        }
    }

    let sample: Vec<&str> = titles.iter().take(5).copied().collect();
    Err(ActionError::NotFound(format!(
        "'{raw}'. Open windows: {}",
        sample.join(", ")
    )))
}

fn expand_shorthand(term: &str) -> String {
    match term.to_lowercase().as_str() {
        "code" | "vs code" | "vscode" => "visual studio code".into(),
        other => other.to_string(),
    }
}

pub struct MinimizeWindow {
    desktop: Arc<dyn Desktop>,
    directory: WindowDirectory,
}

impl MinimizeWindow {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        let directory = WindowDirectory::new(desktop.clone());
        Self { desktop, directory }
    }
}

#[async_trait]
impl ToolAction for MinimizeWindow {
    fn name(&self) -> &'static str {
        "minimize_window"
    }

    fn description(&self) -> &'static str {
        "Minimize (hide) a specific window by name."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let window = locate(&self.directory, &invocation.argument)?;
        // Idempotent: an already-minimized window is an informational reply,
        // not an error.
        if window.minimized {
            return Ok(format!("'{}' is already minimized.", window.title));
        }
        self.desktop.minimize(&window)?;
        Ok(format!("Minimized '{}'.", window.title))
    }
}

pub struct MaximizeWindow {
    desktop: Arc<dyn Desktop>,
    directory: WindowDirectory,
}

impl MaximizeWindow {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        let directory = WindowDirectory::new(desktop.clone());
        Self { desktop, directory }
    }
}

#[async_trait]
impl ToolAction for MaximizeWindow {
    fn name(&self) -> &'static str {
        "maximize_window"
    }

    fn description(&self) -> &'static str {
        "Maximize or restore a specific window by name and bring it forward."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let window = locate(&self.directory, &invocation.argument)?;
        self.desktop.maximize(&window)?;
        self.desktop.activate(&window)?;
        Ok(format!("Maximized '{}'.", window.title))
    }
}
