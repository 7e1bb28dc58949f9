use std::collections::HashMap;
use std::sync::Arc;

use super::close::CloseApp;
use super::folder_file::{FolderFile, PlayFile};
use super::media::{OpenUrl, PlayYoutube, SearchYoutube};
use super::open::OpenApp;
use super::screen_share::{StartScreenShare, StopScreenShare};
use super::system::SystemControl;
use super::window_state::{MaximizeWindow, MinimizeWindow};
use super::{ActionInvocation, ToolAction};
use crate::config::AppConfig;
use crate::desktop::Desktop;
use crate::vision::VisionStreamer;

/// Fixed allow-list of invokable actions, keyed by name. This is the
/// process's sandboxing boundary: planner replies and session tool calls can
/// only ever reach what is registered here, nothing else in the namespace.
pub struct ToolRegistry {
    tools: HashMap<&'static str, Arc<dyn ToolAction>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// All built-in executors wired against one desktop backend.
    pub fn builtin(
        desktop: Arc<dyn Desktop>,
        streamer: Arc<VisionStreamer>,
        config: &AppConfig,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OpenApp::new(desktop.clone())));
        registry.register(Arc::new(CloseApp::new(desktop.clone())));
        registry.register(Arc::new(MinimizeWindow::new(desktop.clone())));
        registry.register(Arc::new(MaximizeWindow::new(desktop.clone())));
        registry.register(Arc::new(FolderFile::new(desktop.clone(), &config.files)));
        registry.register(Arc::new(PlayFile::new(desktop.clone(), &config.files)));
        registry.register(Arc::new(PlayYoutube::new(desktop.clone())));
        registry.register(Arc::new(SearchYoutube::new(desktop.clone())));
        registry.register(Arc::new(OpenUrl::new(desktop.clone())));
        registry.register(Arc::new(SystemControl::new(desktop)));
        registry.register(Arc::new(StartScreenShare::new(streamer.clone())));
        registry.register(Arc::new(StopScreenShare::new(streamer)));
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn ToolAction>) {
        self.tools.insert(tool.name(), tool);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolAction>> {
        self.tools.get(name).cloned()
    }

    /// The executor string boundary. Returns `None` for unregistered names
    /// (fail closed); otherwise always a speakable reply — executor failures
    /// are converted here and never cross upward as raw faults.
    pub async fn dispatch(&self, name: &str, invocation: ActionInvocation) -> Option<String> {
        let tool = self.get(name)?;
        let reply = match tool.invoke(&invocation).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "action failed");
                e.to_string()
            }
        };
        Some(reply)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
