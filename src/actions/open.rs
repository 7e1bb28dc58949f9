use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ActionError, ActionInvocation, ToolAction};
use crate::desktop::{Desktop, WindowDirectory};
use crate::resolver::{self, aliases, ALIAS_THRESHOLD};

/// Start-menu animation settle before typing.
const LAUNCHER_ANIMATION: Duration = Duration::from_millis(500);
/// Search results need a beat to populate before Enter.
const SEARCH_RESULTS_DELAY: Duration = Duration::from_millis(800);
const FOCUS_POLL_ATTEMPTS: u32 = 5;
const FOCUS_POLL_STEP: Duration = Duration::from_millis(600);

/// Opens an application by simulating the platform's search affordance
/// (launcher key, type the name, confirm), then polls for the new window.
///
/// Policy: never silently spawn a duplicate. If a matching window already
/// exists and the caller did not force a new instance, the result is a
/// confirmation request naming the existing window.
pub struct OpenApp {
    desktop: Arc<dyn Desktop>,
    directory: WindowDirectory,
}

impl OpenApp {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        let directory = WindowDirectory::new(desktop.clone());
        Self { desktop, directory }
    }

    fn find_existing(&self, term: &str) -> Option<String> {
        // Literal substring against live titles is the reliable check.
        if let Some(w) = self.directory.find_by_substring(term) {
            tracing::info!(title = %w.title, "existing window found via substring");
            return Some(w.title);
        }
        // High-confidence fuzzy backup catches retitled windows.
        let titles = self.directory.titles();
        let m = resolver::resolve(term, titles.iter().map(String::as_str), ALIAS_THRESHOLD)?;
        tracing::info!(title = %m.name, score = m.score, "existing window found via fuzzy match");
        Some(m.name)
    }
}

#[async_trait]
impl ToolAction for OpenApp {
    fn name(&self) -> &'static str {
        "open_app"
    }

    fn description(&self) -> &'static str {
        "Open a desktop application by name. Set force_new only when the user \
         explicitly asks for another instance or confirms opening again."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let raw = invocation.argument.trim();
        if raw.is_empty() {
            return Err(ActionError::InvalidInput("no application name given".into()));
        }

        let term = aliases::normalize_app_name(raw);

        // The Settings surface is single-instance natively and its background
        // process trips false duplicate positives, so it skips the check.
        if !invocation.force_new && !term.eq_ignore_ascii_case("settings") {
            if let Some(existing) = self.find_existing(&term) {
                return Err(ActionError::DuplicateDetected { existing });
            }
        }

        tracing::info!(term = %term, "launching via search affordance");
        self.desktop.open_launcher()?;
        tokio::time::sleep(LAUNCHER_ANIMATION).await;
        self.desktop.type_text(&term)?;
        tokio::time::sleep(SEARCH_RESULTS_DELAY).await;
        self.desktop.confirm_input()?;

        // Bounded poll with growing backoff: apps differ wildly in startup
        // latency and the window set is only eventually consistent.
        for attempt in 1..=FOCUS_POLL_ATTEMPTS {
            tokio::time::sleep(FOCUS_POLL_STEP * attempt).await;
            if let Some(w) = self.directory.find_by_substring(&term) {
                if let Err(e) = self.desktop.activate(&w) {
                    tracing::warn!(title = %w.title, error = %e, "activate after launch failed");
                }
                tracing::info!(title = %w.title, attempt, "launch confirmed");
                return Ok(format!("Opened '{}'.", w.title));
            }
        }

        tracing::warn!(term = %term, "launch sent but window never confirmed");
        Ok(format!(
            "Launch command sent for '{term}', but I could not confirm its window appeared. \
             It may still be starting."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::testing::ScriptedDesktop;
    use crate::desktop::WindowRef;

    #[tokio::test(start_paused = true)]
    async fn duplicate_window_blocks_launch_without_force() {
        let desktop = Arc::new(ScriptedDesktop::with_windows(vec![WindowRef::titled(
            "Untitled - Notepad",
        )]));
        let open = OpenApp::new(desktop.clone());

        let err = open.invoke(&ActionInvocation::of("notepad")).await.unwrap_err();
        assert!(matches!(
            err,
            ActionError::DuplicateDetected { ref existing } if existing == "Untitled - Notepad"
        ));
        assert_eq!(desktop.launcher_opens(), 0, "must not launch on duplicate");
    }

    #[tokio::test(start_paused = true)]
    async fn force_flag_overrides_duplicate_policy() {
        let desktop = Arc::new(ScriptedDesktop::with_windows(vec![WindowRef::titled(
            "Untitled - Notepad",
        )]));
        let open = OpenApp::new(desktop.clone());

        let invocation = ActionInvocation {
            argument: "notepad".into(),
            force_new: true,
        };
        let reply = open.invoke(&invocation).await.unwrap();
        assert_eq!(desktop.launcher_opens(), 1);
        assert!(reply.contains("Notepad") || reply.contains("notepad"));
    }

    #[tokio::test(start_paused = true)]
    async fn fuzzy_duplicate_above_eighty_also_blocks() {
        // No substring hit ("chrome" not in title), but fuzzy is close enough.
        let desktop = Arc::new(ScriptedDesktop::with_windows(vec![WindowRef::titled("chrume")]));
        let open = OpenApp::new(desktop.clone());

        let err = open.invoke(&ActionInvocation::of("chrome")).await.unwrap_err();
        assert!(matches!(err, ActionError::DuplicateDetected { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn launch_confirms_and_focuses_new_window() {
        let desktop = Arc::new(ScriptedDesktop::empty());
        desktop.appear_after_launch(WindowRef::titled("Untitled - Notepad"));
        let open = OpenApp::new(desktop.clone());

        let reply = open.invoke(&ActionInvocation::of("notepad")).await.unwrap();
        assert_eq!(reply, "Opened 'Untitled - Notepad'.");
        assert_eq!(desktop.activations(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unconfirmed_launch_reports_partial_success() {
        let desktop = Arc::new(ScriptedDesktop::empty());
        let open = OpenApp::new(desktop.clone());

        let reply = open.invoke(&ActionInvocation::of("notepad")).await.unwrap();
        assert!(reply.contains("could not confirm"));
        assert_eq!(desktop.launcher_opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_target_fails_fast() {
        let desktop = Arc::new(ScriptedDesktop::empty());
        let open = OpenApp::new(desktop);
        let err = open.invoke(&ActionInvocation::of("   ")).await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidInput(_)));
    }
}
