use std::sync::Arc;

use async_trait::async_trait;

use super::{ActionError, ActionInvocation, ToolAction};
use crate::desktop::{Desktop, SystemCommand};

/// Volume control through the platform media keys.
pub struct SystemControl {
    desktop: Arc<dyn Desktop>,
}

impl SystemControl {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        Self { desktop }
    }
}

#[async_trait]
impl ToolAction for SystemControl {
    fn name(&self) -> &'static str {
        "system_control"
    }

    fn description(&self) -> &'static str {
        "Control system volume. Exact commands: 'mute', 'unmute', 'volume up', \
         'volume down'."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let raw = invocation.argument.trim();
        let Some(command) = SystemCommand::parse(raw) else {
            return Err(ActionError::InvalidInput(format!(
                "unknown system command '{raw}'; expected mute, unmute, volume up or volume down"
            )));
        };
        self.desktop.system_command(command)?;
        Ok(format!("System command '{raw}' executed."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::testing::ScriptedDesktop;

    #[tokio::test]
    async fn known_commands_reach_the_desktop() {
        let desktop = Arc::new(ScriptedDesktop::empty());
        let control = SystemControl::new(desktop.clone());

        control.invoke(&ActionInvocation::of("volume up")).await.unwrap();
        assert_eq!(desktop.system_commands(), vec![SystemCommand::VolumeUp]);
    }

    #[tokio::test]
    async fn unknown_command_fails_without_side_effects() {
        let desktop = Arc::new(ScriptedDesktop::empty());
        let control = SystemControl::new(desktop.clone());

        let err = control.invoke(&ActionInvocation::of("make it louder-ish")).await.unwrap_err();
        assert!(matches!(err, ActionError::InvalidInput(_)));
        assert!(desktop.system_commands().is_empty());
    }
}
