use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ActionError, ActionInvocation, ToolAction};
use crate::vision::VisionStreamer;

const DEFAULT_SHARE_SECS: u64 = 60;
const MAX_SHARE_SECS: u64 = 600;

/// Starts streaming screen frames into the active session for a bounded
/// duration. Re-invoking replaces the running share.
pub struct StartScreenShare {
    streamer: Arc<VisionStreamer>,
}

impl StartScreenShare {
    pub fn new(streamer: Arc<VisionStreamer>) -> Self {
        Self { streamer }
    }
}

#[async_trait]
impl ToolAction for StartScreenShare {
    fn name(&self) -> &'static str {
        "start_screen_share"
    }

    fn description(&self) -> &'static str {
        "Start sharing the screen with the assistant. Optional argument: \
         duration in seconds (default 60)."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let seconds = parse_seconds(&invocation.argument).unwrap_or(DEFAULT_SHARE_SECS);
        let seconds = seconds.clamp(1, MAX_SHARE_SECS);
        Ok(self.streamer.enable(Duration::from_secs(seconds)).await)
    }
}

pub struct StopScreenShare {
    streamer: Arc<VisionStreamer>,
}

impl StopScreenShare {
    pub fn new(streamer: Arc<VisionStreamer>) -> Self {
        Self { streamer }
    }
}

#[async_trait]
impl ToolAction for StopScreenShare {
    fn name(&self) -> &'static str {
        "stop_screen_share"
    }

    fn description(&self) -> &'static str {
        "Stop sharing the screen."
    }

    async fn invoke(&self, _invocation: &ActionInvocation) -> Result<String, ActionError> {
        Ok(self.streamer.disable().await)
    }
}

/// First run of digits in the argument, so "for 120 seconds" works.
fn parse_seconds(argument: &str) -> Option<u64> {
    let digits: String = argument
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_are_parsed_out_of_free_text() {
        assert_eq!(parse_seconds("120"), Some(120));
        assert_eq!(parse_seconds("for 45 seconds"), Some(45));
        assert_eq!(parse_seconds("a while"), None);
    }
}
