use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use super::{ActionError, ActionInvocation, ToolAction};
use crate::desktop::Desktop;

const RESULTS_FETCH_TIMEOUT: Duration = Duration::from_secs(6);

/// Plays a video: resolve the first result id from the YouTube results page
/// and open its watch URL directly. Falls back to the results page when the
/// lookup fails — playing something slightly wrong beats playing nothing.
pub struct PlayYoutube {
    desktop: Arc<dyn Desktop>,
    client: reqwest::Client,
}

impl PlayYoutube {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        Self {
            desktop,
            client: reqwest::Client::new(),
        }
    }

    async fn first_video_url(&self, query: &str) -> Option<String> {
        let results_url = search_url(query);
        let body = self
            .client
            .get(&results_url)
            .timeout(RESULTS_FETCH_TIMEOUT)
            .send()
            .await
            .ok()?
            .text()
            .await
            .ok()?;
        let re = Regex::new(r#""videoId":"([A-Za-z0-9_-]{11})""#).ok()?;
        let id = re.captures(&body)?.get(1)?.as_str().to_string();
        Some(format!("https://www.youtube.com/watch?v={id}"))
    }
}

#[async_trait]
impl ToolAction for PlayYoutube {
    fn name(&self) -> &'static str {
        "play_youtube"
    }

    fn description(&self) -> &'static str {
        "Play a song or video on YouTube from a search query."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let query = invocation.argument.trim();
        if query.is_empty() {
            return Err(ActionError::InvalidInput("nothing to play".into()));
        }

        match self.first_video_url(query).await {
            Some(url) => {
                self.desktop.open_url(&url)?;
                Ok(format!("Playing '{query}' on YouTube."))
            }
            None => {
                tracing::warn!(query, "first-result lookup failed, opening results page");
                self.desktop.open_url(&search_url(query))?;
                Ok(format!("Opened YouTube results for '{query}'."))
            }
        }
    }
}

pub struct SearchYoutube {
    desktop: Arc<dyn Desktop>,
}

impl SearchYoutube {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        Self { desktop }
    }
}

#[async_trait]
impl ToolAction for SearchYoutube {
    fn name(&self) -> &'static str {
        "search_youtube"
    }

    fn description(&self) -> &'static str {
        "Open the YouTube search results page for a query."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let query = invocation.argument.trim();
        if query.is_empty() {
            return Err(ActionError::InvalidInput("nothing to search for".into()));
        }
        self.desktop.open_url(&search_url(query))?;
        Ok(format!("Opened YouTube search for '{query}'."))
    }
}

/// Opens a URL in the default browser, for "show me the results" directives.
pub struct OpenUrl {
    desktop: Arc<dyn Desktop>,
}

impl OpenUrl {
    pub fn new(desktop: Arc<dyn Desktop>) -> Self {
        Self { desktop }
    }
}

#[async_trait]
impl ToolAction for OpenUrl {
    fn name(&self) -> &'static str {
        "open_url"
    }

    fn description(&self) -> &'static str {
        "Open a URL in the default web browser."
    }

    async fn invoke(&self, invocation: &ActionInvocation) -> Result<String, ActionError> {
        let raw = invocation.argument.trim();
        if raw.is_empty() {
            return Err(ActionError::InvalidInput("no URL given".into()));
        }
        let url = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };
        self.desktop.open_url(&url)?;
        Ok(format!("Opened {url}."))
    }
}

fn search_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        encode_query(query)
    )
}

/// Minimal percent-encoding for query strings.
fn encode_query(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for b in query.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
