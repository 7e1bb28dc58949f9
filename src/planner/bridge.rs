use std::sync::Arc;

use serde_json::json;

use super::parser::{self, ParsedReply};
use crate::actions::{ActionInvocation, ToolRegistry};
use crate::config::PlannerConfig;
use crate::errors::{VdResult, VoiceDeskError};

/// Spoken when the planner endpoint rejects us for quota. There is no
/// in-call retry; the user just hears this and can ask again.
pub const RATE_LIMIT_REPLY: &str =
    "The planner is rate limited right now. Please try again in a moment.";

const SYSTEM_INSTRUCTIONS: &str = "\
You are the action planner of a desktop voice assistant. Decide whether the \
user's request maps to exactly one of the available actions below.

Rules:
- If it does, reply with ONLY the single call, e.g. open_app(\"notepad\"). \
No explanation, no markdown, no extra text.
- The argument must be a double-quoted string, or empty for actions that \
take none.
- If no action fits, reply with one short conversational sentence instead.
- Never invent action names that are not in the list.";

/// Bridges free-text requests to executor invocations through a remote
/// planning model. The model only ever proposes; execution goes through the
/// registry allow-list, and replies that do not parse as a known call are
/// spoken back as chat.
pub struct PlannerBridge {
    client: reqwest::Client,
    config: PlannerConfig,
    api_key: String,
    registry: Arc<ToolRegistry>,
}

impl PlannerBridge {
    pub fn new(config: PlannerConfig, api_key: String, registry: Arc<ToolRegistry>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            api_key,
            registry,
        }
    }

    /// One full plan-then-execute turn. All failure modes come back as a
    /// speakable string; nothing here propagates an error to the session.
    pub async fn plan_and_execute(
        &self,
        query: &str,
        visual_context: Option<&str>,
        window_titles: &[String],
    ) -> String {
        let reply = match self.complete(query, visual_context, window_titles).await {
            Ok(reply) => reply,
            Err(VoiceDeskError::RateLimited) => {
                tracing::warn!("planner rate limited");
                return RATE_LIMIT_REPLY.to_string();
            }
            Err(e) => {
                tracing::error!(error = %e, "planner request failed");
                return "I could not reach the planner just now.".to_string();
            }
        };
        self.execute_reply(&reply).await
    }

    /// Turns a raw model reply into the string the assistant speaks.
    /// Unrecognized action names fail closed with an explicit refusal.
    pub async fn execute_reply(&self, reply: &str) -> String {
        match parser::parse_reply(reply) {
            ParsedReply::Invoke { name, argument } => {
                tracing::info!(action = %name, argument = %argument, "planner proposed action");
                match self
                    .registry
                    .dispatch(&name, ActionInvocation::of(argument))
                    .await
                {
                    Some(result) => result,
                    None => {
                        tracing::warn!(action = %name, "planner proposed unregistered action");
                        format!("I can't do '{name}', that is not one of my actions.")
                    }
                }
            }
            ParsedReply::Chat(text) => text,
        }
    }

    async fn complete(
        &self,
        query: &str,
        visual_context: Option<&str>,
        window_titles: &[String],
    ) -> VdResult<String> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": self.system_prompt() },
                { "role": "user", "content": user_prompt(query, visual_context, window_titles) },
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "stream": false,
        });

        let response = self
            .client
            .post(&self.config.api_base)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(VoiceDeskError::RateLimited);
        }
        if !response.status().is_success() {
            let status = response.status();
            let err_body = response.text().await.unwrap_or_default();
            let lowered = err_body.to_lowercase();
            if lowered.contains("rate limit") || lowered.contains("quota") {
                return Err(VoiceDeskError::RateLimited);
            }
            return Err(VoiceDeskError::Planner(format!("{status}: {err_body}")));
        }

        let json: serde_json::Value = response.json().await?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();
        if content.is_empty() {
            return Err(VoiceDeskError::Planner("empty planner reply".into()));
        }
        tracing::debug!(reply = %content, "planner reply");
        Ok(content)
    }

    fn system_prompt(&self) -> String {
        let mut prompt = String::from(SYSTEM_INSTRUCTIONS);
        prompt.push_str("\n\nAvailable actions:\n");
        for name in self.registry.names() {
            if let Some(tool) = self.registry.get(name) {
                prompt.push_str(&format!("- {name}: {}\n", tool.description()));
            }
        }
        prompt
    }
}

fn user_prompt(query: &str, visual_context: Option<&str>, window_titles: &[String]) -> String {
    let mut prompt = format!("User request: '{query}'\n");
    if let Some(context) = visual_context {
        prompt.push_str(&format!("Visual context: {context}\n"));
    }
    prompt.push_str(&format!("Open windows: {window_titles:?}\n"));
    prompt.push_str("\nReply:");
    prompt
}
