use std::sync::OnceLock;

use regex::Regex;

/// What a planner reply turned out to be: a single recognized action call,
/// or plain text to speak back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    Invoke { name: String, argument: String },
    Chat(String),
}

fn call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // name("arg"), name('arg') or name() on a single line, nothing else.
        Regex::new(r#"^([a-z][a-z0-9_]*)\(\s*(?:"([^"]*)"|'([^']*)')?\s*\)$"#)
            .unwrap()
    })
}

/// Models routinely wrap replies in markdown fences even when told not to.
/// Drops fence lines and surrounding whitespace, keeps everything else.
pub fn strip_fences(reply: &str) -> String {
    reply
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Parses a reply into an action call or chat text. Only the exact
/// single-call shape is recognized; anything else, including replies that
/// merely mention parentheses, is treated as chat. The reply is never
/// evaluated or interpreted beyond this match.
pub fn parse_reply(reply: &str) -> ParsedReply {
    let cleaned = strip_fences(reply);
    match call_pattern().captures(&cleaned) {
        Some(caps) => {
            let name = caps[1].to_string();
            let argument = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            ParsedReply::Invoke { name, argument }
        }
        None => ParsedReply::Chat(cleaned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_a_quoted_call() {
        assert_eq!(
            parse_reply(r#"open_app("notepad")"#),
            ParsedReply::Invoke {
                name: "open_app".into(),
                argument: "notepad".into()
            }
        );
    }

    #[test]
    fn recognizes_single_quotes_and_empty_args() {
        assert_eq!(
            parse_reply("close_app('chrome')"),
            ParsedReply::Invoke {
                name: "close_app".into(),
                argument: "chrome".into()
            }
        );
        assert_eq!(
            parse_reply("stop_screen_share()"),
            ParsedReply::Invoke {
                name: "stop_screen_share".into(),
                argument: String::new()
            }
        );
    }

    #[test]
    fn strips_markdown_fences_before_matching() {
        let fenced = "```python\nopen_app(\"vlc\")\n```";
        assert_eq!(
            parse_reply(fenced),
            ParsedReply::Invoke {
                name: "open_app".into(),
                argument: "vlc".into()
            }
        );
    }

    #[test]
    fn prose_with_parentheses_stays_chat() {
        let reply = "I can open apps (like Notepad) for you.";
        assert_eq!(parse_reply(reply), ParsedReply::Chat(reply.to_string()));
    }

    #[test]
    fn multi_statement_replies_stay_chat() {
        let reply = "open_app(\"a\"); close_app(\"b\")";
        assert!(matches!(parse_reply(reply), ParsedReply::Chat(_)));
    }

    #[test]
    fn unquoted_arguments_stay_chat() {
        assert!(matches!(
            parse_reply("open_app(notepad)"),
            ParsedReply::Chat(_)
        ));
    }
}
