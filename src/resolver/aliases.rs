use super::{resolve, ALIAS_THRESHOLD};

/// Known app: the spoken name users say, and the process image used when a
/// window-title lookup cannot find it (UWP surfaces, background processes).
pub struct AppAlias {
    pub spoken: &'static str,
    pub process_image: &'static str,
}

pub const APP_ALIASES: &[AppAlias] = &[
    AppAlias { spoken: "notepad", process_image: "notepad.exe" },
    AppAlias { spoken: "calculator", process_image: "CalculatorApp.exe" },
    AppAlias { spoken: "chrome", process_image: "chrome.exe" },
    AppAlias { spoken: "vlc", process_image: "vlc.exe" },
    AppAlias { spoken: "command prompt", process_image: "cmd.exe" },
    AppAlias { spoken: "control panel", process_image: "control.exe" },
    AppAlias { spoken: "settings", process_image: "SystemSettings.exe" },
    AppAlias { spoken: "paint", process_image: "mspaint.exe" },
    AppAlias { spoken: "vs code", process_image: "Code.exe" },
    AppAlias { spoken: "postman", process_image: "Postman.exe" },
    AppAlias { spoken: "word", process_image: "winword.exe" },
    AppAlias { spoken: "excel", process_image: "excel.exe" },
    AppAlias { spoken: "powerpoint", process_image: "powerpnt.exe" },
    AppAlias { spoken: "photoshop", process_image: "Photoshop.exe" },
    AppAlias { spoken: "spotify", process_image: "Spotify.exe" },
    AppAlias { spoken: "whatsapp", process_image: "WhatsApp.exe" },
    AppAlias { spoken: "telegram", process_image: "Telegram.exe" },
    AppAlias { spoken: "discord", process_image: "Discord.exe" },
];

/// Resolves a raw spoken target to a canonical launch/search term. Only a
/// high-confidence alias hit (score > 80) replaces the user's wording;
/// otherwise the raw input is kept so unknown apps still work.
pub fn normalize_app_name(raw: &str) -> String {
    let spoken = APP_ALIASES.iter().map(|a| a.spoken);
    match resolve(raw, spoken, ALIAS_THRESHOLD) {
        Some(m) => {
            tracing::debug!(raw = %raw, canonical = %m.name, score = m.score, "alias normalized");
            m.name
        }
        None => raw.trim().to_string(),
    }
}

/// OS-managed surfaces that are not reliably discoverable by window title.
/// Closing these falls back to terminating the known process image directly.
pub fn system_surface_process(term: &str) -> Option<&'static str> {
    let term = term.to_lowercase();
    if term.contains("setting") {
        Some("SystemSettings.exe")
    } else if term.contains("calculator") {
        Some("CalculatorApp.exe")
    } else {
        None
    }
}

/// Domain-specific rewrites applied before a close lookup. Media-stop
/// phrasing targets the owning browser; editor shorthand expands to the
/// real product title.
pub fn rewrite_close_target(term: &str, window_titles: &[String]) -> String {
    let term = term.trim().to_lowercase();

    if term == "youtube" {
        let has_youtube = window_titles.iter().any(|t| t.to_lowercase().contains("youtube"));
        if !has_youtube {
            return "chrome".into();
        }
        return term;
    }

    match term.as_str() {
        "search" | "google" | "browser" | "internet" => "chrome".into(),
        "code" | "vs code" | "vscode" => "visual studio code".into(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_miss_resolves_to_canonical_alias() {
        assert_eq!(normalize_app_name("notepd"), "notepad");
    }

    #[test]
    fn unknown_app_keeps_raw_input() {
        assert_eq!(normalize_app_name("obscure editor 3000"), "obscure editor 3000");
    }

    #[test]
    fn settings_surface_maps_to_process_kill() {
        assert_eq!(system_surface_process("system settings"), Some("SystemSettings.exe"));
        assert_eq!(system_surface_process("notepad"), None);
    }

    #[test]
    fn youtube_with_no_tab_rewrites_to_browser() {
        let titles = vec!["Untitled - Notepad".to_string()];
        assert_eq!(rewrite_close_target("YouTube", &titles), "chrome");

        let titles = vec!["lofi beats - YouTube - Google Chrome".to_string()];
        assert_eq!(rewrite_close_target("YouTube", &titles), "youtube");
    }

    #[test]
    fn editor_shorthand_expands() {
        assert_eq!(rewrite_close_target("vs code", &[]), "visual studio code");
    }
}
