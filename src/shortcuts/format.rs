//! Render key tokens for display (help overlay, palette hints, status line).
use super::keys::canonical_token;

/// Display platform. Only used to pick a default [`KeyStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOS
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

/// How a key sequence is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Dense glyph run with no separators: `⌘⇧D`.
    Symbols,
    /// Tokens joined with `+`: `⌘+⇧+D`.
    Text,
}

impl KeyStyle {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOS => Self::Symbols,
            Platform::Windows | Platform::Linux => Self::Text,
        }
    }

    /// The other style; used by the settings command that flips it.
    pub fn toggled(self) -> Self {
        match self {
            Self::Symbols => Self::Text,
            Self::Text => Self::Symbols,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Symbols => "symbols",
            Self::Text => "text",
        }
    }
}

/// Display form of a single token.
///
/// Known names map to glyphs; anything else is upper-cased when it is a
/// single character and title-cased otherwise (`f5` → `F5`, `home` → `Home`).
pub fn format_token(token: &str) -> String {
    let canonical = canonical_token(token);
    let glyph = match canonical.as_str() {
        "cmd" => "⌘",
        "shift" => "⇧",
        "alt" => "⌥",
        "enter" => "↵",
        "space" => "⎵",
        "tab" => "⇥",
        "delete" | "backspace" => "⌫",
        "escape" => "⎋",
        "arrowup" => "↑",
        "arrowdown" => "↓",
        "arrowleft" => "←",
        "arrowright" => "→",
        other => return title_case(other),
    };
    glyph.to_string()
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if chars.as_str().is_empty() => first.to_uppercase().collect(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Format a key sequence in the given style, preserving token order.
pub fn format_keys<S: AsRef<str>>(keys: &[S], style: KeyStyle) -> String {
    let parts: Vec<String> = keys.iter().map(|k| format_token(k.as_ref())).collect();
    match style {
        KeyStyle::Symbols => parts.concat(),
        KeyStyle::Text => parts.join("+"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_style_is_dense() {
        assert_eq!(format_keys(&["Cmd", "Shift", "D"], KeyStyle::Symbols), "⌘⇧D");
    }

    #[test]
    fn test_text_style_joins_with_plus() {
        assert_eq!(format_keys(&["Cmd", "Shift", "D"], KeyStyle::Text), "⌘+⇧+D");
    }

    #[test]
    fn test_named_key_glyphs() {
        assert_eq!(format_token("enter"), "↵");
        assert_eq!(format_token("Space"), "⎵");
        assert_eq!(format_token("tab"), "⇥");
        assert_eq!(format_token("Backspace"), "⌫");
        assert_eq!(format_token("delete"), "⌫");
        assert_eq!(format_token("esc"), "⎋");
        assert_eq!(format_token("Escape"), "⎋");
        assert_eq!(format_token("ArrowUp"), "↑");
        assert_eq!(format_token("down"), "↓");
        assert_eq!(format_token("alt"), "⌥");
    }

    #[test]
    fn test_ctrl_displays_as_cmd() {
        assert_eq!(format_token("Ctrl"), "⌘");
    }

    #[test]
    fn test_unknown_tokens_fall_back_to_literal() {
        assert_eq!(format_token("k"), "K");
        assert_eq!(format_token("?"), "?");
        assert_eq!(format_token("f5"), "F5");
        assert_eq!(format_token("pageup"), "Pageup");
    }

    #[test]
    fn test_empty_sequence() {
        let empty: [&str; 0] = [];
        assert_eq!(format_keys(&empty, KeyStyle::Text), "");
    }

    #[test]
    fn test_formatting_is_stable() {
        let keys = ["Alt", "1"];
        assert_eq!(
            format_keys(&keys, KeyStyle::Symbols),
            format_keys(&keys, KeyStyle::Symbols)
        );
    }

    #[test]
    fn test_platform_default_style() {
        assert_eq!(KeyStyle::for_platform(Platform::MacOS), KeyStyle::Symbols);
        assert_eq!(KeyStyle::for_platform(Platform::Linux), KeyStyle::Text);
        assert_eq!(KeyStyle::Symbols.toggled(), KeyStyle::Text);
    }
}
