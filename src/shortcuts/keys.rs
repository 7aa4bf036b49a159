//! Key normalization: raw crossterm key events to canonical token sets.
//!
//! A [`KeyChord`] is the order-independent, lower-cased set of tokens that
//! both sides of a match are reduced to. Meta, Super and Control all collapse
//! to the single `cmd` token, so a definition written with `Cmd` matches
//! whichever of those keys was physically held.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

pub const CMD: &str = "cmd";
pub const SHIFT: &str = "shift";
pub const ALT: &str = "alt";

/// Modifier bits that map to the `cmd` token.
const CMD_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::SUPER)
    .union(KeyModifiers::META);

// ============================================================================
// Input Events
// ============================================================================

/// Kind of surface that had focus when a key event arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputTarget {
    /// A surface accepting free text (filter field, text area).
    Editable,
    #[default]
    Other,
}

/// A key event together with the surface it was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub event: KeyEvent,
    pub target: InputTarget,
}

impl KeyInput {
    /// Event delivered outside any editable surface.
    pub const fn new(event: KeyEvent) -> Self {
        Self {
            event,
            target: InputTarget::Other,
        }
    }

    /// Event delivered to an editable surface.
    pub const fn editable(event: KeyEvent) -> Self {
        Self {
            event,
            target: InputTarget::Editable,
        }
    }
}

// ============================================================================
// Key Chord
// ============================================================================

/// Canonical, order-independent key combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyChord(BTreeSet<String>);

impl KeyChord {
    /// Build a chord from definition tokens such as `["Cmd", "Shift", "D"]`.
    ///
    /// Tokens are lower-cased and folded through [`canonical_token`], so
    /// `Ctrl`, `Meta` and `Cmd` all land on `cmd`.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|t| canonical_token(t.as_ref()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn insert(&mut self, token: impl Into<String>) {
        self.0.insert(token.into());
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.iter().collect();
        write!(f, "{}", tokens.join("+"))
    }
}

/// Fold a definition token to its canonical lower-case form.
pub fn canonical_token(token: &str) -> String {
    let lower = token.to_lowercase();
    let folded = match lower.as_str() {
        "ctrl" | "control" | "meta" | "super" | "command" | "⌘" => CMD,
        "option" | "opt" | "⌥" => ALT,
        "⇧" => SHIFT,
        "esc" => "escape",
        "return" => "enter",
        "up" => "arrowup",
        "down" => "arrowdown",
        "left" => "arrowleft",
        "right" => "arrowright",
        " " => "space",
        _ => return lower,
    };
    folded.to_string()
}

/// Whether a lower-cased key name denotes a modifier rather than a main key.
pub fn is_modifier_name(token: &str) -> bool {
    matches!(
        token,
        "cmd" | "ctrl" | "control" | "meta" | "super" | "command" | "shift" | "alt" | "option"
    )
}

// ============================================================================
// Normalization
// ============================================================================

/// Token for the primary key of an event, or `None` for keys that carry no
/// main-key identity (bare modifier presses, lock keys, media keys).
fn key_code_token(code: KeyCode) -> Option<String> {
    let token = match code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_lowercase().collect(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Up => "arrowup".to_string(),
        KeyCode::Down => "arrowdown".to_string(),
        KeyCode::Left => "arrowleft".to_string(),
        KeyCode::Right => "arrowright".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        _ => return None,
    };
    if is_modifier_name(&token) {
        return None;
    }
    Some(token)
}

/// Whether Shift is already folded into the character itself.
///
/// Terminals deliver `?`, `!` or `+` as the shifted symbol, and some also
/// report Shift alongside it. Letters and space keep Shift as a token.
fn is_shifted_symbol(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(c) if !c.is_alphabetic() && c != ' ')
}

/// Reduce a raw key event to its canonical chord.
///
/// Shift is dropped for non-letter characters, so `?` reported with or
/// without Shift both normalize to `{?}`.
pub fn normalize(event: &KeyEvent) -> KeyChord {
    let mut chord = KeyChord::default();

    if event.modifiers.intersects(CMD_MODIFIERS) {
        chord.insert(CMD);
    }
    // BackTab is how terminals report Shift+Tab
    if (event.modifiers.contains(KeyModifiers::SHIFT) && !is_shifted_symbol(event.code))
        || event.code == KeyCode::BackTab
    {
        chord.insert(SHIFT);
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        chord.insert(ALT);
    }
    if let Some(token) = key_code_token(event.code) {
        chord.insert(token);
    }

    chord
}

/// Whether the event is a plain `?`, the key reserved for opening help.
///
/// Shift is ignored since most layouts need it to produce `?` at all.
pub fn is_bare_question_mark(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('?')
        && !event
            .modifiers
            .intersects(CMD_MODIFIERS | KeyModifiers::ALT | KeyModifiers::HYPER)
}

// ============================================================================
// Key Strings
// ============================================================================

/// Errors from parsing a user-written key string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("key string is empty")]
    Empty,

    #[error("empty key token in '{0}'")]
    EmptyToken(String),
}

/// Parse a key string from config, e.g. `"Cmd+Shift+D"`, into definition
/// tokens.
///
/// Tokens keep their original spelling; folding happens at match time. A
/// trailing `+` names the plus key itself (`"Cmd++"` is Cmd and `+`).
pub fn parse_key_string(s: &str) -> Result<Vec<String>, KeyParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }
    if s == "+" {
        return Ok(vec!["+".to_string()]);
    }

    let (body, plus_key) = match s.strip_suffix("++") {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let mut tokens = Vec::new();
    for part in body.split('+') {
        let part = part.trim();
        if part.is_empty() {
            return Err(KeyParseError::EmptyToken(s.to_string()));
        }
        tokens.push(part.to_string());
    }
    if plus_key {
        tokens.push("+".to_string());
    }

    Ok(tokens)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(tokens: &[&str]) -> KeyChord {
        KeyChord::from_tokens(tokens.iter().copied())
    }

    #[test]
    fn test_normalize_meta_shift_letter() {
        let event = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SUPER | KeyModifiers::SHIFT);
        assert_eq!(normalize(&event), chord(&["cmd", "shift", "d"]));
    }

    #[test]
    fn test_ctrl_and_meta_collapse_to_cmd() {
        let ctrl = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        let sup = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER);
        let meta = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::META);
        assert_eq!(normalize(&ctrl), normalize(&sup));
        assert_eq!(normalize(&sup), normalize(&meta));
        assert_eq!(normalize(&ctrl), chord(&["Cmd", "K"]));
    }

    #[test]
    fn test_ctrl_and_meta_together_yield_single_cmd() {
        let event = KeyEvent::new(
            KeyCode::Char('k'),
            KeyModifiers::CONTROL | KeyModifiers::SUPER,
        );
        let normalized = normalize(&event);
        assert_eq!(normalized.len(), 2);
        assert!(normalized.contains("cmd"));
    }

    #[test]
    fn test_alt_token() {
        let event = KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT);
        assert_eq!(normalize(&event), chord(&["alt", "1"]));
    }

    #[test]
    fn test_named_keys() {
        let plain = |code| normalize(&KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(plain(KeyCode::Enter), chord(&["enter"]));
        assert_eq!(plain(KeyCode::Esc), chord(&["escape"]));
        assert_eq!(plain(KeyCode::Up), chord(&["arrowup"]));
        assert_eq!(plain(KeyCode::Char(' ')), chord(&["space"]));
        assert_eq!(plain(KeyCode::F(5)), chord(&["f5"]));
    }

    #[test]
    fn test_shift_dropped_for_symbols() {
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(normalize(&shifted), chord(&["?"]));

        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(normalize(&plus), chord(&["cmd", "+"]));
    }

    #[test]
    fn test_shift_kept_for_letters_and_space() {
        let letter = KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(normalize(&letter), chord(&["shift", "p"]));

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::SHIFT);
        assert_eq!(normalize(&space), chord(&["shift", "space"]));
    }

    #[test]
    fn test_backtab_reports_shift_tab() {
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(normalize(&event), chord(&["shift", "tab"]));
    }

    #[test]
    fn test_bare_modifier_press_has_no_main_key() {
        use crossterm::event::ModifierKeyCode;
        let event = KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::LeftShift),
            KeyModifiers::SHIFT,
        );
        assert_eq!(normalize(&event), chord(&["shift"]));
    }

    #[test]
    fn test_definition_aliases_fold() {
        assert_eq!(chord(&["Ctrl", "Esc"]), chord(&["cmd", "escape"]));
        assert_eq!(chord(&["Option", "Up"]), chord(&["alt", "ArrowUp"]));
        assert_eq!(chord(&["Return"]), chord(&["enter"]));
    }

    #[test]
    fn test_chord_is_order_insensitive() {
        assert_eq!(chord(&["Shift", "Cmd", "D"]), chord(&["Cmd", "Shift", "D"]));
    }

    #[test]
    fn test_chord_display() {
        assert_eq!(chord(&["Shift", "Cmd", "D"]).to_string(), "cmd+d+shift");
    }

    #[test]
    fn test_bare_question_mark() {
        let plain = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        let with_cmd = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::CONTROL);
        let other = KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE);
        assert!(is_bare_question_mark(&plain));
        assert!(is_bare_question_mark(&shifted));
        assert!(!is_bare_question_mark(&with_cmd));
        assert!(!is_bare_question_mark(&other));
    }

    #[test]
    fn test_parse_key_string_combo() {
        assert_eq!(
            parse_key_string("Cmd+Shift+D").unwrap(),
            vec!["Cmd", "Shift", "D"]
        );
        assert_eq!(parse_key_string(" Alt + 1 ").unwrap(), vec!["Alt", "1"]);
    }

    #[test]
    fn test_parse_key_string_plus_key() {
        assert_eq!(parse_key_string("Cmd++").unwrap(), vec!["Cmd", "+"]);
        assert_eq!(parse_key_string("+").unwrap(), vec!["+"]);
    }

    #[test]
    fn test_parse_key_string_errors() {
        assert_eq!(parse_key_string("   "), Err(KeyParseError::Empty));
        assert_eq!(
            parse_key_string("Cmd++K"),
            Err(KeyParseError::EmptyToken("Cmd++K".to_string()))
        );
        assert!(parse_key_string("+K").is_err());
    }
}
