//! Keyboard shortcut engine.
//!
//! - `keys` - normalization of raw key events into canonical chords
//! - `registry` - the live table of shortcut definitions
//! - `dispatcher` - first-match dispatch of key input
//! - `format` - display rendering of key sequences
//! - `help` - category-grouped projection for the help overlay

mod dispatcher;
mod format;
mod help;
mod keys;
mod registry;

pub use dispatcher::{Dispatch, ShortcutDispatcher, HELP_SHORTCUT_ID, SEARCH_SHORTCUT_ID};
pub use format::{format_keys, format_token, KeyStyle, Platform};
pub use help::{help_sections, HelpFilter, HelpRow, HelpSection};
pub use keys::{
    canonical_token, is_bare_question_mark, normalize, parse_key_string, InputTarget, KeyChord,
    KeyInput, KeyParseError,
};
pub use registry::{ShortcutCategory, ShortcutDefinition, ShortcutRegistry};
