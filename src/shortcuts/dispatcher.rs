//! Shortcut dispatcher: matches key input against the registry and fires at
//! most one action per event.
use crossterm::event::KeyEventKind;

use crate::signal::SignalSender;

use super::keys::{is_bare_question_mark, normalize, InputTarget, KeyInput};
use super::registry::ShortcutRegistry;

/// Reserved id whose match opens the help overlay.
pub const HELP_SHORTCUT_ID: &str = "help";
/// Reserved id whose match asks the host to open the command palette.
pub const SEARCH_SHORTCUT_ID: &str = "search";

/// Result of offering one key event to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No shortcut matched; the event should reach the focused surface.
    PassThrough,
    /// A shortcut fired and default handling must be suppressed.
    Handled { id: String },
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }
}

/// Routes key input to shortcut actions.
///
/// Holds only the signal sender; the registry is passed per call so its
/// owner stays free to mutate it between events.
#[derive(Debug, Clone)]
pub struct ShortcutDispatcher {
    signals: SignalSender,
}

impl ShortcutDispatcher {
    pub fn new(signals: SignalSender) -> Self {
        Self { signals }
    }

    /// Offer one key event.
    ///
    /// Scans the registry in registration order and fires the first enabled,
    /// global definition whose key set equals the event's. An error returned
    /// by the action is propagated unchanged.
    pub fn dispatch(&self, registry: &ShortcutRegistry, input: &KeyInput) -> anyhow::Result<Dispatch> {
        // Key releases would fire a second time on terminals that report them
        if !matches!(input.event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return Ok(Dispatch::PassThrough);
        }

        // A plain `?` typed into a text field is text, not a help request
        if input.target == InputTarget::Editable && is_bare_question_mark(&input.event) {
            return Ok(Dispatch::PassThrough);
        }

        let chord = normalize(&input.event);
        let Some(definition) = registry.find_match(&chord) else {
            return Ok(Dispatch::PassThrough);
        };

        tracing::debug!(id = %definition.id, chord = %chord, "Shortcut matched");

        match definition.id.as_str() {
            HELP_SHORTCUT_ID => self.signals.request_open_help(),
            SEARCH_SHORTCUT_ID => self.signals.request_open_palette(),
            _ => (definition.action)()?,
        }

        Ok(Dispatch::Handled {
            id: definition.id.clone(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
