//! Input handling for the TUI.
//!
//! Keys are routed by priority: the help overlay captures everything while
//! visible, then the palette, then the shortcut dispatcher. Keys the
//! dispatcher passes through reach the library filter field when focused.

use crate::app::App;
use crate::commands::PaletteOutcome;
use crate::shortcuts::KeyInput;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Action;

/// Maximum length of the library filter field.
pub(super) const MAX_FILTER_LENGTH: usize = 64;

/// Main input dispatch function.
///
/// Errors are action failures surfaced by the dispatcher or the palette.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<Action> {
    if key.kind == KeyEventKind::Release {
        return Ok(Action::Continue);
    }

    // Help overlay captures all keys when visible
    if app.show_help {
        return Ok(handle_help_input(app, key.code));
    }

    if app.palette.is_open() {
        return handle_palette_input(app, key);
    }

    let input = KeyInput {
        event: key,
        target: app.input_target(),
    };
    let dispatch = app.dispatcher.dispatch(&app.registry, &input)?;
    if dispatch.is_handled() {
        return Ok(Action::Continue);
    }

    // Ctrl+C always quits, even if "quit" was rebound or disabled
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(Action::Quit);
    }

    if app.filter_focused {
        handle_filter_input(app, key);
    }

    Ok(Action::Continue)
}

/// Handle input when help overlay is visible.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            app.help_filter = app.help_filter.toggled();
            app.help_scroll_offset = 0;
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while the command palette is open.
///
/// A command that ran closes the palette; its effects arrive afterwards as
/// app events or signals.
fn handle_palette_input(app: &mut App, key: KeyEvent) -> Result<Action> {
    match app.palette.handle_key(key)? {
        PaletteOutcome::Executed { id } => {
            tracing::debug!(%id, "Palette command executed");
            app.palette.close();
        }
        PaletteOutcome::Closed => tracing::debug!("Palette dismissed"),
        PaletteOutcome::Updated | PaletteOutcome::Ignored => {}
    }
    Ok(Action::Continue)
}

/// Edit the library filter field.
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.library_filter.clear();
            app.filter_focused = false;
        }
        KeyCode::Enter => app.filter_focused = false,
        KeyCode::Backspace => {
            app.library_filter.pop();
        }
        KeyCode::Char(c)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            if app.library_filter.len() >= MAX_FILTER_LENGTH {
                app.set_status(format!(
                    "Filter at max length ({} chars)",
                    MAX_FILTER_LENGTH
                ));
                return;
            }
            app.library_filter.push(c);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::config::Config;
    use crate::screens::Screen;
    use crate::shortcuts::HelpFilter;
    use crate::signal::{signal_channel, Signal};
    use tokio::sync::mpsc;

    struct Harness {
        app: App,
        signals: mpsc::UnboundedReceiver<Signal>,
        events: mpsc::UnboundedReceiver<AppEvent>,
    }

    fn harness() -> Harness {
        let (signal_tx, signals) = signal_channel();
        let (event_tx, events) = mpsc::unbounded_channel();
        Harness {
            app: App::new(&Config::default(), signal_tx, event_tx),
            signals,
            events,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_k_requests_palette() {
        let mut h = harness();
        handle_input(&mut h.app, ctrl('k')).unwrap();
        assert_eq!(h.signals.try_recv().ok(), Some(Signal::OpenPalette));
    }

    #[test]
    fn test_question_mark_requests_help() {
        let mut h = harness();
        handle_input(&mut h.app, key(KeyCode::Char('?'))).unwrap();
        assert_eq!(h.signals.try_recv().ok(), Some(Signal::OpenHelp));
    }

    #[test]
    fn test_shifted_question_mark_requests_help() {
        let mut h = harness();
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        handle_input(&mut h.app, shifted).unwrap();
        assert_eq!(h.signals.try_recv().ok(), Some(Signal::OpenHelp));
    }

    #[test]
    fn test_shifted_question_mark_types_into_focused_filter() {
        let mut h = harness();
        h.app.navigate(Screen::Library);
        h.app.filter_focused = true;

        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        handle_input(&mut h.app, shifted).unwrap();
        assert!(h.signals.try_recv().is_err());
        assert_eq!(h.app.library_filter, "?");
    }

    #[test]
    fn test_question_mark_types_into_focused_filter() {
        let mut h = harness();
        h.app.navigate(Screen::Library);
        h.app.filter_focused = true;

        handle_input(&mut h.app, key(KeyCode::Char('?'))).unwrap();
        assert!(h.signals.try_recv().is_err());
        assert_eq!(h.app.library_filter, "?");
    }

    #[test]
    fn test_shortcuts_still_fire_while_filter_focused() {
        let mut h = harness();
        h.app.navigate(Screen::Library);
        h.app.filter_focused = true;

        handle_input(&mut h.app, ctrl('k')).unwrap();
        assert_eq!(h.signals.try_recv().ok(), Some(Signal::OpenPalette));
        assert_eq!(h.app.library_filter, "");
    }

    #[test]
    fn test_filter_editing() {
        let mut h = harness();
        h.app.navigate(Screen::Library);
        h.app.filter_focused = true;

        for c in "rust".chars() {
            handle_input(&mut h.app, key(KeyCode::Char(c))).unwrap();
        }
        handle_input(&mut h.app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(h.app.library_filter, "rus");

        handle_input(&mut h.app, key(KeyCode::Enter)).unwrap();
        assert!(!h.app.filter_focused);
        assert_eq!(h.app.library_filter, "rus");
    }

    #[test]
    fn test_filter_escape_clears_and_unfocuses() {
        let mut h = harness();
        h.app.navigate(Screen::Library);
        h.app.filter_focused = true;
        h.app.library_filter = "sync".to_string();

        handle_input(&mut h.app, key(KeyCode::Esc)).unwrap();
        assert!(!h.app.filter_focused);
        assert!(h.app.library_filter.is_empty());
    }

    #[test]
    fn test_filter_max_length() {
        let mut h = harness();
        h.app.navigate(Screen::Library);
        h.app.filter_focused = true;
        h.app.library_filter = "x".repeat(MAX_FILTER_LENGTH);

        handle_input(&mut h.app, key(KeyCode::Char('y'))).unwrap();
        assert_eq!(h.app.library_filter.len(), MAX_FILTER_LENGTH);
        assert!(h.app.status_message.is_some());
    }

    #[test]
    fn test_help_overlay_captures_keys() {
        let mut h = harness();
        h.app.show_help = true;

        handle_input(&mut h.app, ctrl('k')).unwrap();
        assert!(h.signals.try_recv().is_err());

        handle_input(&mut h.app, key(KeyCode::Char('j'))).unwrap();
        assert_eq!(h.app.help_scroll_offset, 1);

        handle_input(&mut h.app, key(KeyCode::Esc)).unwrap();
        assert!(!h.app.show_help);
        assert_eq!(h.app.help_scroll_offset, 0);
    }

    #[test]
    fn test_palette_enter_runs_command_and_closes() {
        let mut h = harness();
        h.app.open_palette();
        for c in "queue".chars() {
            handle_input(&mut h.app, key(KeyCode::Char(c))).unwrap();
        }
        handle_input(&mut h.app, key(KeyCode::Enter)).unwrap();

        assert!(!h.app.palette.is_open());
        assert_eq!(
            h.events.try_recv().ok(),
            Some(AppEvent::Navigate(Screen::Queue))
        );
    }

    #[test]
    fn test_palette_captures_shortcut_keys() {
        let mut h = harness();
        h.app.open_palette();
        handle_input(&mut h.app, key(KeyCode::Char('?'))).unwrap();

        assert!(h.signals.try_recv().is_err());
        assert_eq!(h.app.palette.query(), "?");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut h = harness();
        assert_eq!(handle_input(&mut h.app, ctrl('c')).unwrap(), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_while_filter_focused() {
        let mut h = harness();
        h.app.navigate(Screen::Library);
        h.app.filter_focused = true;
        h.app.library_filter = "rust".to_string();

        assert_eq!(handle_input(&mut h.app, ctrl('c')).unwrap(), Action::Quit);
        assert_eq!(h.app.library_filter, "rust");
    }

    #[test]
    fn test_help_overlay_toggles_active_view() {
        let mut h = harness();
        h.app.show_help = true;
        h.app.help_scroll_offset = 2;
        assert_eq!(h.app.help_filter, HelpFilter::All);

        handle_input(&mut h.app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(h.app.help_filter, HelpFilter::Active);
        assert_eq!(h.app.help_scroll_offset, 0);
        assert!(h.app.show_help);

        handle_input(&mut h.app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(h.app.help_filter, HelpFilter::All);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut h = harness();
        let mut release = ctrl('k');
        release.kind = KeyEventKind::Release;
        handle_input(&mut h.app, release).unwrap();
        assert!(h.signals.try_recv().is_err());
    }
}
