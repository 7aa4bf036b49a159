//! Signal and app event processing for the TUI.
//!
//! Signals come from the dispatcher and from actions that want the palette
//! or help overlay; app events carry the effects of shortcut and command
//! actions back into the loop that owns `App`.

use crate::app::{App, AppEvent};
use crate::screens::Screen;
use crate::signal::Signal;

use super::Action;

/// Apply a shell signal.
pub fn handle_signal(app: &mut App, signal: Signal) {
    tracing::debug!(?signal, "Signal received");
    match signal {
        Signal::OpenPalette => {
            app.show_help = false;
            app.open_palette();
        }
        Signal::ClosePalette => {
            app.palette.close();
        }
        Signal::OpenHelp => {
            app.palette.close();
            app.help_scroll_offset = 0;
            app.show_help = true;
        }
    }
}

/// Apply an app event. Returns [`Action::Quit`] when the shell should exit.
pub fn handle_app_event(app: &mut App, event: AppEvent) -> Action {
    match event {
        AppEvent::Navigate(screen) => app.navigate(screen),
        AppEvent::Status(msg) => app.set_status(msg),
        AppEvent::FocusFilter => {
            app.navigate(Screen::Library);
            app.filter_focused = true;
        }
        AppEvent::ToggleKeyStyle => {
            app.key_style = app.key_style.toggled();
            app.set_status(format!("Key style: {}", app.key_style.label()));
        }
        AppEvent::Quit => return Action::Quit,
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::shortcuts::KeyStyle;
    use crate::signal::signal_channel;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (signals, _rx) = signal_channel();
        let (events, _event_rx) = mpsc::unbounded_channel();
        App::new(&Config::default(), signals, events)
    }

    #[test]
    fn test_open_and_close_palette() {
        let mut app = test_app();
        handle_signal(&mut app, Signal::OpenPalette);
        assert!(app.palette.is_open());
        assert_eq!(app.palette.query(), "");

        handle_signal(&mut app, Signal::ClosePalette);
        assert!(!app.palette.is_open());
    }

    #[test]
    fn test_open_help_closes_palette() {
        let mut app = test_app();
        handle_signal(&mut app, Signal::OpenPalette);
        handle_signal(&mut app, Signal::OpenHelp);
        assert!(app.show_help);
        assert!(!app.palette.is_open());
    }

    #[test]
    fn test_navigate_event() {
        let mut app = test_app();
        assert_eq!(
            handle_app_event(&mut app, AppEvent::Navigate(Screen::Settings)),
            Action::Continue
        );
        assert_eq!(app.screen, Screen::Settings);
        assert!(app.registry.contains("settings-key-style"));
    }

    #[test]
    fn test_focus_filter_moves_to_library() {
        let mut app = test_app();
        handle_app_event(&mut app, AppEvent::FocusFilter);
        assert_eq!(app.screen, Screen::Library);
        assert!(app.filter_focused);
    }

    #[test]
    fn test_toggle_key_style() {
        let mut app = test_app();
        app.key_style = KeyStyle::Text;
        handle_app_event(&mut app, AppEvent::ToggleKeyStyle);
        assert_eq!(app.key_style, KeyStyle::Symbols);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "Key style: symbols");
    }

    #[test]
    fn test_quit_event() {
        let mut app = test_app();
        assert_eq!(handle_app_event(&mut app, AppEvent::Quit), Action::Quit);
    }
}
