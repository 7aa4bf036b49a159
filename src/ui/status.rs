use crate::app::App;
use crate::screens::Screen;
use crate::shortcuts::{HELP_SHORTCUT_ID, SEARCH_SHORTCUT_ID};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Borrow the status message instead of cloning
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_str())
    } else if app.filter_focused && app.screen == Screen::Library {
        Cow::Borrowed("Type to filter | ESC clear | ENTER done")
    } else {
        Cow::Owned(shortcut_hints(app))
    };

    let style = Style::default().bg(Color::DarkGray).fg(Color::White);

    let paragraph = Paragraph::new(text).style(style);
    f.render_widget(paragraph, area);
}

/// Hint line built from the live bindings, so rebinds show up here too.
fn shortcut_hints(app: &App) -> String {
    let mut hints = Vec::new();
    if let Some(keys) = app.shortcut_hint(SEARCH_SHORTCUT_ID) {
        hints.push(format!("[{}] commands", keys));
    }
    if let Some(keys) = app.shortcut_hint(HELP_SHORTCUT_ID) {
        hints.push(format!("[{}] shortcuts", keys));
    }
    if let Some(keys) = app.shortcut_hint("quit") {
        hints.push(format!("[{}] quit", keys));
    }
    hints.join(" ")
}
