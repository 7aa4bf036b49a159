//! Command palette overlay: query line plus grouped results.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::help::centered_rect;
use super::text::{justify, truncate_to_width};

/// Render the palette on top of the current screen. No-op while closed.
pub fn render(f: &mut Frame, app: &App) {
    if !app.palette.is_open() {
        return;
    }

    let overlay = centered_rect(60, 60, f.area());
    if overlay.width < 24 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Commands ");
    let inner = block.inner(overlay);
    f.render_widget(block, overlay);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let width = inner.width as usize;
    let query = Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Yellow)),
        Span::raw(truncate_to_width(app.palette.query(), width.saturating_sub(3))),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    f.render_widget(Paragraph::new(query), chunks[0]);

    let (lines, selected_line) = result_lines(app, width);
    if lines.is_empty() {
        let empty = Paragraph::new("No matching commands").style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, chunks[1]);
        return;
    }

    // Keep the selected row on screen
    let height = chunks[1].height as usize;
    let offset = selected_line.map_or(0, |line| line.saturating_sub(height.saturating_sub(1)));
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
    f.render_widget(Paragraph::new(visible), chunks[1]);
}

/// Section headers and command rows, plus the line index of the selection.
fn result_lines(app: &App, width: usize) -> (Vec<Line<'static>>, Option<usize>) {
    let selected = app.palette.selected_index();
    let mut lines = Vec::new();
    let mut selected_line = None;

    for group in app.palette.groups() {
        lines.push(Line::from(Span::styled(
            group.category.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        for (position, command) in group.rows {
            let hint = command.shortcut.as_deref().unwrap_or("");
            let text = justify(&format!("  {}", command.title), hint, width);
            let style = if position == selected {
                selected_line = Some(lines.len());
                Style::default()
                    .bg(Color::Yellow)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }
    }

    (lines, selected_line)
}
