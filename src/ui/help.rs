//! Help overlay: scrollable shortcut table.
//!
//! Renders a centered overlay listing every registered shortcut grouped by
//! category. Shows live bindings, including user overrides from config.
//! The `all` view dims disabled entries; the `active` view hides them.

use crate::app::App;
use crate::shortcuts::help_sections;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Render the help overlay on top of the current screen.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Leave a margin around the overlay
    let overlay = centered_rect(80, 80, area);
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let mut rows: Vec<Row> = Vec::new();

    for section in help_sections(&app.registry, app.key_style, app.help_filter) {
        // Section header row
        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", section.category.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(Style::default().fg(Color::Cyan)),
        );

        for row in section.rows {
            let style = if row.enabled {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let description = if row.enabled {
                row.description
            } else {
                format!("{} (disabled)", row.description)
            };
            rows.push(Row::new(vec![format!("  {}", row.keys), description]).style(style));
        }

        // Blank separator between groups
        rows.push(Row::new(vec![String::new(), String::new()]));
    }

    // Remove trailing blank row if present
    rows.pop();

    let total_rows = rows.len();

    // -2 border -2 header with margin
    let visible_height = overlay.height.saturating_sub(4) as usize;
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(
            " Shortcuts: {} ({}/{}) ",
            app.help_filter.label(),
            scroll.saturating_add(1),
            max_scroll.saturating_add(1)
        )
    } else {
        format!(
            " Shortcuts: {} (a to switch, ? to close) ",
            app.help_filter.label()
        )
    };

    let widths = [Constraint::Length(16), Constraint::Min(20)];

    let table = Table::new(visible_rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        )
        .header(
            Row::new(vec!["Keys", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        );

    f.render_widget(table, overlay);

    // Scroll hint at bottom if content overflows
    if max_scroll > 0 && scroll < max_scroll {
        let hint = Line::from(vec![Span::styled(
            " j/k to scroll, a to switch view, ? or Esc to close ",
            Style::default().fg(Color::DarkGray),
        )]);
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
