//! Render functions for the TUI.
//!
//! Draws the screen tabs, the attached screen's body and the status bar,
//! then any overlay (help or palette) on top.

use crate::app::App;
use crate::screens::Screen;
use crate::shortcuts::format_keys;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use super::{help, palette, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(f, app, chunks[0]);
    render_screen(f, app, chunks[1]);
    status::render(f, app, chunks[2]);

    if app.show_help {
        help::render(f, app);
    }
    palette::render(f, app);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .map(|screen| match app.shortcut_hint(screen.nav_shortcut_id()) {
            Some(keys) => Line::from(format!("{} {}", screen.title(), keys)),
            None => Line::from(screen.title()),
        })
        .collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" keydeck "))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.screen.title()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let summary = Paragraph::new(app.screen.summary()).style(Style::default().fg(Color::Gray));
    f.render_widget(summary, chunks[0]);

    match app.screen {
        Screen::Library => render_library(f, app, chunks[1]),
        Screen::Settings => render_settings(f, app, chunks[1]),
        Screen::Dashboard | Screen::Queue => render_local_shortcuts(f, app, chunks[1]),
    }
}

/// Filter field plus the items that pass it.
fn render_library(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let filter_style = if app.filter_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let filter_title = match app.shortcut_hint("library-filter") {
        Some(keys) => format!(" Filter ({}) ", keys),
        None => " Filter ".to_string(),
    };
    let filter = Paragraph::new(app.library_filter.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(filter_style)
            .title(filter_title),
    );
    f.render_widget(filter, chunks[0]);

    let items: Vec<ListItem> = app
        .visible_library_items()
        .into_iter()
        .map(ListItem::new)
        .collect();
    if items.is_empty() {
        f.render_widget(
            Paragraph::new("No items match").style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
    } else {
        f.render_widget(List::new(items), chunks[1]);
    }
}

fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::raw("Key style: "),
        Span::styled(
            app.key_style.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])];
    lines.push(Line::from(""));
    lines.extend(local_shortcut_lines(app));
    f.render_widget(Paragraph::new(lines), area);
}

fn render_local_shortcuts(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(Paragraph::new(local_shortcut_lines(app)), area);
}

/// One line per shortcut contributed by the attached screen.
fn local_shortcut_lines(app: &App) -> Vec<Line<'static>> {
    app.screen
        .local_shortcut_ids()
        .iter()
        .filter_map(|id| app.registry.get(id))
        .map(|definition| {
            let keys = format_keys(&definition.keys, app.key_style);
            let (key_style, text_style) = if definition.enabled {
                (Style::default().fg(Color::Yellow), Style::default())
            } else {
                let dim = Style::default().fg(Color::DarkGray);
                (dim, dim)
            };
            Line::from(vec![
                Span::styled(format!("{:>10}  ", keys), key_style),
                Span::styled(definition.description.clone(), text_style),
            ])
        })
        .collect()
}
