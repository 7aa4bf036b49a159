//! Main event loop for the TUI.
//!
//! This module contains the core event loop that multiplexes terminal input,
//! shell signals, app events and periodic ticks.

use crate::app::{App, AppEvent};
use crate::signal::Signal;
use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

use super::events::{handle_app_event, handle_signal};
use super::input::handle_input;
use super::render::render;

/// Result of handling an input or app event.
///
/// Signals whether the application should continue running or terminate
/// gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex four event sources:
/// - **Signals**: palette/help requests raised through the signal channel
/// - **App events**: effects posted by shortcut and command actions
/// - **Terminal input**: key presses from crossterm's async event stream
/// - **Periodic tick**: 250ms timer for status expiry
///
/// An error returned by a shortcut or palette action ends up in the status
/// bar; it does not stop the loop.
pub async fn run(
    app: &mut App,
    mut signal_rx: mpsc::UnboundedReceiver<Signal>,
    mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    loop {
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        tokio::select! {
            biased;

            Some(signal) = signal_rx.recv() => {
                app.needs_redraw = true;
                handle_signal(app, signal);
            }

            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                if handle_app_event(app, event) == Action::Quit {
                    break;
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app.needs_redraw = true;
                        match handle_input(app, key) {
                            Ok(Action::Quit) => break,
                            Ok(Action::Continue) => {}
                            Err(e) => app.set_status(format!("Error: {}", e)),
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => app.needs_redraw = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event stream error");
                    }
                    None => break,
                }
            }

            _ = tick_interval.tick() => {}
        }
    }

    restore_terminal(&mut terminal)?;
    // Restore the original hook now that the terminal is back to normal
    let _ = std::panic::take_hook();
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
