//! Application state for the terminal shell.
//!
//! `App` is the root composition: it owns the shortcut registry, the
//! dispatcher, the palette controller and the attached screen, and it builds
//! the palette's command list on each open.
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::action::{action, noop, Action};
use crate::commands::{CommandCategory, CommandDefinition, CommandPalette, CommandRegistry};
use crate::config::Config;
use crate::screens::Screen;
use crate::shortcuts::{
    format_keys, HelpFilter, InputTarget, KeyStyle, Platform, ShortcutCategory, ShortcutDefinition,
    ShortcutDispatcher, ShortcutRegistry, HELP_SHORTCUT_ID, SEARCH_SHORTCUT_ID,
};
use crate::signal::SignalSender;

// ============================================================================
// App Events
// ============================================================================

/// Effects requested by shortcut and command actions, applied by the event
/// loop after the action returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Navigate(Screen),
    Status(String),
    FocusFilter,
    ToggleKeyStyle,
    Quit,
}

pub type AppEventSender = mpsc::UnboundedSender<AppEvent>;

/// Post an event, failing if the loop has gone away.
pub fn emit(events: &AppEventSender, event: AppEvent) -> anyhow::Result<()> {
    events
        .send(event)
        .map_err(|e| anyhow::anyhow!("App event channel closed, dropped {:?}", e.0))
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub screen: Screen,
    pub registry: ShortcutRegistry,
    pub dispatcher: ShortcutDispatcher,
    pub palette: CommandPalette,
    pub signals: SignalSender,
    pub events: AppEventSender,
    pub key_style: KeyStyle,

    pub show_help: bool,
    pub help_scroll_offset: usize,
    /// Whether the help overlay lists disabled shortcuts.
    pub help_filter: HelpFilter,

    /// Library filter text field.
    pub library_filter: String,
    pub filter_focused: bool,

    pub status_message: Option<(String, Instant)>,
    pub status_timeout: Duration,

    pub needs_redraw: bool,
}

impl App {
    /// Build the shell: register global shortcuts, apply config overrides and
    /// attach the dashboard.
    pub fn new(config: &Config, signals: SignalSender, events: AppEventSender) -> Self {
        let mut app = Self {
            screen: Screen::Dashboard,
            registry: ShortcutRegistry::new(),
            dispatcher: ShortcutDispatcher::new(signals.clone()),
            palette: CommandPalette::new(),
            signals,
            events,
            key_style: config.key_style.resolve(Platform::current()),
            show_help: false,
            help_scroll_offset: 0,
            help_filter: HelpFilter::All,
            library_filter: String::new(),
            filter_focused: false,
            status_message: None,
            status_timeout: Duration::from_secs(config.status_timeout_secs),
            needs_redraw: true,
        };

        let warnings = app.registry.apply_overrides(&config.shortcuts);
        for warning in &warnings {
            tracing::warn!(%warning, "Shortcut override rejected");
        }
        if let Some(first) = warnings.first() {
            app.set_status(first.clone());
        }
        app.registry.disable_ids(config.disabled.iter().cloned());

        app.register_global_shortcuts();
        app.screen.attach(&mut app.registry, &app.events);
        app
    }

    fn register_global_shortcuts(&mut self) {
        self.registry.register(ShortcutDefinition::new(
            HELP_SHORTCUT_ID,
            ["?"],
            "Show keyboard shortcuts",
            ShortcutCategory::General,
            noop(),
        ));
        self.registry.register(ShortcutDefinition::new(
            SEARCH_SHORTCUT_ID,
            ["Cmd", "K"],
            "Open command palette",
            ShortcutCategory::Search,
            noop(),
        ));
        for screen in Screen::ALL {
            self.registry.register(ShortcutDefinition::new(
                screen.nav_shortcut_id(),
                screen.nav_keys(),
                format!("Go to {}", screen.title()),
                ShortcutCategory::Navigation,
                self.post(AppEvent::Navigate(screen)),
            ));
        }
        self.registry.register(ShortcutDefinition::new(
            "quit",
            ["Cmd", "Q"],
            "Quit",
            ShortcutCategory::General,
            self.post(AppEvent::Quit),
        ));
    }

    /// Action that posts a clone of `event` to the app channel.
    fn post(&self, event: AppEvent) -> Action {
        let tx = self.events.clone();
        action(move || emit(&tx, event.clone()))
    }

    /// Swap the attached screen, moving its shortcuts in and out of the
    /// registry.
    pub fn navigate(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        self.screen.detach(&mut self.registry);
        self.filter_focused = false;
        self.screen = screen;
        self.screen.attach(&mut self.registry, &self.events);
        tracing::info!(screen = screen.title(), "Navigated");
    }

    /// Kind of surface that currently receives typed keys.
    pub fn input_target(&self) -> InputTarget {
        if self.screen == Screen::Library && self.filter_focused {
            InputTarget::Editable
        } else {
            InputTarget::Other
        }
    }

    /// Library items passing the current filter.
    pub fn visible_library_items(&self) -> Vec<&'static str> {
        let needle = self.library_filter.to_lowercase();
        crate::screens::LIBRARY_ITEMS
            .iter()
            .copied()
            .filter(|item| item.to_lowercase().contains(&needle))
            .collect()
    }

    /// Display hint for a registered shortcut, reflecting user overrides.
    pub fn shortcut_hint(&self, id: &str) -> Option<String> {
        self.registry
            .get(id)
            .filter(|d| d.enabled)
            .map(|d| format_keys(&d.keys, self.key_style))
    }

    /// Command list for a new palette session.
    pub fn build_commands(&self) -> CommandRegistry {
        let mut commands = CommandRegistry::new();

        for screen in Screen::ALL {
            let mut command = CommandDefinition::new(
                screen.nav_shortcut_id(),
                format!("Go to {}", screen.title()),
                CommandCategory::Navigation,
                self.post(AppEvent::Navigate(screen)),
            )
            .with_description(screen.summary())
            .with_keywords(screen.keywords().iter().copied());
            if let Some(hint) = self.shortcut_hint(screen.nav_shortcut_id()) {
                command = command.with_shortcut(hint);
            }
            commands.add(command);
        }

        commands.add(
            CommandDefinition::new(
                "refresh-dashboard",
                "Refresh dashboard",
                CommandCategory::Actions,
                self.post(AppEvent::Status("Refreshing dashboard...".to_string())),
            )
            .with_keywords(["reload", "sync"]),
        );
        commands.add(
            CommandDefinition::new(
                "export-library",
                "Export library selection",
                CommandCategory::Actions,
                self.post(AppEvent::Status("Export queued".to_string())),
            )
            .with_description("Write selected items to Markdown")
            .with_keywords(["markdown", "save"]),
        );
        commands.add(
            CommandDefinition::new(
                "retry-queue",
                "Retry failed jobs",
                CommandCategory::Actions,
                self.post(AppEvent::Status("Retrying failed jobs...".to_string())),
            )
            .with_keywords(["scrape", "jobs"]),
        );
        commands.add(
            CommandDefinition::new(
                "toggle-key-style",
                "Toggle key display style",
                CommandCategory::Settings,
                self.post(AppEvent::ToggleKeyStyle),
            )
            .with_description("Switch between dense symbols and '+' separated keys")
            .with_keywords(["shortcut", "symbols", "display"]),
        );

        let signals = self.signals.clone();
        let mut help = CommandDefinition::new(
            "show-help",
            "Show keyboard shortcuts",
            CommandCategory::Help,
            action(move || {
                signals.request_open_help();
                Ok(())
            }),
        )
        .with_keywords(["keys", "bindings", "cheatsheet"]);
        if let Some(hint) = self.shortcut_hint(HELP_SHORTCUT_ID) {
            help = help.with_shortcut(hint);
        }
        commands.add(help);

        let mut quit = CommandDefinition::new(
            "quit",
            "Quit keydeck",
            CommandCategory::Actions,
            self.post(AppEvent::Quit),
        )
        .with_keywords(["exit", "close"]);
        if let Some(hint) = self.shortcut_hint("quit") {
            quit = quit.with_shortcut(hint);
        }
        commands.add(quit);

        commands
    }

    /// Open the palette with a freshly built command list.
    pub fn open_palette(&mut self) {
        let commands = self.build_commands();
        self.palette.open(commands);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired.
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= self.status_timeout {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
