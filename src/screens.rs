//! Curation screens hosted by the shell.
//!
//! Each screen contributes a handful of shortcuts while it is attached.
//! `attach` registers them and `detach` removes them again, so the registry
//! always reflects the screen currently on display.
use crate::action::{action, Action};
use crate::app::{emit, AppEvent, AppEventSender};
use crate::shortcuts::{ShortcutCategory, ShortcutDefinition, ShortcutRegistry};

/// Sample library entries shown (and filtered) on the Library screen.
pub const LIBRARY_ITEMS: &[&str] = &[
    "Async Rust field notes",
    "Curating reading lists at scale",
    "Feed scraping etiquette",
    "Offline-first sync patterns",
    "Chunking long-form articles",
    "Library cataloguing basics",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Dashboard,
    Library,
    Queue,
    Settings,
}

impl Screen {
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Library, Self::Queue, Self::Settings];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Library => "Library",
            Self::Queue => "Queue",
            Self::Settings => "Settings",
        }
    }

    /// Body text shown under the screen title.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Dashboard => "Collection health, sync status and recent activity.",
            Self::Library => "Saved sources and curated items.",
            Self::Queue => "Pending scrape and export jobs.",
            Self::Settings => "Display and shortcut preferences.",
        }
    }

    /// Id of the global shortcut that navigates here.
    pub fn nav_shortcut_id(self) -> &'static str {
        match self {
            Self::Dashboard => "nav-dashboard",
            Self::Library => "nav-library",
            Self::Queue => "nav-queue",
            Self::Settings => "nav-settings",
        }
    }

    pub fn nav_keys(self) -> [&'static str; 2] {
        match self {
            Self::Dashboard => ["Alt", "1"],
            Self::Library => ["Alt", "2"],
            Self::Queue => ["Alt", "3"],
            Self::Settings => ["Alt", "4"],
        }
    }

    /// Extra search terms for this screen's palette entry.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Dashboard => &["home", "overview", "stats"],
            Self::Library => &["library", "books", "catalog"],
            Self::Queue => &["jobs", "scrape", "pending"],
            Self::Settings => &["preferences", "config"],
        }
    }

    /// Ids of the shortcuts this screen registers while attached.
    pub fn local_shortcut_ids(self) -> &'static [&'static str] {
        match self {
            Self::Dashboard => &["dashboard-refresh"],
            Self::Library => &["library-filter", "library-export"],
            Self::Queue => &["queue-retry", "queue-pause"],
            Self::Settings => &["settings-key-style"],
        }
    }

    /// Shortcuts contributed while this screen is attached.
    pub fn shortcuts(self, events: &AppEventSender) -> Vec<ShortcutDefinition> {
        let status = |msg: &'static str| send(events, move || AppEvent::Status(msg.to_string()));

        match self {
            Self::Dashboard => vec![ShortcutDefinition::new(
                "dashboard-refresh",
                ["Cmd", "R"],
                "Refresh dashboard stats",
                ShortcutCategory::Actions,
                status("Refreshing dashboard..."),
            )],
            Self::Library => vec![
                ShortcutDefinition::new(
                    "library-filter",
                    ["Cmd", "F"],
                    "Filter library",
                    ShortcutCategory::Search,
                    send(events, || AppEvent::FocusFilter),
                ),
                ShortcutDefinition::new(
                    "library-export",
                    ["Cmd", "E"],
                    "Export library selection",
                    ShortcutCategory::Actions,
                    status("Export queued"),
                ),
            ],
            Self::Queue => vec![
                ShortcutDefinition::new(
                    "queue-retry",
                    ["Cmd", "R"],
                    "Retry failed jobs",
                    ShortcutCategory::Actions,
                    status("Retrying failed jobs..."),
                ),
                ShortcutDefinition::new(
                    "queue-pause",
                    ["Cmd", "Shift", "P"],
                    "Pause scraping queue",
                    ShortcutCategory::Actions,
                    status("Queue paused"),
                ),
            ],
            Self::Settings => vec![ShortcutDefinition::new(
                "settings-key-style",
                ["Cmd", "T"],
                "Toggle key display style",
                ShortcutCategory::General,
                send(events, || AppEvent::ToggleKeyStyle),
            )],
        }
    }

    pub fn attach(self, registry: &mut ShortcutRegistry, events: &AppEventSender) {
        tracing::debug!(screen = self.title(), "Attaching screen");
        for definition in self.shortcuts(events) {
            registry.register(definition);
        }
    }

    pub fn detach(self, registry: &mut ShortcutRegistry) {
        tracing::debug!(screen = self.title(), "Detaching screen");
        for id in self.local_shortcut_ids() {
            registry.unregister(id);
        }
    }
}

/// Action that posts the event built by `make` to the app channel.
fn send<F>(events: &AppEventSender, make: F) -> Action
where
    F: Fn() -> AppEvent + Send + Sync + 'static,
{
    let tx = events.clone();
    action(move || emit(&tx, make()))
}
