//! Shortcut registry: id → definition, in registration order.
//!
//! The registry is owned by the root composition and handed to screens in
//! their attach/detach hooks. Entries live in a `Vec` for a stable scan order
//! with a `HashMap` index for O(1) lookup by id.
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::action::Action;

use super::keys::{parse_key_string, KeyChord};

// ============================================================================
// Category
// ============================================================================

/// Grouping used by the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    Navigation,
    Actions,
    Search,
    General,
}

impl ShortcutCategory {
    pub const ALL: [Self; 4] = [Self::Navigation, Self::Actions, Self::Search, Self::General];

    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Actions => "Actions",
            Self::Search => "Search",
            Self::General => "General",
        }
    }
}

// ============================================================================
// Definition
// ============================================================================

/// A shortcut: key combination, help label, category and action.
#[derive(Clone)]
pub struct ShortcutDefinition {
    pub id: String,
    /// Key tokens as written, e.g. `["Cmd", "Shift", "D"]`. Order is kept for
    /// display; matching treats them as a set.
    pub keys: Vec<String>,
    pub description: String,
    pub category: ShortcutCategory,
    pub action: Action,
    /// Non-global shortcuts are registered but never matched.
    pub global: bool,
    pub enabled: bool,
}

impl ShortcutDefinition {
    /// A global, enabled shortcut.
    pub fn new<I, S>(
        id: impl Into<String>,
        keys: I,
        description: impl Into<String>,
        category: ShortcutCategory,
        action: Action,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            keys: keys.into_iter().map(Into::into).collect(),
            description: description.into(),
            category,
            action,
            global: true,
            enabled: true,
        }
    }

    /// Mark as scoped (not global); the dispatcher will skip it.
    pub fn scoped(mut self) -> Self {
        self.global = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Canonical key set used for matching.
    pub fn chord(&self) -> KeyChord {
        KeyChord::from_tokens(&self.keys)
    }

    fn matches(&self, chord: &KeyChord) -> bool {
        self.enabled && self.global && !self.keys.is_empty() && self.chord() == *chord
    }
}

impl fmt::Debug for ShortcutDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutDefinition")
            .field("id", &self.id)
            .field("keys", &self.keys)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("global", &self.global)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Live table of shortcut definitions.
///
/// At most one definition exists per id. Re-registering an id replaces the
/// previous definition in place, keeping its scan position.
#[derive(Default)]
pub struct ShortcutRegistry {
    entries: Vec<ShortcutDefinition>,
    index: HashMap<String, usize>,
    /// User key overrides by id, applied whenever that id is registered.
    overrides: HashMap<String, Vec<String>>,
    /// Ids forced disabled by config.
    forced_disabled: HashSet<String>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, replacing any existing one with the same id.
    pub fn register(&mut self, mut definition: ShortcutDefinition) {
        if let Some(keys) = self.overrides.get(&definition.id) {
            definition.keys = keys.clone();
        }
        if self.forced_disabled.contains(&definition.id) {
            definition.enabled = false;
        }

        if let Some(&pos) = self.index.get(&definition.id) {
            tracing::debug!(
                id = %definition.id,
                keys = ?definition.keys,
                "Replacing shortcut"
            );
            self.entries[pos] = definition;
        } else {
            tracing::debug!(
                id = %definition.id,
                keys = ?definition.keys,
                "Registering shortcut"
            );
            self.index.insert(definition.id.clone(), self.entries.len());
            self.entries.push(definition);
        }
    }

    /// Remove a definition. Returns whether anything was removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(pos) = self.index.remove(id) else {
            return false;
        };
        self.entries.remove(pos);
        for (i, entry) in self.entries.iter().enumerate().skip(pos) {
            self.index.insert(entry.id.clone(), i);
        }
        tracing::debug!(id = %id, "Unregistered shortcut");
        true
    }

    /// Enable or disable without removing. Returns whether `id` was found.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.index.get(id) {
            Some(&pos) => {
                self.entries[pos].enabled = enabled;
                tracing::debug!(id = %id, enabled, "Toggled shortcut");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ShortcutDefinition> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ShortcutDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First enabled, global definition whose key set equals `chord`.
    ///
    /// Definitions with no keys never match.
    pub fn find_match(&self, chord: &KeyChord) -> Option<&ShortcutDefinition> {
        if chord.is_empty() {
            return None;
        }
        self.entries.iter().find(|d| d.matches(chord))
    }

    /// Apply user key overrides from config.
    ///
    /// Keys in the map are shortcut ids; values are key strings such as
    /// `"Cmd+Shift+D"`. Overrides apply to registered definitions now and to
    /// any later registration of the same id.
    ///
    /// Returns a list of warnings for unparseable key strings.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut ids: Vec<&String> = overrides.keys().collect();
        ids.sort();

        for id in ids {
            let key_str = &overrides[id];
            let keys = match parse_key_string(key_str) {
                Ok(keys) => keys,
                Err(e) => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for shortcut '{}': {}, ignoring",
                        key_str, id, e
                    ));
                    continue;
                }
            };

            if let Some(&pos) = self.index.get(id.as_str()) {
                self.entries[pos].keys = keys.clone();
            }
            self.overrides.insert(id.clone(), keys);

            tracing::info!(id = %id, key = %key_str, "Applied shortcut override");
        }

        warnings
    }

    /// Force the given ids disabled, now and on every later registration.
    pub fn disable_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if let Some(&pos) = self.index.get(&id) {
                self.entries[pos].enabled = false;
            }
            tracing::debug!(id = %id, "Shortcut disabled by config");
            self.forced_disabled.insert(id);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
