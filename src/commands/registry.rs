//! Command registry: the ordered list a palette session searches.
use std::fmt;

use crate::action::Action;

use super::search;

/// Palette section a command is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCategory {
    Navigation,
    Actions,
    Settings,
    Help,
}

impl CommandCategory {
    /// Lower-case name, also matched by search queries.
    pub fn name(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Actions => "actions",
            Self::Settings => "settings",
            Self::Help => "help",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Actions => "Actions",
            Self::Settings => "Settings",
            Self::Help => "Help",
        }
    }
}

/// A palette entry.
#[derive(Clone)]
pub struct CommandDefinition {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: CommandCategory,
    /// Extra search terms beyond title and description.
    pub keywords: Vec<String>,
    /// Accelerator hint shown next to the title. Display only.
    pub shortcut: Option<String>,
    pub action: Action,
}

impl CommandDefinition {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: CommandCategory,
        action: Action,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category,
            keywords: Vec::new(),
            shortcut: None,
            action,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("keywords", &self.keywords)
            .field("shortcut", &self.shortcut)
            .finish_non_exhaustive()
    }
}

/// Ordered command list for one palette session.
///
/// Ids are not deduplicated: adding two commands with the same id lists
/// both.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDefinition>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: CommandDefinition) {
        self.commands.push(command);
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, command: CommandDefinition) -> Self {
        self.add(command);
        self
    }

    pub fn get(&self, index: usize) -> Option<&CommandDefinition> {
        self.commands.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[CommandDefinition] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands matching `query`, in registry order.
    pub fn search(&self, query: &str) -> Vec<&CommandDefinition> {
        search::filter(&self.commands, query)
            .into_iter()
            .map(|i| &self.commands[i])
            .collect()
    }
}

impl FromIterator<CommandDefinition> for CommandRegistry {
    fn from_iter<T: IntoIterator<Item = CommandDefinition>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
