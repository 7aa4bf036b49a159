//! Help overlay projection: registry contents grouped by category.
//!
//! Read-only. Whether the overlay is visible is the host's business.
use super::format::{format_keys, KeyStyle};
use super::registry::{ShortcutCategory, ShortcutRegistry};

/// Which definitions the projection includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpFilter {
    All,
    /// Omit disabled definitions.
    Active,
}

impl HelpFilter {
    /// The other view; flipped from the help overlay.
    pub fn toggled(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
        }
    }
}

/// One row of the help table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRow {
    pub id: String,
    pub description: String,
    /// Keys rendered with the requested [`KeyStyle`].
    pub keys: String,
    pub enabled: bool,
}

/// Rows sharing one category, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub category: ShortcutCategory,
    pub rows: Vec<HelpRow>,
}

/// Group the registry by category.
///
/// Sections appear in the order their category is first seen while
/// scanning the registry; rows keep registration order within a section.
pub fn help_sections(
    registry: &ShortcutRegistry,
    style: KeyStyle,
    filter: HelpFilter,
) -> Vec<HelpSection> {
    let mut sections: Vec<HelpSection> = Vec::new();

    for definition in registry.iter() {
        if filter == HelpFilter::Active && !definition.enabled {
            continue;
        }

        let row = HelpRow {
            id: definition.id.clone(),
            description: definition.description.clone(),
            keys: format_keys(&definition.keys, style),
            enabled: definition.enabled,
        };

        match sections
            .iter_mut()
            .find(|s| s.category == definition.category)
        {
            Some(section) => section.rows.push(row),
            None => sections.push(HelpSection {
                category: definition.category,
                rows: vec![row],
            }),
        }
    }

    sections
}
