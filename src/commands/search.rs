//! Command search: case-insensitive substring filter plus category grouping.
//!
//! No scoring. Results keep registry order so the flat list and the grouped
//! view index the same commands.
use super::registry::{CommandCategory, CommandDefinition};

/// Whether `command` matches an already lower-cased, non-empty needle.
fn command_matches(command: &CommandDefinition, needle: &str) -> bool {
    command.title.to_lowercase().contains(needle)
        || command
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || command
            .keywords
            .iter()
            .any(|k| k.to_lowercase().contains(needle))
        || command.category.name().contains(needle)
}

/// Indices of the commands matching `query`, in original order.
///
/// An empty or whitespace-only query matches everything. Otherwise the
/// lower-cased query must be a substring of the title, the description, a
/// keyword or the category name.
pub fn filter(commands: &[CommandDefinition], query: &str) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..commands.len()).collect();
    }

    let needle = query.to_lowercase();
    commands
        .iter()
        .enumerate()
        .filter(|(_, c)| command_matches(c, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// One section of the grouped palette view.
#[derive(Debug, Clone)]
pub struct CommandGroup<'a> {
    pub category: CommandCategory,
    /// `(flat position, command)` pairs; the flat position is the command's
    /// index in the ungrouped result list, i.e. the selection index space.
    pub rows: Vec<(usize, &'a CommandDefinition)>,
}

/// Partition flat results by category, sections in first-seen order.
pub fn group_by_category<'a>(results: &[&'a CommandDefinition]) -> Vec<CommandGroup<'a>> {
    let mut groups: Vec<CommandGroup<'a>> = Vec::new();

    for (position, &command) in results.iter().enumerate() {
        match groups.iter_mut().find(|g| g.category == command.category) {
            Some(group) => group.rows.push((position, command)),
            None => groups.push(CommandGroup {
                category: command.category,
                rows: vec![(position, command)],
            }),
        }
    }

    groups
}
