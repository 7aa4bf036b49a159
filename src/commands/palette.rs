//! Command palette controller: the state of one open search session.
//!
//! Two states, closed and open. Opening starts a fresh session over the
//! command list built for it; closing drops the session along with its query
//! and selection, so every reopen starts from an empty query at index 0.
//!
//! Committing runs the selected command's action but leaves the palette
//! open. Closing afterwards is up to the caller.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::registry::{CommandDefinition, CommandRegistry};
use super::search::{self, CommandGroup};

/// Result of feeding one key to the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutcome {
    /// Palette closed, or the key means nothing here.
    Ignored,
    /// Query or selection changed.
    Updated,
    /// The selected command's action ran.
    Executed { id: String },
    /// Escape closed the palette.
    Closed,
}

struct PaletteSession {
    commands: CommandRegistry,
    query: String,
    /// Indices into `commands`, the flat filtered list.
    results: Vec<usize>,
    selected: usize,
}

impl PaletteSession {
    fn new(commands: CommandRegistry) -> Self {
        let results = search::filter(commands.as_slice(), "");
        Self {
            commands,
            query: String::new(),
            results,
            selected: 0,
        }
    }

    fn refilter(&mut self) {
        self.results = search::filter(self.commands.as_slice(), &self.query);
        self.selected = 0;
    }
}

/// Palette state machine.
#[derive(Default)]
pub struct CommandPalette {
    session: Option<PaletteSession>,
}

impl CommandPalette {
    /// A closed palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a fresh session over `commands`.
    ///
    /// Opening an already open palette restarts the session.
    pub fn open(&mut self, commands: CommandRegistry) {
        tracing::debug!(commands = commands.len(), "Opening command palette");
        self.session = Some(PaletteSession::new(commands));
    }

    /// Close and discard the session. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.session.take().is_some();
        if was_open {
            tracing::debug!("Closed command palette");
        }
        was_open
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Current query; empty while closed.
    pub fn query(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.query.as_str())
    }

    /// Selection index into the flat result list; 0 while closed.
    pub fn selected_index(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.selected)
    }

    /// Flat filtered list, in registry order.
    pub fn results(&self) -> Vec<&CommandDefinition> {
        match &self.session {
            Some(s) => s
                .results
                .iter()
                .filter_map(|&i| s.commands.get(i))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Filtered list grouped by category for sectioned display.
    pub fn groups(&self) -> Vec<CommandGroup<'_>> {
        search::group_by_category(&self.results())
    }

    pub fn selected(&self) -> Option<&CommandDefinition> {
        let s = self.session.as_ref()?;
        let &index = s.results.get(s.selected)?;
        s.commands.get(index)
    }

    /// Replace the query, re-run the search and reset the selection.
    /// Returns false while closed.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let Some(s) = self.session.as_mut() else {
            return false;
        };
        s.query = query.into();
        s.refilter();
        true
    }

    /// Move the selection down one, wrapping to the top.
    pub fn select_next(&mut self) {
        if let Some(s) = self.session.as_mut() {
            if !s.results.is_empty() {
                s.selected = (s.selected + 1) % s.results.len();
            }
        }
    }

    /// Move the selection up one, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        if let Some(s) = self.session.as_mut() {
            let len = s.results.len();
            if len > 0 {
                s.selected = (s.selected + len - 1) % len;
            }
        }
    }

    pub fn select_first(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.selected = 0;
        }
    }

    pub fn select_last(&mut self) {
        if let Some(s) = self.session.as_mut() {
            s.selected = s.results.len().saturating_sub(1);
        }
    }

    /// Run the selected command's action.
    ///
    /// Returns the command id, or `None` when closed or nothing matched. The
    /// palette stays open; an action error is returned unchanged.
    pub fn commit(&self) -> anyhow::Result<Option<String>> {
        let Some(command) = self.selected() else {
            return Ok(None);
        };
        tracing::debug!(id = %command.id, "Executing palette command");
        (command.action)()?;
        Ok(Some(command.id.clone()))
    }

    /// Feed one key event to the open palette.
    ///
    /// Printable characters edit the query, Backspace deletes, Ctrl+U clears,
    /// Up/Down (or Ctrl+P/Ctrl+N) move, Home/End jump, Enter commits and
    /// Escape closes.
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<PaletteOutcome> {
        if !self.is_open() || key.kind == KeyEventKind::Release {
            return Ok(PaletteOutcome::Ignored);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let outcome = match key.code {
            KeyCode::Esc => {
                self.close();
                PaletteOutcome::Closed
            }
            KeyCode::Enter => match self.commit()? {
                Some(id) => PaletteOutcome::Executed { id },
                None => PaletteOutcome::Ignored,
            },
            KeyCode::Down => {
                self.select_next();
                PaletteOutcome::Updated
            }
            KeyCode::Up => {
                self.select_prev();
                PaletteOutcome::Updated
            }
            KeyCode::Char('n') if ctrl => {
                self.select_next();
                PaletteOutcome::Updated
            }
            KeyCode::Char('p') if ctrl => {
                self.select_prev();
                PaletteOutcome::Updated
            }
            KeyCode::Home => {
                self.select_first();
                PaletteOutcome::Updated
            }
            KeyCode::End => {
                self.select_last();
                PaletteOutcome::Updated
            }
            KeyCode::Char('u') if ctrl => {
                self.set_query(String::new());
                PaletteOutcome::Updated
            }
            KeyCode::Backspace => {
                let mut query = self.query().to_string();
                if query.pop().is_none() {
                    return Ok(PaletteOutcome::Ignored);
                }
                self.set_query(query);
                PaletteOutcome::Updated
            }
            // Character input (only if no modifiers except SHIFT)
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                let mut query = self.query().to_string();
                query.push(c);
                self.set_query(query);
                PaletteOutcome::Updated
            }
            _ => PaletteOutcome::Ignored,
        };

        Ok(outcome)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{action, noop};
    use crate::commands::CommandCategory;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn five_commands() -> CommandRegistry {
        ["alpha", "bravo", "charlie", "delta", "echo"]
            .into_iter()
            .map(|id| CommandDefinition::new(id, id, CommandCategory::Actions, noop()))
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl_key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(palette: &mut CommandPalette, text: &str) {
        for c in text.chars() {
            palette.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_starts_closed() {
        let palette = CommandPalette::new();
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
        assert!(palette.results().is_empty());
    }

    #[test]
    fn test_open_lists_everything() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        assert!(palette.is_open());
        assert_eq!(palette.results().len(), 5);
        assert_eq!(palette.selected_index(), 0);
    }

    #[test]
    fn test_up_from_top_wraps_to_bottom() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());

        palette.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(palette.selected_index(), 4);
        palette.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(palette.selected_index(), 0);
        palette.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(palette.selected_index(), 1);
    }

    #[test]
    fn test_ctrl_n_and_ctrl_p_navigate() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        palette.handle_key(ctrl_key('n')).unwrap();
        palette.handle_key(ctrl_key('n')).unwrap();
        assert_eq!(palette.selected_index(), 2);
        palette.handle_key(ctrl_key('p')).unwrap();
        assert_eq!(palette.selected_index(), 1);
    }

    #[test]
    fn test_home_and_end() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        palette.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(palette.selected_index(), 4);
        palette.handle_key(key(KeyCode::Home)).unwrap();
        assert_eq!(palette.selected_index(), 0);
    }

    #[test]
    fn test_typing_refilters_and_resets_selection() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        palette.handle_key(key(KeyCode::Down)).unwrap();
        palette.handle_key(key(KeyCode::Down)).unwrap();

        type_str(&mut palette, "ha");
        assert_eq!(palette.query(), "ha");
        assert_eq!(palette.selected_index(), 0);
        let ids: Vec<_> = palette.results().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "charlie"]);
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        type_str(&mut palette, "echo");
        assert_eq!(palette.results().len(), 1);

        palette.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(palette.query(), "ech");

        palette.handle_key(ctrl_key('u')).unwrap();
        assert_eq!(palette.query(), "");
        assert_eq!(palette.results().len(), 5);

        assert_eq!(
            palette.handle_key(key(KeyCode::Backspace)).unwrap(),
            PaletteOutcome::Ignored
        );
    }

    #[test]
    fn test_navigation_on_empty_results_is_stable() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        type_str(&mut palette, "zzz");
        palette.handle_key(key(KeyCode::Down)).unwrap();
        palette.handle_key(key(KeyCode::Up)).unwrap();
        palette.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(palette.selected_index(), 0);
        assert!(palette.selected().is_none());
    }

    #[test]
    fn test_enter_executes_selected_and_stays_open() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let commands = CommandRegistry::new()
            .with(CommandDefinition::new("first", "First", CommandCategory::Actions, noop()))
            .with(CommandDefinition::new(
                "second",
                "Second",
                CommandCategory::Actions,
                action(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
            ));

        let mut palette = CommandPalette::new();
        palette.open(commands);
        palette.handle_key(key(KeyCode::Down)).unwrap();
        let outcome = palette.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            outcome,
            PaletteOutcome::Executed {
                id: "second".to_string()
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(palette.is_open());
    }

    #[test]
    fn test_enter_with_no_results_does_nothing() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        type_str(&mut palette, "zzz");
        assert_eq!(
            palette.handle_key(key(KeyCode::Enter)).unwrap(),
            PaletteOutcome::Ignored
        );
    }

    #[test]
    fn test_escape_closes_without_executing() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let commands = CommandRegistry::new().with(CommandDefinition::new(
            "only",
            "Only",
            CommandCategory::Actions,
            action(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ));

        let mut palette = CommandPalette::new();
        palette.open(commands);
        assert_eq!(
            palette.handle_key(key(KeyCode::Esc)).unwrap(),
            PaletteOutcome::Closed
        );
        assert!(!palette.is_open());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut palette = CommandPalette::new();
        palette.open(five_commands());
        type_str(&mut palette, "a");
        palette.handle_key(key(KeyCode::Down)).unwrap();
        palette.close();

        palette.open(five_commands());
        assert_eq!(palette.query(), "");
        assert_eq!(palette.selected_index(), 0);
        assert_eq!(palette.results().len(), 5);
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut palette = CommandPalette::new();
        assert_eq!(
            palette.handle_key(key(KeyCode::Char('a'))).unwrap(),
            PaletteOutcome::Ignored
        );
        assert!(!palette.set_query("a"));
        assert_eq!(palette.commit().unwrap(), None);
    }

    #[test]
    fn test_commit_error_propagates() {
        let commands = CommandRegistry::new().with(CommandDefinition::new(
            "sync",
            "Sync now",
            CommandCategory::Actions,
            action(|| anyhow::bail!("sync engine unreachable")),
        ));
        let mut palette = CommandPalette::new();
        palette.open(commands);
        let err = palette.handle_key(key(KeyCode::Enter)).unwrap_err();
        assert_eq!(err.to_string(), "sync engine unreachable");
        assert!(palette.is_open());
    }

    #[test]
    fn test_groups_share_flat_index_space() {
        let commands = CommandRegistry::new()
            .with(CommandDefinition::new("a", "A", CommandCategory::Navigation, noop()))
            .with(CommandDefinition::new("b", "B", CommandCategory::Help, noop()))
            .with(CommandDefinition::new("c", "C", CommandCategory::Navigation, noop()));
        let mut palette = CommandPalette::new();
        palette.open(commands);
        palette.select_last();

        let groups = palette.groups();
        let selected_pos = palette.selected_index();
        let selected_in_groups = groups
            .iter()
            .flat_map(|g| g.rows.iter())
            .find(|(pos, _)| *pos == selected_pos)
            .map(|(_, c)| c.id.as_str());
        assert_eq!(selected_in_groups, Some("c"));
    }
}
