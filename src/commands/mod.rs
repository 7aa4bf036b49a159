//! Command palette: command list, search and session controller.

mod palette;
mod registry;
mod search;

pub use palette::{CommandPalette, PaletteOutcome};
pub use registry::{CommandCategory, CommandDefinition, CommandRegistry};
pub use search::{filter, group_by_category, CommandGroup};
