//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input routing (help, palette, shortcuts, filter field)
//! - `events` - Signal and app event processing
//! - `render` - View rendering dispatch
//! - `help` - Shortcut help overlay
//! - `palette` - Command palette overlay
//! - `status` - Status bar widget
//! - `text` - Display-width helpers

mod events;
mod help;
mod input;
mod loop_runner;
mod palette;
mod render;
mod status;
mod text;

pub use events::{handle_app_event, handle_signal};
pub use input::handle_input;
pub use loop_runner::{run, Action};
