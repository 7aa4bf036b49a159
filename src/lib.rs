//! keydeck: global shortcut dispatcher and command palette for a terminal
//! curation workbench.
//!
//! Two subsystems share one input loop:
//!
//! - **Shortcuts** (`shortcuts`): key normalization, a registry of shortcut
//!   definitions, the dispatcher that matches key events against it, the key
//!   formatter and the help overlay projection.
//! - **Commands** (`commands`): a per-session command list, the substring
//!   search engine over it and the palette controller that owns an open
//!   search session.
//!
//! They meet through the typed request channel in `signal`: the reserved
//! search shortcut asks the host to open the palette, the reserved help
//! shortcut asks it to open the help overlay.
//!
//! # Examples
//!
//! ```
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//! use keydeck::action;
//! use keydeck::shortcuts::{
//!     KeyInput, ShortcutCategory, ShortcutDefinition, ShortcutDispatcher, ShortcutRegistry,
//! };
//! use keydeck::signal::signal_channel;
//!
//! let (signals, _rx) = signal_channel();
//! let dispatcher = ShortcutDispatcher::new(signals);
//! let mut registry = ShortcutRegistry::new();
//! registry.register(ShortcutDefinition::new(
//!     "nav-dashboard",
//!     ["Cmd", "Shift", "D"],
//!     "Go to dashboard",
//!     ShortcutCategory::Navigation,
//!     action::noop(),
//! ));
//!
//! let event = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SUPER | KeyModifiers::SHIFT);
//! let outcome = dispatcher.dispatch(&registry, &KeyInput::new(event)).unwrap();
//! assert!(outcome.is_handled());
//! ```

pub mod action;
pub mod app;
pub mod commands;
pub mod config;
pub mod screens;
pub mod shortcuts;
pub mod signal;
pub mod ui;
