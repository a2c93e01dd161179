//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and render dispatch
//! - `categories` - Category tab bar widget
//! - `articles` - Article list widget
//! - `detail` - Selected-article detail pane
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod articles;
mod categories;
mod detail;
mod events;
mod help;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::{run, Action};
