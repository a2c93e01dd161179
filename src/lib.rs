//! slowpoke: a terminal news reader.
//!
//! Fetches category-scoped headlines from newsdata.io, keeps a persistent
//! bookmark set, and renders both in a ratatui interface.

pub mod app;
pub mod bookmarks;
pub mod config;
pub mod news;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
