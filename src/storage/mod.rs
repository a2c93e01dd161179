mod preferences;
mod schema;

pub use schema::{Database, DatabaseError};

/// Preference key holding the serialized theme variant.
pub const THEME_KEY: &str = "theme";
/// Preference key holding the serialized bookmark array.
pub const BOOKMARKS_KEY: &str = "bookmarks";
