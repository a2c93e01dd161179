//! Small shared helpers for text measurement and URL vetting.

mod text;

pub use text::{display_width, sanitize_line, truncate_to_width, validate_open_url};
