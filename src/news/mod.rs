//! Client for the external article-search API.
//!
//! One outbound GET per fetch trigger, scoped by [`Category`]. The response
//! envelope is validated and filtered here so the rest of the application
//! only ever sees articles with non-empty `title` and `link`.

mod client;
mod types;

pub use client::{FetchError, NewsClient, DEFAULT_BASE_URL};
pub use types::{Article, Category, NewsResponse};
