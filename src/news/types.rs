use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Category
// ============================================================================

/// News category for scoping an article query.
///
/// The article API accepts a closed set of category names; the enum
/// round-trips through the lowercase wire name via [`Category::as_str`]
/// and [`Category::from_str_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    World,
    Business,
    Technology,
    Health,
    Science,
    Sports,
    Entertainment,
    Lifestyle,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 8] = [
        Category::World,
        Category::Business,
        Category::Technology,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Entertainment,
        Category::Lifestyle,
    ];

    /// Lowercase wire name used in the API query string.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::World => "world",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::Lifestyle => "lifestyle",
        }
    }

    /// Capitalized name for the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            Category::World => "World",
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Lifestyle => "Lifestyle",
        }
    }

    /// Parse a category from its wire name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Position within [`Category::ALL`].
    pub fn index(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    /// Next category in tab order, wrapping around.
    pub fn next(self) -> Self {
        Category::ALL[(self.index() + 1) % Category::ALL.len()]
    }

    /// Previous category in tab order, wrapping around.
    pub fn prev(self) -> Self {
        let len = Category::ALL.len();
        Category::ALL[(self.index() + len - 1) % len]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Article
// ============================================================================

/// An article record from the news API.
///
/// Treated as opaque except for `title` and `link`, which must both be
/// non-empty for the article to be held in application state (`link` is
/// the natural key for bookmarking). Serde renames follow the wire
/// format so that bookmark persistence stores the same shape the API
/// returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    /// Author names; the API sends an array or null.
    #[serde(default)]
    pub creator: Option<Vec<String>>,
    /// Publication timestamp as the API sends it (`YYYY-MM-DD HH:MM:SS`, UTC).
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
}

impl Article {
    /// Whether this record satisfies the state invariant: non-empty
    /// `title` and `link`. Records failing this are dropped at the
    /// fetch boundary.
    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty() && !self.link.trim().is_empty()
    }

    /// Publication time as a unix timestamp, if `pub_date` parses.
    ///
    /// Accepts the API's native `YYYY-MM-DD HH:MM:SS` format with an
    /// RFC 3339 fallback for sources that deviate.
    pub fn published_ts(&self) -> Option<i64> {
        let raw = self.pub_date.as_deref()?.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.and_utc().timestamp());
        }
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.timestamp())
    }

    /// Source label for display: `source_id`, else the first author,
    /// else a placeholder.
    pub fn source_label(&self) -> &str {
        if let Some(id) = self.source_id.as_deref().filter(|s| !s.trim().is_empty()) {
            return id;
        }
        self.creator
            .as_deref()
            .and_then(|names| names.iter().find(|n| !n.trim().is_empty()))
            .map(String::as_str)
            .unwrap_or("Unknown Source")
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// Top-level response shape from the article API.
///
/// `results` entries are kept as raw JSON values so a single malformed
/// record can be dropped without failing the whole response.
#[derive(Debug, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub message: Option<String>,
}
