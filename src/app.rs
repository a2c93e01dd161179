//! Application state and the pure state transitions driving it.
//!
//! `App` owns everything the render loop needs: the active feed, the
//! bookmark store, the theme, and transient UI state. View and category
//! switches are pure decision functions that return which category (if
//! any) must be fetched; the input layer spawns the fetch and the event
//! layer applies its completion. Fetch completions carry a generation
//! counter so a stale response can never overwrite a newer request.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::bookmarks::BookmarkStore;
use crate::news::{Article, Category, FetchError, NewsClient};
use crate::storage::Database;
use crate::theme::{StyleMap, ThemeVariant};

/// Status messages expire after this many seconds.
const STATUS_TTL_SECS: u64 = 4;

// ============================================================================
// Feed State
// ============================================================================

/// The category feed currently shown (or being loaded).
///
/// Exactly one of `loading` and `error` is meaningful at a time: a fetch in
/// flight sets `loading` and clears both `articles` and `error`; completion
/// clears `loading` and fills exactly one of the other two.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub category: Category,
    /// Shared so a render can hold the list while a replacement loads.
    pub articles: Arc<Vec<Article>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl FeedState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            articles: Arc::new(Vec::new()),
            loading: false,
            error: None,
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks.
pub enum AppEvent {
    /// A category fetch finished.
    ///
    /// `generation` is the fetch counter captured when the task was spawned;
    /// the handler discards the event when it no longer matches.
    FeedLoaded {
        category: Category,
        generation: u64,
        result: Result<Vec<Article>, FetchError>,
    },
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub db: Database,
    pub news: NewsClient,

    pub theme_variant: ThemeVariant,
    theme: StyleMap,

    pub feed: FeedState,
    pub bookmarks: BookmarkStore,

    /// When set, the list shows the bookmark set instead of the feed.
    pub show_bookmarks: bool,
    /// Selection index into the currently visible list.
    pub selected: usize,

    /// Monotonic fetch counter. Incremented on every `begin_fetch`; a
    /// completion whose generation is older than the current value is stale
    /// and dropped.
    fetch_generation: u64,
    /// Handle of the in-flight fetch task, aborted when superseded.
    pub fetch_handle: Option<JoinHandle<()>>,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,
    pub show_help: bool,
}

impl App {
    pub fn new(
        db: Database,
        news: NewsClient,
        theme_variant: ThemeVariant,
        category: Category,
        bookmarks: BookmarkStore,
    ) -> Self {
        Self {
            db,
            news,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            feed: FeedState::new(category),
            bookmarks,
            show_bookmarks: false,
            selected: 0,
            fetch_generation: 0,
            fetch_handle: None,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            show_help: false,
        }
    }

    // ========================================================================
    // Theme
    // ========================================================================

    /// Resolve a style role against the active theme.
    pub fn style(&self, role: &str) -> ratatui::style::Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Switch to the next theme variant and return it for persistence.
    pub fn cycle_theme(&mut self) -> ThemeVariant {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next
    }

    // ========================================================================
    // Visible list and selection
    // ========================================================================

    /// The article list the UI currently shows: the bookmark set in
    /// bookmarks view, the fetched feed otherwise.
    pub fn visible_articles(&self) -> &[Article] {
        if self.show_bookmarks {
            self.bookmarks.list()
        } else {
            &self.feed.articles
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.visible_articles().get(self.selected)
    }

    /// Keep the selection inside the visible list after it changes length.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_articles().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn nav_down(&mut self) {
        let len = self.visible_articles().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
            self.needs_redraw = true;
        }
    }

    pub fn nav_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.needs_redraw = true;
        }
    }

    // ========================================================================
    // View coordination
    // ========================================================================

    /// Toggle between the bookmarks view and the category feed.
    ///
    /// Returns the category to fetch when the switch re-enters feed view;
    /// entering bookmarks never fetches. Selection resets either way so it
    /// cannot point past the end of the new list.
    pub fn toggle_bookmarks(&mut self) -> Option<Category> {
        self.show_bookmarks = !self.show_bookmarks;
        self.selected = 0;
        self.needs_redraw = true;
        if self.show_bookmarks {
            None
        } else {
            Some(self.feed.category)
        }
    }

    /// Select a category, returning it when a fetch is required.
    ///
    /// In bookmarks view the active category still updates (it is restored
    /// on return to feed view) but no fetch happens. Re-selecting the
    /// current category in feed view refetches it.
    pub fn change_category(&mut self, category: Category) -> Option<Category> {
        self.feed.category = category;
        self.needs_redraw = true;
        if self.show_bookmarks {
            None
        } else {
            self.selected = 0;
            Some(category)
        }
    }

    /// Manual refresh. Returns the category to refetch, or `None` in
    /// bookmarks view where refresh has nothing to do.
    pub fn refresh_request(&self) -> Option<Category> {
        if self.show_bookmarks {
            None
        } else {
            Some(self.feed.category)
        }
    }

    // ========================================================================
    // Fetch lifecycle
    // ========================================================================

    /// Enter the loading state for `category` and claim a new generation.
    ///
    /// The previous article list and error are cleared immediately so the
    /// UI never shows another category's content under the new heading.
    pub fn begin_fetch(&mut self, category: Category) -> u64 {
        self.fetch_generation += 1;
        self.feed.category = category;
        self.feed.articles = Arc::new(Vec::new());
        self.feed.loading = true;
        self.feed.error = None;
        self.selected = 0;
        self.needs_redraw = true;
        self.fetch_generation
    }

    /// Apply a fetch completion. Returns `false` when the event was stale
    /// and ignored.
    pub fn apply_fetch_result(
        &mut self,
        category: Category,
        generation: u64,
        result: Result<Vec<Article>, FetchError>,
    ) -> bool {
        if generation != self.fetch_generation {
            tracing::debug!(
                category = %category,
                generation,
                current = self.fetch_generation,
                "Dropping stale fetch result"
            );
            return false;
        }

        self.feed.loading = false;
        match result {
            Ok(articles) => {
                tracing::info!(category = %category, count = articles.len(), "Feed loaded");
                self.feed.articles = Arc::new(articles);
                self.feed.error = None;
            }
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "Feed load failed");
                self.feed.articles = Arc::new(Vec::new());
                self.feed.error = Some(e.to_string());
            }
        }
        self.clamp_selection();
        self.needs_redraw = true;
        true
    }

    // ========================================================================
    // Status line
    // ========================================================================

    /// Set status message (auto-expires).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Fetch spawning
// ============================================================================

/// Spawn a background fetch for `category`, superseding any in-flight one.
///
/// The previous task is aborted rather than awaited; even if its completion
/// was already queued, the generation check in `apply_fetch_result` keeps
/// it from landing.
pub fn spawn_fetch(app: &mut App, category: Category, event_tx: mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.fetch_handle.take() {
        handle.abort();
    }
    let generation = app.begin_fetch(category);
    let client = app.news.clone();

    app.fetch_handle = Some(tokio::spawn(async move {
        let result = client.fetch(category).await;
        // Receiver gone means the app is shutting down.
        let _ = event_tx
            .send(AppEvent::FeedLoaded {
                category,
                generation,
                result,
            })
            .await;
    }));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    async fn test_app() -> App {
        let db = Database::open(":memory:").await.unwrap();
        let news = NewsClient::new(
            reqwest::Client::new(),
            SecretString::from("test-key"),
            "us",
        );
        let bookmarks = BookmarkStore::load(&db).await.unwrap();
        App::new(db, news, ThemeVariant::Dark, Category::Technology, bookmarks)
    }

    fn article(title: &str, link: &str) -> Article {
        Article {
            title: title.to_string(),
            link: link.to_string(),
            description: None,
            image_url: None,
            source_id: None,
            creator: None,
            pub_date: None,
        }
    }

    #[tokio::test]
    async fn begin_fetch_clears_previous_feed() {
        let mut app = test_app().await;
        app.feed.articles = Arc::new(vec![article("A", "https://example.com/a")]);
        app.feed.error = Some("old error".to_string());
        app.selected = 3;

        let gen = app.begin_fetch(Category::Science);
        assert_eq!(gen, 1);
        assert!(app.feed.loading);
        assert!(app.feed.articles.is_empty());
        assert_eq!(app.feed.error, None);
        assert_eq!(app.feed.category, Category::Science);
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn stale_fetch_result_is_dropped() {
        let mut app = test_app().await;
        let old_gen = app.begin_fetch(Category::World);
        let new_gen = app.begin_fetch(Category::Science);
        assert!(new_gen > old_gen);

        // Slow World response arrives after Science was requested.
        let applied = app.apply_fetch_result(
            Category::World,
            old_gen,
            Ok(vec![article("Stale", "https://example.com/stale")]),
        );
        assert!(!applied);
        assert!(app.feed.loading); // Science fetch still pending
        assert!(app.feed.articles.is_empty());

        let applied = app.apply_fetch_result(
            Category::Science,
            new_gen,
            Ok(vec![article("Fresh", "https://example.com/fresh")]),
        );
        assert!(applied);
        assert!(!app.feed.loading);
        assert_eq!(app.feed.articles[0].title, "Fresh");
    }

    #[tokio::test]
    async fn fetch_error_sets_message_and_empty_list() {
        let mut app = test_app().await;
        let gen = app.begin_fetch(Category::Health);

        app.apply_fetch_result(Category::Health, gen, Err(FetchError::Timeout));
        assert!(!app.feed.loading);
        assert!(app.feed.articles.is_empty());
        assert_eq!(app.feed.error.as_deref(), Some("Request timed out"));
    }

    #[tokio::test]
    async fn toggle_bookmarks_round_trip_refetches_feed() {
        let mut app = test_app().await;
        app.feed.category = Category::Sports;
        app.selected = 2;

        // Entering bookmarks: no fetch, selection reset.
        assert_eq!(app.toggle_bookmarks(), None);
        assert!(app.show_bookmarks);
        assert_eq!(app.selected, 0);

        // Leaving bookmarks: the active category is fetched again.
        assert_eq!(app.toggle_bookmarks(), Some(Category::Sports));
        assert!(!app.show_bookmarks);
    }

    #[tokio::test]
    async fn change_category_in_bookmarks_view_defers_fetch() {
        let mut app = test_app().await;
        app.toggle_bookmarks();

        // Category updates but nothing is fetched while bookmarks are shown.
        assert_eq!(app.change_category(Category::Business), None);
        assert_eq!(app.feed.category, Category::Business);

        // The deferred category is what gets fetched on return.
        assert_eq!(app.toggle_bookmarks(), Some(Category::Business));
    }

    #[tokio::test]
    async fn change_category_in_feed_view_fetches() {
        let mut app = test_app().await;
        assert_eq!(
            app.change_category(Category::Entertainment),
            Some(Category::Entertainment)
        );
        // Re-selecting the active category still refetches.
        assert_eq!(
            app.change_category(Category::Entertainment),
            Some(Category::Entertainment)
        );
    }

    #[tokio::test]
    async fn refresh_is_noop_in_bookmarks_view() {
        let mut app = test_app().await;
        assert_eq!(app.refresh_request(), Some(Category::Technology));
        app.toggle_bookmarks();
        assert_eq!(app.refresh_request(), None);
    }

    #[tokio::test]
    async fn visible_articles_tracks_view() {
        let mut app = test_app().await;
        app.feed.articles = Arc::new(vec![article("Feed", "https://example.com/f")]);
        let db = app.db.clone();
        app.bookmarks
            .toggle(&db, article("Saved", "https://example.com/s"))
            .await
            .unwrap();

        assert_eq!(app.visible_articles()[0].title, "Feed");
        app.toggle_bookmarks();
        assert_eq!(app.visible_articles()[0].title, "Saved");
    }

    #[tokio::test]
    async fn clamp_selection_after_shrink() {
        let mut app = test_app().await;
        app.feed.articles = Arc::new(vec![
            article("A", "https://example.com/1"),
            article("B", "https://example.com/2"),
        ]);
        app.selected = 1;

        app.feed.articles = Arc::new(vec![article("A", "https://example.com/1")]);
        app.clamp_selection();
        assert_eq!(app.selected, 0);

        app.feed.articles = Arc::new(Vec::new());
        app.clamp_selection();
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_article(), None);
    }

    #[tokio::test]
    async fn nav_stays_in_bounds() {
        let mut app = test_app().await;
        app.nav_down(); // empty list
        assert_eq!(app.selected, 0);
        app.nav_up();
        assert_eq!(app.selected, 0);

        app.feed.articles = Arc::new(vec![
            article("A", "https://example.com/1"),
            article("B", "https://example.com/2"),
        ]);
        app.nav_down();
        app.nav_down();
        assert_eq!(app.selected, 1);
        app.nav_up();
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn cycle_theme_flips_variant() {
        let mut app = test_app().await;
        assert_eq!(app.cycle_theme(), ThemeVariant::Light);
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert_eq!(app.cycle_theme(), ThemeVariant::Dark);
    }

    #[tokio::test]
    async fn status_message_expiry() {
        let mut app = test_app().await;
        app.set_status("Saved");
        assert!(app.status_message.is_some());
        assert!(!app.clear_expired_status()); // just set, not expired

        // Backdate past the TTL.
        if let Some((_, t)) = app.status_message.as_mut() {
            *t = Instant::now() - std::time::Duration::from_secs(STATUS_TTL_SECS + 1);
        }
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }
}
