//! Input handling for the TUI.
//!
//! Processes keyboard input and dispatches to application state. Category
//! and view switches go through the decision functions on `App`; when one
//! returns a category, the fetch is spawned here.

use crate::app::{spawn_fetch, App, AppEvent};
use crate::news::Category;
use crate::storage::THEME_KEY;
use crate::util::validate_open_url;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys when visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(Action::Quit);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),

        KeyCode::Char('?') => app.show_help = true,

        // -- Navigation --
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),

        // -- Category switching --
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
            let next = app.feed.category.next();
            if let Some(category) = app.change_category(next) {
                spawn_fetch(app, category, event_tx.clone());
            }
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
            let prev = app.feed.category.prev();
            if let Some(category) = app.change_category(prev) {
                spawn_fetch(app, category, event_tx.clone());
            }
        }
        KeyCode::Char(c @ '1'..='8') => {
            // Direct selection: 1-8 map to the tabs in display order.
            let idx = (c as usize) - ('1' as usize);
            if let Some(&target) = Category::ALL.get(idx) {
                if let Some(category) = app.change_category(target) {
                    spawn_fetch(app, category, event_tx.clone());
                }
            }
        }

        // -- Refresh --
        KeyCode::Char('r') => {
            if let Some(category) = app.refresh_request() {
                spawn_fetch(app, category, event_tx.clone());
            } else {
                app.set_status("Nothing to refresh in bookmarks view");
            }
        }

        // -- Bookmarks view --
        KeyCode::Char('b') => {
            if let Some(category) = app.toggle_bookmarks() {
                spawn_fetch(app, category, event_tx.clone());
            }
        }

        // -- Bookmark toggle --
        KeyCode::Char('s') | KeyCode::Enter => {
            toggle_selected_bookmark(app).await;
        }

        // -- Theme --
        KeyCode::Char('t') => {
            let variant = app.cycle_theme();
            let saved = app.db.set_preference(THEME_KEY, variant.pref_name()).await;
            match saved {
                Ok(()) => app.set_status(format!("Theme: {}", variant.name())),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to persist theme");
                    app.set_status(format!("Theme: {} (not saved: {})", variant.name(), e));
                }
            }
        }

        // -- Open in browser --
        KeyCode::Char('o') => open_selected(app),

        _ => {}
    }

    Ok(Action::Continue)
}

/// Handle input while the help overlay is visible.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
        }
        _ => {}
    }
    Action::Continue
}

/// Toggle the bookmark state of the selected article and persist it.
async fn toggle_selected_bookmark(app: &mut App) {
    let Some(article) = app.selected_article().cloned() else {
        app.set_status("No article selected");
        return;
    };

    let db = app.db.clone();
    let toggled = app.bookmarks.toggle(&db, article).await;
    match toggled {
        Ok(true) => app.set_status("Bookmarked"),
        Ok(false) => app.set_status("Bookmark removed"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to save bookmarks");
            app.set_status(format!("Bookmark not saved: {}", e));
        }
    }
    // In bookmarks view removal shrinks the visible list under the cursor.
    app.clamp_selection();
}

/// Open the selected article's link in the system browser.
fn open_selected(app: &mut App) {
    let Some(article) = app.selected_article() else {
        app.set_status("No article selected");
        return;
    };
    let link = article.link.clone();

    if !validate_open_url(&link) {
        app.set_status("Article link is not an http(s) URL");
        return;
    }

    match open::that(&link) {
        Ok(()) => app.set_status("Opened in browser"),
        Err(e) => {
            tracing::warn!(url = %link, error = %e, "Failed to open browser");
            app.set_status(format!("Failed to open browser: {}", e));
        }
    }
}
