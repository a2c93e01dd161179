//! Background task event processing.

use crate::app::{App, AppEvent};

/// Apply a background task completion to application state.
///
/// Stale fetch results (superseded generation) are dropped inside
/// `apply_fetch_result`; everything here is state mutation only, rendering
/// happens on the next loop pass.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::FeedLoaded {
            category,
            generation,
            result,
        } => {
            app.apply_fetch_result(category, generation, result);
        }
    }
}
