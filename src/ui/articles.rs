//! Article list widget.

use crate::app::App;
use crate::util::{sanitize_line, truncate_to_width};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Braille spinner frames for the loading indicator.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Format a unix timestamp as relative time.
pub(super) fn format_relative_time(timestamp: Option<i64>) -> String {
    let Some(ts) = timestamp else {
        return String::new();
    };

    let now = Utc::now().timestamp();
    let diff = now - ts;

    // Future dates (clock skew on the provider side)
    if diff < 0 {
        return "now".to_string();
    }

    if diff < 3600 {
        return format!("{}m", diff / 60);
    }

    if diff < 86400 {
        return format!("{}h", diff / 3600);
    }

    if diff < 604800 {
        return format!("{}d", diff / 86400);
    }

    // Older than 7 days, show the date
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%b %d").to_string())
        .unwrap_or_default()
}

/// Render the article list panel.
///
/// Shows the fetched feed or the bookmark set depending on the active view.
/// A fetch in flight replaces the list with a spinner; a fetch error
/// replaces it with the error message.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let title = if app.show_bookmarks {
        " Bookmarks ".to_string()
    } else {
        format!(" {} ", app.feed.category.title())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(title);

    if !app.show_bookmarks {
        if app.feed.loading {
            let frame_str = SPINNER[app.spinner_frame % SPINNER.len()];
            let msg = Paragraph::new(format!("{} Loading...", frame_str))
                .style(app.style("loading_text"))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
            return;
        }

        if let Some(error) = &app.feed.error {
            let msg = Paragraph::new(format!(
                "Failed to load articles\n\n{}\n\nPress r to retry",
                error
            ))
            .style(app.style("error_text"))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(block);
            f.render_widget(msg, area);
            return;
        }
    }

    let visible = app.visible_articles();
    if visible.is_empty() {
        let text = if app.show_bookmarks {
            "No bookmarks yet\n\nPress s on an article to save it"
        } else {
            "No articles"
        };
        let msg = Paragraph::new(text)
            .style(app.style("detail_metadata"))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Columns inside the border, minus marker and date budget.
    let title_width = area.width.saturating_sub(12) as usize;

    let items: Vec<ListItem> = visible
        .iter()
        .map(|article| {
            let mut spans = Vec::new();

            if app.bookmarks.contains(&article.link) {
                spans.push(Span::styled("★ ", app.style("article_bookmark")));
            } else {
                spans.push(Span::raw("  "));
            }

            let clean = sanitize_line(&article.title);
            spans.push(Span::styled(
                truncate_to_width(&clean, title_width),
                app.style("article_title"),
            ));

            let time_str = format_relative_time(article.published_ts());
            if !time_str.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", time_str),
                    app.style("article_date"),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("article_selected"));

    f.render_stateful_widget(list, area, &mut state);
}
