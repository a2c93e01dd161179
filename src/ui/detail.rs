//! Selected-article detail pane.

use crate::app::App;
use crate::util::sanitize_line;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the detail pane for the selected article.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(" Details ");

    let Some(article) = app.selected_article() else {
        let msg = Paragraph::new("Select an article")
            .style(app.style("detail_metadata"))
            .block(block);
        f.render_widget(msg, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        sanitize_line(&article.title).into_owned(),
        app.style("detail_heading"),
    )));
    lines.push(Line::from(""));

    let mut meta = vec![Span::styled(
        article.source_label(),
        app.style("article_source"),
    )];
    if let Some(date) = &article.pub_date {
        meta.push(Span::styled(
            format!("  {}", sanitize_line(date)),
            app.style("detail_metadata"),
        ));
    }
    lines.push(Line::from(meta));
    lines.push(Line::from(""));

    match &article.description {
        Some(desc) if !desc.trim().is_empty() => {
            lines.push(Line::from(Span::styled(
                sanitize_line(desc).into_owned(),
                app.style("detail_body"),
            )));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "No description available",
                app.style("detail_metadata"),
            )));
        }
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        sanitize_line(&article.link).into_owned(),
        app.style("detail_link"),
    )));

    if app.bookmarks.contains(&article.link) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "★ Bookmarked",
            app.style("article_bookmark"),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);

    f.render_widget(paragraph, area);
}
