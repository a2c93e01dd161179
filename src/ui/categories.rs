//! Category tab bar widget.

use crate::app::App;
use crate::news::Category;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Render the category tabs across the top of the screen.
///
/// In bookmarks view the bar keeps showing the active category (it is
/// restored on return) but the block title flags the mode.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let titles: Vec<Line> = Category::ALL
        .iter()
        .map(|c| Line::from(c.title()))
        .collect();

    let title = if app.show_bookmarks {
        format!(" slowpoke | Bookmarks ({}) ", app.bookmarks.len())
    } else {
        " slowpoke ".to_string()
    };

    let tabs = Tabs::new(titles)
        .select(app.feed.category.index())
        .style(app.style("category_normal"))
        .highlight_style(app.style("category_active"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(title)
                .title_style(app.style("header_title")),
        );

    f.render_widget(tabs, area);
}
