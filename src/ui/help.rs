//! Help overlay listing all keybindings.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

/// Keybindings shown in the help overlay, in display order.
const BINDINGS: [(&str, &str); 12] = [
    ("j / Down", "Next article"),
    ("k / Up", "Previous article"),
    ("h / Left", "Previous category"),
    ("l / Right / Tab", "Next category"),
    ("1-8", "Jump to category"),
    ("r", "Refresh current category"),
    ("s / Enter", "Toggle bookmark"),
    ("b", "Toggle bookmarks view"),
    ("o", "Open link in browser"),
    ("t", "Toggle dark/light theme"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

/// Render the help overlay on top of the current view.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let overlay = centered_rect(60, 70, area);
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let rows: Vec<Row> = BINDINGS
        .iter()
        .map(|(key, desc)| Row::new(vec![format!("  {}", key), desc.to_string()]))
        .collect();

    let widths = [Constraint::Length(18), Constraint::Min(20)];

    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Help (? to close) "),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(app.style("detail_body"));

    f.render_widget(table, overlay);
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
