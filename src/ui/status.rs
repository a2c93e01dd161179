use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocations for the static hint lines.
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.show_bookmarks {
        Cow::Borrowed("[b]ack to feed [j/k]move [s]remove [o]pen [t]heme [?]help [q]uit")
    } else {
        Cow::Borrowed("[h/l]category [j/k]move [s]ave [b]ookmarks [r]efresh [o]pen [t]heme [?]help [q]uit")
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
