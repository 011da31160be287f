//! Shared search input component for screens with free-text filtering.

use ratatui::prelude::Rect;
use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render a search input field with the current query.
///
/// This provides a consistent search UI across screens (Bills, Providers).
pub fn render_search_input(f: &mut Frame, area: Rect, query: &str) {
    let input = Paragraph::new(query)
        .style(theme::loading_style()) // Yellow text for input
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search (Enter: apply, Esc: clear)"),
        );

    f.render_widget(input, area);
}
