use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::state::InputMode;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    // Use shared popup frame
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        theme::accent_border_style(),
    );

    // Create the help list
    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    // Screen-specific help
    match screen {
        Screen::Bills(state) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("Enter", "View bill details"));
            items.push(("a", "Create a new bill"));
            items.push(("/", "Search bills"));
            if state.input_mode == InputMode::Search {
                items.push(("Type", "Search by provider or item name"));
                items.push(("Enter", "Exit search mode (keep search active)"));
                items.push(("Esc", "Clear search and exit search mode"));
                items.push(("Backspace", "Delete last character"));
            }
            items.push(("f", "Open filter panel (provider, signer, dates)"));
            items.push(("c", "Clear all filters"));
            items.push(("s", "Toggle sort field (date ↔ amount)"));
            items.push(("S", "Toggle sort direction"));
            items.push(("x", "Export the filtered list to CSV"));
            items.push(("r", "Refresh bills"));
        }
        Screen::Providers(state) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("a", "Create a new provider"));
            items.push(("/", "Search providers"));
            if state.input_mode == InputMode::Search {
                items.push(("Type", "Search by name, mobile, or address"));
                items.push(("Enter", "Exit search mode (keep search active)"));
                items.push(("Esc", "Clear search and exit search mode"));
                items.push(("Backspace", "Delete last character"));
            }
            items.push(("r", "Refresh providers"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
        }
    }

    // Global help
    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("h/←", "Navigate back"));
    items.push(("g then p", "Go to providers"));
    items.push(("g then l", "Go to logs"));
    items.push(("g then g", "Navigate to top of list"));
    items.push(("G", "Navigate to bottom of list"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}
