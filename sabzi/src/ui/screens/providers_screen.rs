use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::{InputMode, LoadingState, ProvidersState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title, search_input},
    layouts, theme, utils,
};

pub fn render(f: &mut Frame, state: &ProvidersState) {
    if state.input_mode == InputMode::Search {
        let (title_area, search_area, content_area, help_area) =
            layouts::screen_layout_with_search(f.area());

        render_title(f, title_area, state);
        search_input::render_search_input(f, search_area, &state.filter_query);
        render_content(f, content_area, state);
        help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT);
    } else {
        let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

        render_title(f, title_area, state);
        render_content(f, content_area, state);
        help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT);
    }
}

fn render_title(f: &mut Frame, area: Rect, state: &ProvidersState) {
    let paragraph = Paragraph::new("Providers").style(theme::title_style());
    f.render_widget(paragraph, area);

    screen_title::render_screen_title(f, area, &state.providers_loading);
}

fn render_content(f: &mut Frame, area: Rect, state: &ProvidersState) {
    if matches!(state.providers_loading, LoadingState::Loading(..)) && state.providers.is_empty() {
        empty_state::render_loading_state(f, area, "Status", "Loading providers...");
        return;
    }

    if let LoadingState::Error(ref error) = state.providers_loading {
        if state.providers.is_empty() {
            empty_state::render_empty_state(
                f,
                area,
                "Providers",
                error,
                Some("Press r to retry"),
            );
            return;
        }
    }

    let filtered = state.filtered_providers();

    if filtered.is_empty() {
        let (message, hint) = if state.providers.is_empty() {
            ("No providers yet", Some("Press a to add the first provider"))
        } else {
            ("No providers match the search", Some("Press Esc to clear"))
        };
        empty_state::render_empty_state(f, area, "Providers", message, hint);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Mobile"),
        Cell::from("Address"),
        Cell::from("Since"),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = filtered
        .iter()
        .map(|provider| {
            Row::new(vec![
                Cell::from(provider.name.as_str()),
                Cell::from(provider.mobile.as_str()),
                Cell::from(provider.address.as_str()),
                Cell::from(utils::fmt_date(&provider.created_at)),
            ])
        })
        .collect();

    let title = if !state.filter_query.is_empty() {
        format!("Providers ({} filtered)", filtered.len())
    } else {
        format!("Providers ({})", filtered.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Length(14),
            Constraint::Percentage(40),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}
