use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::state::{BillsState, InputMode, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title, search_input},
    layouts, theme, utils,
};
use fresh_api::endpoints::bills::Bill;

pub fn render(f: &mut Frame, state: &BillsState) {
    if state.input_mode == InputMode::Search {
        let (title_area, search_area, content_area, help_area) =
            layouts::screen_layout_with_search(f.area());

        render_title(f, title_area, state);
        search_input::render_search_input(f, search_area, &state.search_query);
        render_content(f, content_area, state);
        help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT);
    } else {
        let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

        render_title(f, title_area, state);
        render_content(f, content_area, state);
        help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT);
    }
}

fn render_title(f: &mut Frame, area: Rect, state: &BillsState) {
    let mut title = format!(
        "Bills — sort: {} {}",
        state.sort.field.display_name(),
        state.sort.direction.display_name()
    );
    if state.filter_panel.is_active() || !state.search_query.is_empty() {
        title.push_str(" — filters on");
    }

    let paragraph = Paragraph::new(title).style(theme::title_style());
    f.render_widget(paragraph, area);

    screen_title::render_screen_title(f, area, &state.bills_loading);
}

fn render_content(f: &mut Frame, area: Rect, state: &BillsState) {
    // Show loading message if currently loading and no cached data
    if matches!(state.bills_loading, LoadingState::Loading(..)) && state.bills.is_empty() {
        empty_state::render_loading_state(f, area, "Status", "Loading bills...");
        return;
    }

    if let LoadingState::Error(ref error) = state.bills_loading {
        if state.bills.is_empty() {
            empty_state::render_empty_state(
                f,
                area,
                "Bills",
                error,
                Some("Press r to retry"),
            );
            return;
        }
    }

    // Reserve a status line when the last export outcome should be visible
    let (table_area, status_area) = if state.export_status.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let filtered = state.filtered_bills();

    if filtered.is_empty() {
        let is_filtered = state.filter_panel.is_active() || !state.search_query.is_empty();
        let (message, hint) = if state.bills.is_empty() {
            ("No bills yet", Some("Press a to create the first bill"))
        } else if is_filtered {
            ("No bills match the filters", Some("Press c to clear filters"))
        } else {
            ("No bills found", None)
        };
        empty_state::render_empty_state(f, table_area, "Bills", message, hint);
    } else {
        render_bills_table(f, table_area, state, &filtered);
    }

    if let (Some(status_rect), Some(ref status)) = (status_area, &state.export_status) {
        let line = Paragraph::new(status.as_str()).style(theme::loading_style());
        f.render_widget(line, status_rect);
    }
}

fn render_bills_table(f: &mut Frame, area: Rect, state: &BillsState, filtered: &[&Bill]) {
    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Provider"),
        Cell::from("Signer"),
        Cell::from("Items"),
        Cell::from(Text::from("Amount").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = filtered.iter().map(|bill| build_bill_row(bill)).collect();

    // Show filter status in the table title
    let title = if filtered.len() != state.bills.len() {
        format!("Bills ({} of {})", filtered.len(), state.bills.len())
    } else {
        format!("Bills ({})", filtered.len())
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Percentage(30),
            Constraint::Length(12),
            Constraint::Percentage(40),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn build_bill_row<'a>(bill: &'a Bill) -> Row<'a> {
    let item_names: Vec<&str> = bill.items.iter().map(|i| i.name.as_str()).collect();

    Row::new(vec![
        Cell::from(utils::fmt_date(&bill.date)),
        Cell::from(bill.provider_name.as_str()),
        Cell::from(bill.signer.as_str()),
        Cell::from(utils::fmt_items_summary(&item_names, 3)),
        Cell::from(Text::from(utils::fmt_money(bill.total.value())).right_aligned())
            .style(theme::amount_style()),
    ])
}
