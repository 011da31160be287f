//! Inline popup form for creating a bill: provider, signer, date, then an
//! item entry row that feeds the line-item list.

use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::state::{BillFormState, FormField};
use crate::ui::{components::autocomplete_input::AutocompleteInput, layouts, theme, utils};

pub fn render_bill_form(f: &mut Frame, form: &BillFormState) {
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " New Bill (Tab: next field, Enter: add item / submit, Esc: cancel) ",
        theme::accent_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Provider
            Constraint::Length(1), // Signer
            Constraint::Length(1), // Date
            Constraint::Length(1),
            Constraint::Length(1), // Item entry header
            Constraint::Length(1), // Item entry row
            Constraint::Length(1),
            Constraint::Min(3),    // Accepted items
            Constraint::Length(1), // Total
            Constraint::Length(1), // Validation error
        ])
        .split(inner);

    render_signer_row(f, chunks[1], form);
    render_labeled_field(
        f,
        chunks[2],
        "Date",
        &form.date,
        "YYYY-MM-DD",
        form.current_field == FormField::Date,
    );

    let header = Paragraph::new("Add item (Enter to accept the row):").style(theme::help_text_style());
    f.render_widget(header, chunks[4]);

    render_item_entry_row(f, chunks[5], form);
    render_accepted_items(f, chunks[7], form);

    let total = Paragraph::new(format!("Total: {}", utils::fmt_money(form.items_total())))
        .style(theme::amount_style());
    f.render_widget(total, chunks[8]);

    if let Some(ref error) = form.validation_error {
        let error_line = Paragraph::new(error.as_str())
            .style(Style::default().fg(theme::COLOR_NEGATIVE));
        f.render_widget(error_line, chunks[9]);
    }

    // Rendered last so its dropdown overlays the signer/date rows
    render_provider_row(f, chunks[0], form);
}

fn render_provider_row(f: &mut Frame, area: Rect, form: &BillFormState) {
    let (label_area, value_area) = split_label(area);
    f.render_widget(
        Paragraph::new("Provider:").style(theme::help_text_style()),
        label_area,
    );

    let names: Vec<String> = form
        .filtered_providers
        .iter()
        .map(|p| p.name.clone())
        .collect();
    let focused = form.current_field == FormField::Provider;

    AutocompleteInput::new(&form.provider, "Provider name")
        .focused(focused)
        .items(if focused { &names } else { &[] })
        .selected_index(form.provider_selection_index)
        .render(f, value_area);
}

fn render_signer_row(f: &mut Frame, area: Rect, form: &BillFormState) {
    render_labeled_field(
        f,
        area,
        "Signer",
        &form.signer,
        "Who signs this bill",
        form.current_field == FormField::Signer,
    );
}

fn render_item_entry_row(f: &mut Frame, area: Rect, form: &BillFormState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(10),
        ])
        .split(area);

    let suggestion_names: Vec<String> = form
        .suggestion
        .suggestions
        .iter()
        .map(|v| v.name.clone())
        .collect();
    let name_focused = form.current_field == FormField::ItemName;

    // Hint mirrors the backend client: an unmatched name becomes a new
    // catalog entry on submit
    let hint = if name_focused
        && suggestion_names.is_empty()
        && form.suggestion.search_query.chars().count() >= 2
    {
        Some("No matches. This item will be added as new.")
    } else {
        None
    };

    AutocompleteInput::new(&form.item_name, "Item name")
        .focused(name_focused)
        .items(if name_focused { &suggestion_names } else { &[] })
        .selected_index(form.suggestion.selection_index)
        .hint(hint)
        .render(f, chunks[0]);

    render_small_field(f, chunks[1], &form.item_qty, "Qty", form.current_field == FormField::ItemQty);
    render_small_field(
        f,
        chunks[2],
        &form.item_price,
        "Price",
        form.current_field == FormField::ItemPrice,
    );
}

fn render_accepted_items(f: &mut Frame, area: Rect, form: &BillFormState) {
    if form.items.is_empty() {
        let placeholder =
            Paragraph::new("No items yet").style(Style::default().fg(theme::COLOR_ZERO));
        f.render_widget(placeholder, area);
        return;
    }

    let rows: Vec<Row> = form
        .items
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(item.name.clone()),
                Cell::from(format!("{}", item.quantity)),
                Cell::from(utils::fmt_money(item.price)),
                Cell::from(Text::from(utils::fmt_money(item.item_total)).right_aligned()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Item", "Qty", "Price", "Total"])
            .style(theme::header_style()),
    )
    .column_spacing(theme::TABLE_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn render_labeled_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let (label_area, value_area) = split_label(area);
    f.render_widget(
        Paragraph::new(format!("{}:", label)).style(theme::help_text_style()),
        label_area,
    );

    let style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };
    let display = if value.is_empty() { placeholder } else { value };
    f.render_widget(Paragraph::new(display).style(style), value_area);
}

fn render_small_field(f: &mut Frame, area: Rect, value: &str, placeholder: &str, focused: bool) {
    let style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };
    let display = if value.is_empty() { placeholder } else { value };
    f.render_widget(Paragraph::new(display).style(style), area);
}

fn split_label(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(10)])
        .split(area);
    (chunks[0], chunks[1])
}
