//! Filter panel popup: provider and signer pickers plus a date range.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::state::{BillsState, FilterField};
use crate::ui::{layouts, theme};

pub fn render_filter_panel(f: &mut Frame, state: &BillsState) {
    let panel = &state.filter_panel;

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        " Filters (Tab: next, ◂ ▸: change, c: clear, Enter: apply) ",
        theme::accent_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Provider
            Constraint::Length(1), // Signer
            Constraint::Length(1), // Start date
            Constraint::Length(1), // End date
            Constraint::Length(1),
            Constraint::Min(1), // Hint
        ])
        .split(inner);

    let provider_label = panel
        .provider_index
        .and_then(|i| state.providers.get(i))
        .map(|p| p.name.as_str())
        .unwrap_or("All");
    let signer_label = panel
        .signer_index
        .and_then(|i| state.signers.get(i))
        .map(|s| s.name.as_str())
        .unwrap_or("All");

    render_row(
        f,
        chunks[0],
        "Provider",
        provider_label,
        panel.current_field == FilterField::Provider,
    );
    render_row(
        f,
        chunks[1],
        "Signer",
        signer_label,
        panel.current_field == FilterField::Signer,
    );
    render_row(
        f,
        chunks[2],
        "From",
        if panel.start_date_input.is_empty() {
            "YYYY-MM-DD"
        } else {
            &panel.start_date_input
        },
        panel.current_field == FilterField::StartDate,
    );
    render_row(
        f,
        chunks[3],
        "Until",
        if panel.end_date_input.is_empty() {
            "YYYY-MM-DD"
        } else {
            &panel.end_date_input
        },
        panel.current_field == FilterField::EndDate,
    );

    // A half-typed date silently filters nothing; say so
    let hint = Paragraph::new("Dates are inclusive. Incomplete dates are ignored.")
        .style(theme::help_text_style());
    f.render_widget(hint, chunks[5]);
}

fn render_row(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(10)])
        .split(area);

    f.render_widget(
        Paragraph::new(format!("{}:", label)).style(theme::help_text_style()),
        chunks[0],
    );

    let style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };
    f.render_widget(Paragraph::new(value).style(style), chunks[1]);
}
