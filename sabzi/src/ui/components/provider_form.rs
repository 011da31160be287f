//! Popup form for creating a provider.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::state::{ProviderFormField, ProviderFormState};
use crate::ui::{layouts, theme};

pub fn render_provider_form(f: &mut Frame, form: &ProviderFormState) {
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::SMALL,
        " New Provider (Tab: next field, Enter: save, Esc: cancel) ",
        theme::accent_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(1), // Contact
            Constraint::Length(1), // Address
            Constraint::Length(1),
            Constraint::Length(1), // Validation error
        ])
        .split(inner);

    render_row(
        f,
        chunks[0],
        "Name",
        &form.name,
        "Provider name",
        form.current_field == ProviderFormField::Name,
    );
    render_row(
        f,
        chunks[1],
        "Contact",
        &form.contact,
        "Mobile number",
        form.current_field == ProviderFormField::Contact,
    );
    render_row(
        f,
        chunks[2],
        "Address",
        &form.address,
        "Address",
        form.current_field == ProviderFormField::Address,
    );

    if let Some(ref error) = form.validation_error {
        let error_line =
            Paragraph::new(error.as_str()).style(Style::default().fg(theme::COLOR_NEGATIVE));
        f.render_widget(error_line, chunks[4]);
    }
}

fn render_row(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
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
    let display = if value.is_empty() { placeholder } else { value };
    f.render_widget(Paragraph::new(display).style(style), chunks[1]);
}
