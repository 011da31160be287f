//! Detail popup for a single bill: header fields plus the line items.

use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::ui::{layouts, theme, utils};
use fresh_api::endpoints::bills::Bill;

pub fn render_bill_detail(f: &mut Frame, bill: &Bill) {
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        " Bill Details (Esc to close) ",
        theme::info_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Provider
            Constraint::Length(1), // Signer
            Constraint::Length(1), // Date
            Constraint::Length(1),
            Constraint::Min(3),    // Items
            Constraint::Length(1), // Total
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(format!("Provider: {}", bill.provider_name)),
        chunks[0],
    );
    f.render_widget(Paragraph::new(format!("Signer:   {}", bill.signer)), chunks[1]);
    f.render_widget(
        Paragraph::new(format!("Date:     {}", utils::fmt_date(&bill.date))),
        chunks[2],
    );

    let rows: Vec<Row> = bill
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
    .header(Row::new(vec!["Item", "Qty", "Price", "Total"]).style(theme::header_style()))
    .column_spacing(theme::TABLE_COLUMN_SPACING);

    f.render_widget(table, chunks[4]);

    let total = Paragraph::new(format!("Total: {}", utils::fmt_money(bill.total.value())))
        .style(theme::amount_style())
        .alignment(Alignment::Right);
    f.render_widget(total, chunks[5]);
}
