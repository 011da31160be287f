pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::log_buffer::LogBuffer;
use crate::state::{AppState, InputMode};
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    // Render the current screen
    match state.current_screen() {
        Screen::Bills(bills_state) => {
            bills_screen::render(f, bills_state);

            // Overlays by input mode
            match bills_state.input_mode {
                InputMode::FilterPanel => {
                    components::filter_panel::render_filter_panel(f, bills_state);
                }
                InputMode::BillForm => {
                    if let Some(ref form) = bills_state.form_state {
                        components::bill_form::render_bill_form(f, form);
                    }
                }
                InputMode::BillDetail => {
                    if let Some(ref bill_id) = bills_state.detail_bill_id {
                        if let Some(bill) =
                            bills_state.bills.iter().find(|b| b.id == *bill_id)
                        {
                            components::bill_detail::render_bill_detail(f, bill);
                        }
                    }
                }
                _ => {}
            }
        }
        Screen::Providers(providers_state) => {
            providers_screen::render(f, providers_state);

            if providers_state.input_mode == InputMode::ProviderForm {
                if let Some(ref form) = providers_state.form_state {
                    components::provider_form::render_provider_form(f, form);
                }
            }
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer);
        }
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}
