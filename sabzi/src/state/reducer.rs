use super::{AppState, InputMode, LoadingState};
use crate::events::DataEvent;
use crate::ui::screens::Screen;
use ratatui::widgets::TableState;
use std::cell::RefCell;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        // Bills cache loaded
        DataEvent::BillsCacheLoaded { mut bills } => {
            if let Screen::Bills(bills_state) = state.current_screen_mut() {
                // Most recent first (load order; the sort criteria reorder on top)
                bills.sort_by(|a, b| b.date.cmp(&a.date));
                bills_state.bills = bills;
                bills_state.bills_loading = LoadingState::Loaded;
                bills_state.table_state = RefCell::new(TableState::default().with_selected(0));
            }
        }

        // Bills loaded from API
        DataEvent::BillsLoaded { mut bills } => {
            if let Screen::Bills(bills_state) = state.current_screen_mut() {
                bills.sort_by(|a, b| b.date.cmp(&a.date));
                bills_state.bills = bills;
                bills_state.bills_loading = LoadingState::Loaded;
            }
        }

        // Providers are reference data for every screen in the stack: the
        // providers screen lists them, the bills screen filters and
        // resolves against them
        DataEvent::ProvidersCacheLoaded { providers } | DataEvent::ProvidersLoaded { providers } => {
            for screen in &mut state.history {
                match screen {
                    Screen::Providers(providers_state) => {
                        providers_state.providers = providers.clone();
                        providers_state.providers_loading = LoadingState::Loaded;
                        if providers_state.table_state.borrow().selected().is_none() {
                            providers_state.table_state =
                                RefCell::new(TableState::default().with_selected(0));
                        }
                    }
                    Screen::Bills(bills_state) => {
                        bills_state.providers = providers.clone();
                    }
                    _ => {}
                }
            }
        }

        DataEvent::SignersCacheLoaded { signers } | DataEvent::SignersLoaded { signers } => {
            for screen in &mut state.history {
                if let Screen::Bills(bills_state) = screen {
                    bills_state.signers = signers.clone();
                }
            }
        }

        DataEvent::VegetablesCacheLoaded { vegetables }
        | DataEvent::VegetablesLoaded { vegetables } => {
            for screen in &mut state.history {
                if let Screen::Bills(bills_state) = screen {
                    // An open form picks the new catalog up on its next
                    // debounce poll; nothing to recompute here
                    bills_state.vegetables = vegetables.clone();
                }
            }
        }

        // Bill created successfully
        DataEvent::BillCreated { bill } => {
            tracing::info!("Bill {} created", bill.id);
            if let Screen::Bills(bills_state) = state.current_screen_mut() {
                // Newest entry goes first, as the backend returns them
                bills_state.bills.insert(0, bill);
                bills_state.input_mode = InputMode::Normal;
                bills_state.form_state = None;
                bills_state.bills_loading = LoadingState::Loaded;
            }
        }

        DataEvent::BillCreateFailed { error } => {
            tracing::warn!("Bill creation failed: {}", error);
            if let Screen::Bills(bills_state) = state.current_screen_mut() {
                bills_state.bills_loading = LoadingState::Loaded;
                if let Some(ref mut form) = bills_state.form_state {
                    form.validation_error = Some(error);
                }
            }
        }

        // Provider created successfully
        DataEvent::ProviderCreated { provider } => {
            tracing::info!("Provider {} created", provider.id);
            for screen in &mut state.history {
                match screen {
                    Screen::Providers(providers_state) => {
                        providers_state.providers.push(provider.clone());
                        providers_state.input_mode = InputMode::Normal;
                        providers_state.form_state = None;
                        providers_state.providers_loading = LoadingState::Loaded;
                    }
                    Screen::Bills(bills_state) => {
                        bills_state.providers.push(provider.clone());
                    }
                    _ => {}
                }
            }
        }

        DataEvent::ProviderCreateFailed { error } => {
            tracing::warn!("Provider creation failed: {}", error);
            if let Screen::Providers(providers_state) = state.current_screen_mut() {
                providers_state.providers_loading = LoadingState::Loaded;
                if let Some(ref mut form) = providers_state.form_state {
                    form.validation_error = Some(error);
                }
            }
        }

        // A new catalog entry was saved while submitting a bill
        DataEvent::VegetableCreated { vegetable } => {
            tracing::debug!("Catalog entry '{}' created", vegetable.name);
            for screen in &mut state.history {
                if let Screen::Bills(bills_state) = screen {
                    bills_state.vegetables.push(vegetable.clone());
                }
            }
        }

        // Export results surface in the bills screen status line
        DataEvent::ExportFinished { path } => {
            tracing::info!("Export finished: {}", path.display());
            if let Screen::Bills(bills_state) = state.current_screen_mut() {
                bills_state.export_status = Some(format!("Exported to {}", path.display()));
            }
        }

        DataEvent::ExportFailed { error } => {
            tracing::error!("Export failed: {}", error);
            if let Screen::Bills(bills_state) = state.current_screen_mut() {
                bills_state.export_status = Some(format!("Export failed: {}", error));
            }
        }

        // Errors
        DataEvent::LoadError { error } => match state.current_screen_mut() {
            Screen::Bills(bills_state) => {
                bills_state.bills_loading = LoadingState::Error(error);
            }
            Screen::Providers(providers_state) => {
                providers_state.providers_loading = LoadingState::Error(error);
            }
            Screen::Logs(_) => {
                tracing::error!("Load error while on logs screen: {}", error);
            }
        },
    }
}
