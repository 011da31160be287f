use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 1: Bill creation form (highest priority)
    if let Screen::Bills(bills_state) = state.current_screen() {
        if bills_state.input_mode == InputMode::BillForm {
            return handle_bill_form_keys(event, bills_state);
        }
    }

    // Priority 2: Bill detail popup
    if let Screen::Bills(bills_state) = state.current_screen() {
        if bills_state.input_mode == InputMode::BillDetail {
            return match key {
                Key::Esc | Key::Enter | Key::Char('q') => Some(AppCommand::CloseBillDetail),
                _ => None,
            };
        }
    }

    // Priority 3: Provider creation form
    if let Screen::Providers(providers_state) = state.current_screen() {
        if providers_state.input_mode == InputMode::ProviderForm {
            return handle_provider_form_keys(event, providers_state);
        }
    }

    // Priority 4: Incremental search mode on either list screen
    match state.current_screen() {
        Screen::Bills(bills_state) => {
            if bills_state.input_mode == InputMode::Search {
                return match key {
                    Key::Enter => Some(AppCommand::ExitSearchMode),
                    Key::Backspace => Some(AppCommand::DeleteSearchChar),
                    Key::Char(c) => Some(AppCommand::AppendSearchChar(c)),
                    Key::Esc => Some(AppCommand::ClearSearch),
                    _ => None,
                };
            }
        }
        Screen::Providers(providers_state) => {
            if providers_state.input_mode == InputMode::Search {
                return match key {
                    Key::Enter => Some(AppCommand::ExitSearchMode),
                    Key::Backspace => Some(AppCommand::DeleteSearchChar),
                    Key::Char(c) => Some(AppCommand::AppendSearchChar(c)),
                    Key::Esc => Some(AppCommand::ClearSearch),
                    _ => None,
                };
            }
        }
        _ => {}
    }

    // Priority 5: Filter panel mode on the bills screen
    if let Screen::Bills(bills_state) = state.current_screen() {
        if bills_state.input_mode == InputMode::FilterPanel {
            return handle_filter_panel_keys(key, bills_state);
        }
    }

    // Priority 6: Help popup on top of everything else
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 7: Screen-specific Esc handling (clear search when not in search mode)
    match state.current_screen() {
        Screen::Bills(_) | Screen::Providers(_) => {
            if matches!(key, Key::Esc) {
                return Some(AppCommand::ClearSearch);
            }
        }
        _ => {}
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        // We have a pending key, handle the second key in the sequence
        return match (pending, key) {
            // 'g' followed by 'p' -> go to providers
            ('g', Key::Char('p')) => Some(AppCommand::LoadProviders {
                force_refresh: false,
            }),
            // 'g' followed by 'g' -> navigate to top of table
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Navigate to bottom: 'G' (Shift+g)
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),

        // Global back navigation (left/h)
        (_, Key::Left | Key::Char('h')) => Some(AppCommand::NavigateBack),

        // Bills screen
        (Screen::Bills(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Bills(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Bills(..), Key::Enter) => Some(AppCommand::ShowBillDetail),
        (Screen::Bills(..), Key::Char('/')) => Some(AppCommand::EnterSearchMode),
        (Screen::Bills(..), Key::Char('f')) => Some(AppCommand::EnterFilterPanel),
        (Screen::Bills(..), Key::Char('c')) => Some(AppCommand::ClearFilters),
        (Screen::Bills(..), Key::Char('s')) => Some(AppCommand::ToggleSortField),
        (Screen::Bills(..), Key::Char('S')) => Some(AppCommand::ToggleSortDirection),
        (Screen::Bills(..), Key::Char('a')) => Some(AppCommand::EnterBillCreateMode),
        (Screen::Bills(..), Key::Char('x')) => Some(AppCommand::ExportBills),
        (Screen::Bills(..), Key::Char('r')) => Some(AppCommand::LoadBills {
            force_refresh: true,
        }),

        // Providers screen
        (Screen::Providers(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Providers(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Providers(..), Key::Char('/')) => Some(AppCommand::EnterSearchMode),
        (Screen::Providers(..), Key::Char('a')) => Some(AppCommand::EnterProviderCreateMode),
        (Screen::Providers(..), Key::Char('r')) => Some(AppCommand::LoadProviders {
            force_refresh: true,
        }),

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),

        _ => None,
    }
}

/// Key handling inside the bill creation form
fn handle_bill_form_keys(event: KeyEvent, bills_state: &BillsState) -> Option<AppCommand> {
    let form = bills_state.form_state.as_ref()?;
    let key = event.key;

    // Ctrl shortcuts first
    if event.modifiers.ctrl {
        return match key {
            Key::Char('d') => Some(AppCommand::DeleteLastLineItem),
            Key::Char('u') => Some(AppCommand::ClearFormField),
            _ => None,
        };
    }

    match key {
        Key::Esc => Some(AppCommand::ExitBillCreateMode),
        Key::Tab => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab => Some(AppCommand::NavigateFormField { forward: false }),

        Key::Up => {
            if form.is_autocomplete_value_focused() {
                Some(AppCommand::SelectAutocompleteItem { up: true })
            } else {
                Some(AppCommand::NavigateFormField { forward: false })
            }
        }
        Key::Down => {
            if form.is_autocomplete_value_focused() {
                Some(AppCommand::SelectAutocompleteItem { up: false })
            } else {
                Some(AppCommand::NavigateFormField { forward: true })
            }
        }

        Key::Enter => {
            if form.is_autocomplete_value_focused() {
                Some(AppCommand::ConfirmAutocompleteSelection)
            } else if form.current_field.is_item_field() && form.current_item_complete() {
                Some(AppCommand::AddLineItem)
            } else {
                Some(AppCommand::SubmitBillForm)
            }
        }

        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),
        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),

        _ => None,
    }
}

/// Key handling inside the provider creation form
fn handle_provider_form_keys(
    event: KeyEvent,
    providers_state: &ProvidersState,
) -> Option<AppCommand> {
    providers_state.form_state.as_ref()?;
    let key = event.key;

    if event.modifiers.ctrl {
        return match key {
            Key::Char('u') => Some(AppCommand::ClearFormField),
            _ => None,
        };
    }

    match key {
        Key::Esc => Some(AppCommand::ExitProviderCreateMode),
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),
        Key::Enter => Some(AppCommand::SubmitProviderForm),
        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),
        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),
        _ => None,
    }
}

/// Key handling inside the filter panel
fn handle_filter_panel_keys(key: Key, bills_state: &BillsState) -> Option<AppCommand> {
    let field = bills_state.filter_panel.current_field;

    match key {
        Key::Enter => Some(AppCommand::ExitFilterPanel),
        Key::Esc => Some(AppCommand::ExitFilterPanel),
        Key::Tab | Key::Down => Some(AppCommand::NavigateFilterField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFilterField { forward: false }),

        // Provider/signer fields cycle through the known values;
        // date fields take typed input
        Key::Left => match field {
            FilterField::Provider | FilterField::Signer => {
                Some(AppCommand::CycleFilterChoice { forward: false })
            }
            _ => None,
        },
        Key::Right => match field {
            FilterField::Provider | FilterField::Signer => {
                Some(AppCommand::CycleFilterChoice { forward: true })
            }
            _ => None,
        },

        Key::Char('c') if matches!(field, FilterField::Provider | FilterField::Signer) => {
            Some(AppCommand::ClearFilters)
        }
        Key::Char(c) => match field {
            FilterField::StartDate | FilterField::EndDate => {
                Some(AppCommand::AppendFilterChar(c))
            }
            _ => None,
        },
        Key::Backspace => match field {
            FilterField::StartDate | FilterField::EndDate => Some(AppCommand::DeleteFilterChar),
            _ => None,
        },

        _ => None,
    }
}
