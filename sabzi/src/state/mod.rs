pub mod autocomplete;
pub mod filter;
pub mod reducer;
pub mod suggest;
pub mod validators;

use crate::ui::screens::Screen;
use self::filter::{FilterCriteria, SortCriteria};
use fresh_api::endpoints::{
    bills::{Bill, NewLineItem},
    providers::Provider,
    signers::Signer,
    vegetables::Vegetable,
};
use itertools::Itertools;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use std::time::Instant;
use self::suggest::SuggestionState;
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

/// Represents input mode for screens that support editing
#[derive(Default, Debug, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    FilterPanel,
    BillForm,
    BillDetail,
    ProviderForm,
}

/// Focused field on the bill filter panel
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum FilterField {
    #[default]
    Provider,
    Signer,
    StartDate,
    EndDate,
}

impl FilterField {
    pub fn next(&self) -> Self {
        match self {
            Self::Provider => Self::Signer,
            Self::Signer => Self::StartDate,
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::Provider,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Provider => Self::EndDate,
            Self::Signer => Self::Provider,
            Self::StartDate => Self::Signer,
            Self::EndDate => Self::StartDate,
        }
    }
}

/// UI state behind the filter panel. The panel edits pickers and raw date
/// text; [`FilterPanelState::criteria`] turns that into typed criteria,
/// dropping anything malformed.
#[derive(Default, Debug, Clone)]
pub struct FilterPanelState {
    pub current_field: FilterField,
    /// Index into the provider list; `None` selects all providers
    pub provider_index: Option<usize>,
    /// Index into the signer list; `None` selects all signers
    pub signer_index: Option<usize>,
    pub start_date_input: String,
    pub end_date_input: String,
}

impl FilterPanelState {
    /// Build typed criteria from the panel selections. Half-typed or
    /// invalid dates become "no constraint" rather than an error.
    pub fn criteria(&self, providers: &[Provider], signers: &[Signer]) -> FilterCriteria {
        FilterCriteria {
            provider_id: self
                .provider_index
                .and_then(|i| providers.get(i))
                .map(|p| p.id.clone()),
            signer: self
                .signer_index
                .and_then(|i| signers.get(i))
                .map(|s| s.name.clone()),
            start_date: filter::parse_date_input(&self.start_date_input),
            end_date: filter::parse_date_input(&self.end_date_input),
            search_text: None,
        }
    }

    pub fn clear(&mut self) {
        self.provider_index = None;
        self.signer_index = None;
        self.start_date_input.clear();
        self.end_date_input.clear();
    }

    pub fn is_active(&self) -> bool {
        self.provider_index.is_some()
            || self.signer_index.is_some()
            || !self.start_date_input.is_empty()
            || !self.end_date_input.is_empty()
    }
}

/// Form field for bill creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Provider,
    Signer,
    Date,
    ItemName,
    ItemQty,
    ItemPrice,
}

impl FormField {
    pub fn is_item_field(&self) -> bool {
        matches!(self, Self::ItemName | Self::ItemQty | Self::ItemPrice)
    }
}

/// State for the bill creation form
#[derive(Debug, Clone)]
pub struct BillFormState {
    pub current_field: FormField,
    pub provider: String, // Text input for autocomplete
    pub signer: String,
    pub date: String, // YYYY-MM-DD format

    // Current line item entry row
    pub item_name: String,
    pub item_qty: String,
    pub item_price: String,
    pub items: Vec<NewLineItem>,

    // Provider autocomplete state
    pub filtered_providers: Vec<Provider>,
    pub provider_selection_index: usize,

    // Vegetable autocomplete (debounced) for the item name input
    pub suggestion: SuggestionState,

    // Validation errors
    pub validation_error: Option<String>,
}

impl BillFormState {
    pub fn new() -> Self {
        // Default date to today
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();

        Self {
            current_field: FormField::Provider,
            provider: String::new(),
            signer: String::new(),
            date: today,
            item_name: String::new(),
            item_qty: String::new(),
            item_price: String::new(),
            items: Vec::new(),
            filtered_providers: Vec::new(),
            provider_selection_index: 0,
            // Only in-stock catalog entries are offered while entering items
            suggestion: SuggestionState::new(true),
            validation_error: None,
        }
    }

    /// Running total over the accepted line items.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|i| i.item_total).sum()
    }

    pub fn current_item_complete(&self) -> bool {
        !self.item_name.is_empty() && !self.item_qty.is_empty() && !self.item_price.is_empty()
    }

    pub fn is_autocomplete_value_focused(&self) -> bool {
        match self.current_field {
            FormField::Provider => !self.filtered_providers.is_empty(),
            FormField::ItemName => !self.suggestion.suggestions.is_empty(),
            _ => false,
        }
    }
}

impl Default for BillFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Form field for provider creation
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub enum ProviderFormField {
    #[default]
    Name,
    Contact,
    Address,
}

impl ProviderFormField {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Contact,
            Self::Contact => Self::Address,
            Self::Address => Self::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Name => Self::Address,
            Self::Contact => Self::Name,
            Self::Address => Self::Contact,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct ProviderFormState {
    pub current_field: ProviderFormField,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub validation_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Bills(Box::default())],

            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.current_screen_mut() {
            Screen::Bills(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.bills_loading {
                    return Some(throbber_state);
                }
            }
            Screen::Providers(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.providers_loading {
                    return Some(throbber_state);
                }
            }
            Screen::Logs(_) => {
                // Logs screen has no loading state
            }
        }
        None
    }

    /// Drive the suggestion debounce from the app loop's interval tick.
    /// Returns true when a suggestion list was recomputed (redraw needed).
    pub fn tick_suggestions(&mut self, now: Instant) -> bool {
        if let Screen::Bills(bills_state) = self.current_screen_mut() {
            let BillsState {
                form_state,
                vegetables,
                ..
            } = &mut **bills_state;
            if let Some(form) = form_state {
                return form.suggestion.poll(vegetables, now);
            }
        }
        false
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct BillsState {
    pub bills: Vec<Bill>,
    pub bills_loading: LoadingState,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,

    // Filtering and ordering
    pub search_query: String,
    pub filter_panel: FilterPanelState,
    pub sort: SortCriteria,

    // Bill creation form and its reference data
    pub form_state: Option<BillFormState>,
    pub providers: Vec<Provider>,
    pub signers: Vec<Signer>,
    pub vegetables: Vec<Vegetable>,

    // Detail popup
    pub detail_bill_id: Option<String>,

    // Last export outcome, shown in the status line
    pub export_status: Option<String>,
}

impl Default for BillsState {
    fn default() -> Self {
        Self {
            bills: Vec::default(),
            bills_loading: LoadingState::default(),
            table_state: RefCell::default(),
            input_mode: InputMode::default(),
            search_query: String::default(),
            filter_panel: FilterPanelState::default(),
            sort: SortCriteria::default(),
            form_state: Option::default(),
            providers: Vec::default(),
            signers: Vec::default(),
            vegetables: Vec::default(),
            detail_bill_id: Option::default(),
            export_status: Option::default(),
        }
    }
}

impl BillsState {
    /// The criteria currently in effect: panel selections plus search text.
    pub fn active_criteria(&self) -> FilterCriteria {
        self.filter_panel
            .criteria(&self.providers, &self.signers)
            .search(&self.search_query)
    }

    /// Returns the bill list narrowed by the active criteria and ordered by
    /// the current sort.
    pub fn filtered_bills(&self) -> Vec<&Bill> {
        filter::filter_and_sort(&self.bills, &self.active_criteria(), Some(self.sort))
    }

    pub fn selected_bill(&self) -> Option<&Bill> {
        let selected = self.table_state.borrow().selected()?;
        self.filtered_bills().get(selected).copied()
    }
}

#[derive(Debug, Clone)]
pub struct ProvidersState {
    pub providers: Vec<Provider>,
    pub providers_loading: LoadingState,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub filter_query: String,
    pub form_state: Option<ProviderFormState>,
}

impl Default for ProvidersState {
    fn default() -> Self {
        Self {
            providers: Vec::default(),
            providers_loading: LoadingState::default(),
            table_state: RefCell::default(),
            input_mode: InputMode::default(),
            filter_query: String::default(),
            form_state: Option::default(),
        }
    }
}

impl ProvidersState {
    /// Returns filtered providers based on the current filter query.
    pub fn filtered_providers(&self) -> Vec<&Provider> {
        let providers: Vec<_> = self
            .providers
            .iter()
            .sorted_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .collect();

        if self.filter_query.is_empty() {
            return providers;
        }

        let query_lower = self.filter_query.to_lowercase();
        providers
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query_lower)
                    || p.mobile.contains(&query_lower)
                    || p.address.to_lowercase().contains(&query_lower)
            })
            .collect()
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select_last();
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }
}

impl Scrollable for BillsState {
    fn num_items(&self) -> usize {
        self.filtered_bills().len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for ProvidersState {
    fn num_items(&self) -> usize {
        self.filtered_providers().len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
