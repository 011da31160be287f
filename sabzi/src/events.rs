use fresh_api::endpoints::{
    bills::Bill, providers::Provider, signers::Signer, vegetables::Vegetable,
};
use std::path::PathBuf;

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,

    // Data loading
    LoadBills {
        force_refresh: bool,
    },
    LoadProviders {
        force_refresh: bool,
    },
    LoadSigners,
    LoadVegetables,

    // Search mode (free text over the bill list)
    EnterSearchMode,
    ExitSearchMode,
    AppendSearchChar(char),
    DeleteSearchChar,
    ClearSearch,

    // Filter panel (provider / signer / date range)
    EnterFilterPanel,
    ExitFilterPanel,
    NavigateFilterField {
        forward: bool,
    },
    CycleFilterChoice {
        forward: bool,
    },
    AppendFilterChar(char),
    DeleteFilterChar,
    ClearFilters,

    // Sorting
    ToggleSortField,
    ToggleSortDirection,

    // Bill detail popup
    ShowBillDetail,
    CloseBillDetail,

    // Export of the currently filtered view
    ExportBills,

    // Bill creation form
    EnterBillCreateMode,
    ExitBillCreateMode,
    NavigateFormField {
        forward: bool,
    },
    AppendFormFieldChar {
        c: char,
    },
    DeleteFormFieldChar,
    ClearFormField,
    SelectAutocompleteItem {
        up: bool,
    },
    ConfirmAutocompleteSelection,
    AddLineItem,
    DeleteLastLineItem,
    SubmitBillForm,

    // Provider creation form
    EnterProviderCreateMode,
    ExitProviderCreateMode,
    SubmitProviderForm,

    // View toggles
    ToggleHelp,

    // Log screen
    NavigateToLogs,
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Cache events (instant)
    BillsCacheLoaded {
        bills: Vec<Bill>,
    },
    ProvidersCacheLoaded {
        providers: Vec<Provider>,
    },
    SignersCacheLoaded {
        signers: Vec<Signer>,
    },
    VegetablesCacheLoaded {
        vegetables: Vec<Vegetable>,
    },

    // API events (slower)
    BillsLoaded {
        bills: Vec<Bill>,
    },
    ProvidersLoaded {
        providers: Vec<Provider>,
    },
    SignersLoaded {
        signers: Vec<Signer>,
    },
    VegetablesLoaded {
        vegetables: Vec<Vegetable>,
    },

    // Bill creation
    BillCreated {
        bill: Bill,
    },
    BillCreateFailed {
        error: String,
    },

    // Provider creation
    ProviderCreated {
        provider: Provider,
    },
    ProviderCreateFailed {
        error: String,
    },

    // Catalog growth (new item name saved while adding a line item)
    VegetableCreated {
        vegetable: Vegetable,
    },

    // Export
    ExportFinished {
        path: PathBuf,
    },
    ExportFailed {
        error: String,
    },

    // Errors
    LoadError {
        error: String,
    },
}
