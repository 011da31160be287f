pub mod autocomplete_input;
pub mod bill_detail;
pub mod bill_form;
pub mod empty_state;
pub mod filter_panel;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod popup;
pub mod provider_form;
pub mod screen_title;
pub mod search_input;
