use chrono::{Local, TimeZone, Utc};
use sabzi::events::DataEvent;
use sabzi::input::{Key, KeyEvent};
use sabzi::state::InputMode;
use sabzi::testing::TestApp;
use sabzi::ui::screens::Screen;
use std::time::{Duration, Instant};

use fresh_api::endpoints::bills::{Bill, LineItem};
use fresh_api::endpoints::providers::Provider;
use fresh_api::endpoints::signers::Signer;
use fresh_api::endpoints::vegetables::Vegetable;
use fresh_api::endpoints::Amount;

fn line_item(name: &str, quantity: f64, price: f64) -> LineItem {
    LineItem {
        id: format!("item-{}", name.to_lowercase()),
        name: name.to_string(),
        quantity,
        price,
        item_total: quantity * price,
    }
}

fn bill(id: &str, provider_id: &str, provider_name: &str, total: &str, ymd: (i32, u32, u32)) -> Bill {
    // Noon local time keeps day-truncation stable regardless of timezone
    let date = Local
        .with_ymd_and_hms(ymd.0, ymd.1, ymd.2, 12, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    Bill {
        id: id.to_string(),
        provider_id: provider_id.to_string(),
        provider_name: provider_name.to_string(),
        items: vec![line_item("Tomato", 2.0, 30.0)],
        signer: "DK".to_string(),
        total: Amount::new(total),
        date,
        created_at: date,
    }
}

fn provider(id: &str, name: &str) -> Provider {
    Provider {
        id: id.to_string(),
        name: name.to_string(),
        mobile: "9876543210".to_string(),
        address: "Market Rd".to_string(),
        created_at: Utc::now(),
    }
}

fn signer(id: &str, name: &str) -> Signer {
    Signer {
        id: id.to_string(),
        name: name.to_string(),
        created_at: Utc::now(),
    }
}

fn vegetable(name: &str, is_available: bool) -> Vegetable {
    Vegetable {
        id: name.to_lowercase(),
        name: name.to_string(),
        is_available,
        created_at: Utc::now(),
    }
}

fn bills_state(app: &TestApp) -> &sabzi::state::BillsState {
    match app.state().current_screen() {
        Screen::Bills(state) => state,
        other => panic!("Expected bills screen, got {:?}", other),
    }
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();

    // Initially should not quit
    app.assert_not_quit();

    // Press 'q' to quit
    app.send_key(Key::Char('q'));

    // Assert app should quit
    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();

    // Initially help is hidden
    assert!(!app.state().help_visible);

    // Press '?' to show help
    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Press '?' again to hide
    app.send_key(Key::Char('?'));
    assert!(!app.state().help_visible);

    // Press '?' again to show
    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    // Press 'Esc' to hide
    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_multi_key_sequence_gg() {
    let mut app = TestApp::new();

    // Initially no pending key
    assert_eq!(app.state().pending_key, None);

    // First 'g' sets pending key
    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    // Second 'g' triggers navigate to top and clears pending
    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, None);
}

#[test]
fn test_multi_key_sequence_gl_navigates_to_logs() {
    let mut app = TestApp::new();

    app.send_key(Key::Char('g'));
    app.send_key(Key::Char('l'));

    app.assert_screen_type(std::mem::discriminant(&Screen::Logs(
        sabzi::state::LogsState::default(),
    )));

    // 'h' navigates back to bills
    app.send_key(Key::Char('h'));
    app.assert_screen_type(std::mem::discriminant(&Screen::Bills(Box::default())));
}

#[test]
fn test_bills_load_and_navigation() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::BillsLoaded {
        bills: vec![
            bill("b1", "p1", "Ram Traders", "60", (2024, 1, 1)),
            bill("b2", "p2", "Shyam Vegetables", "40", (2024, 2, 1)),
            bill("b3", "p1", "Ram Traders", "25", (2024, 3, 1)),
        ],
    });

    let state = bills_state(&app);
    assert_eq!(state.bills.len(), 3);
    // Default list order is most recent first
    assert_eq!(state.bills[0].id, "b3");

    // j/k move the selection (first press selects the top row)
    app.send_key(Key::Down);
    app.send_key(Key::Down);
    let state = bills_state(&app);
    assert_eq!(state.table_state.borrow().selected(), Some(1));
}

#[test]
fn test_search_filters_by_provider_and_item_name() {
    let mut app = TestApp::new();

    let mut chili_bill = bill("b2", "p2", "Shyam Vegetables", "40", (2024, 2, 1));
    chili_bill.items = vec![line_item("Green Chili", 1.0, 15.0)];

    app.send_data_event(DataEvent::BillsLoaded {
        bills: vec![
            bill("b1", "p1", "Ram Traders", "60", (2024, 1, 1)),
            chili_bill,
        ],
    });

    // '/' enters search mode, then type a provider fragment
    app.send_key(Key::Char('/'));
    assert_eq!(bills_state(&app).input_mode, InputMode::Search);
    app.type_str("ram");

    let state = bills_state(&app);
    let filtered = state.filtered_bills();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "b1");

    // Esc clears the search
    app.send_key(Key::Esc);
    let state = bills_state(&app);
    assert_eq!(state.search_query, "");
    assert_eq!(state.filtered_bills().len(), 2);

    // Search also matches line item names
    app.send_key(Key::Char('/'));
    app.type_str("chili");
    let state = bills_state(&app);
    let filtered = state.filtered_bills();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "b2");
}

#[test]
fn test_filter_panel_provider_selection() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::ProvidersLoaded {
        providers: vec![provider("p1", "Ram Traders"), provider("p2", "Shyam Vegetables")],
    });
    app.send_data_event(DataEvent::BillsLoaded {
        bills: vec![
            bill("b1", "p1", "Ram Traders", "10", (2024, 1, 1)),
            bill("b2", "p2", "Shyam Vegetables", "20", (2024, 2, 1)),
        ],
    });

    // Open the filter panel and pick the first provider
    app.send_key(Key::Char('f'));
    assert_eq!(bills_state(&app).input_mode, InputMode::FilterPanel);
    app.send_key(Key::Right);
    app.send_key(Key::Enter);

    let state = bills_state(&app);
    assert_eq!(state.input_mode, InputMode::Normal);
    let filtered = state.filtered_bills();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "b1");

    // 'c' clears all filters
    app.send_key(Key::Char('c'));
    assert_eq!(bills_state(&app).filtered_bills().len(), 2);
}

#[test]
fn test_filter_panel_date_range() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::BillsLoaded {
        bills: vec![
            bill("b1", "p1", "Ram Traders", "10", (2024, 1, 1)),
            bill("b2", "p2", "Shyam Vegetables", "20", (2024, 2, 1)),
        ],
    });

    // Move to the start-date field (Provider -> Signer -> StartDate) and
    // type the range; separators are auto-inserted
    app.send_key(Key::Char('f'));
    app.send_keys(&[Key::Tab, Key::Tab]);
    app.type_str("20240115");
    app.send_key(Key::Tab);
    app.type_str("20240215");
    app.send_key(Key::Enter);

    let state = bills_state(&app);
    assert_eq!(state.filter_panel.start_date_input, "2024-01-15");
    assert_eq!(state.filter_panel.end_date_input, "2024-02-15");

    let filtered = state.filtered_bills();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "b2");
}

#[test]
fn test_half_typed_filter_date_is_ignored() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::BillsLoaded {
        bills: vec![
            bill("b1", "p1", "Ram Traders", "10", (2024, 1, 1)),
            bill("b2", "p2", "Shyam Vegetables", "20", (2024, 2, 1)),
        ],
    });

    app.send_key(Key::Char('f'));
    app.send_keys(&[Key::Tab, Key::Tab]);
    app.type_str("2024-0"); // incomplete
    app.send_key(Key::Enter);

    // An incomplete date is no constraint, not an error
    assert_eq!(bills_state(&app).filtered_bills().len(), 2);
}

#[test]
fn test_sort_toggles() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::BillsLoaded {
        bills: vec![
            bill("b1", "p1", "Ram Traders", "10", (2024, 1, 3)),
            bill("b2", "p2", "Shyam Vegetables", "30", (2024, 1, 1)),
            bill("b3", "p3", "Mohan Farms", "20", (2024, 1, 2)),
        ],
    });

    // Default: date desc
    let ids: Vec<_> = bills_state(&app)
        .filtered_bills()
        .iter()
        .map(|b| b.id.clone())
        .collect();
    assert_eq!(ids, ["b1", "b3", "b2"]);

    // 's' switches the field to amount (still desc)
    app.send_key(Key::Char('s'));
    let ids: Vec<_> = bills_state(&app)
        .filtered_bills()
        .iter()
        .map(|b| b.id.clone())
        .collect();
    assert_eq!(ids, ["b2", "b3", "b1"]);

    // 'S' flips the direction
    app.send_key(Key::Char('S'));
    let ids: Vec<_> = bills_state(&app)
        .filtered_bills()
        .iter()
        .map(|b| b.id.clone())
        .collect();
    assert_eq!(ids, ["b1", "b3", "b2"]);
}

#[test]
fn test_empty_bill_list_with_filters_does_not_panic() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    app.send_key(Key::Char('/'));
    app.type_str("anything");
    assert!(bills_state(&app).filtered_bills().is_empty());

    app.send_key(Key::Enter);
    app.send_key(Key::Char('s'));
    assert!(bills_state(&app).filtered_bills().is_empty());
}

#[test]
fn test_bill_detail_popup() {
    let mut app = TestApp::new();

    // Cache-load events select the first row, as on startup
    app.send_data_event(DataEvent::BillsCacheLoaded {
        bills: vec![bill("b1", "p1", "Ram Traders", "60", (2024, 1, 1))],
    });

    app.send_key(Key::Enter);
    let state = bills_state(&app);
    assert_eq!(state.input_mode, InputMode::BillDetail);
    assert_eq!(state.detail_bill_id.as_deref(), Some("b1"));

    app.send_key(Key::Esc);
    let state = bills_state(&app);
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(state.detail_bill_id, None);
}

#[test]
fn test_bill_form_flow_with_autocomplete_and_submit() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::ProvidersLoaded {
        providers: vec![provider("p1", "Ram Traders")],
    });
    app.send_data_event(DataEvent::SignersLoaded {
        signers: vec![signer("s1", "DK")],
    });
    app.send_data_event(DataEvent::VegetablesLoaded {
        vegetables: vec![vegetable("Tomato", true)],
    });
    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    // 'a' opens the form with the provider dropdown pre-populated
    app.send_key(Key::Char('a'));
    {
        let state = bills_state(&app);
        assert_eq!(state.input_mode, InputMode::BillForm);
        let form = state.form_state.as_ref().unwrap();
        assert_eq!(form.filtered_providers.len(), 1);
    }

    // Enter confirms the highlighted provider
    app.send_key(Key::Enter);
    assert_eq!(
        bills_state(&app).form_state.as_ref().unwrap().provider,
        "Ram Traders"
    );

    // Signer
    app.send_key(Key::Tab);
    app.type_str("DK");

    // Date defaults to today; skip it, then enter the item row
    app.send_key(Key::Tab);
    app.send_key(Key::Tab);
    app.type_str("Tomato");
    app.send_key(Key::Tab);
    app.type_str("2");
    app.send_key(Key::Tab);
    app.type_str("30");

    // Enter accepts the completed item row
    app.send_key(Key::Enter);
    {
        let state = bills_state(&app);
        let form = state.form_state.as_ref().unwrap();
        assert_eq!(form.items.len(), 1);
        assert_eq!(form.items[0].item_total, 60.0);
        assert_eq!(form.item_name, "");
        assert_eq!(form.items_total(), 60.0);
    }

    // Enter on the (now empty) item row submits; in sync mode validation
    // passes and the create is left to an injected event
    app.send_key(Key::Enter);
    assert!(bills_state(&app)
        .form_state
        .as_ref()
        .unwrap()
        .validation_error
        .is_none());

    app.send_data_event(DataEvent::BillCreated {
        bill: bill("b-new", "p1", "Ram Traders", "60", (2024, 5, 1)),
    });

    let state = bills_state(&app);
    assert_eq!(state.input_mode, InputMode::Normal);
    assert!(state.form_state.is_none());
    assert_eq!(state.bills.len(), 1);
    assert_eq!(state.bills[0].id, "b-new");
}

#[test]
fn test_bill_form_rejects_unknown_provider() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::ProvidersLoaded {
        providers: vec![provider("p1", "Ram Traders")],
    });
    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    app.send_key(Key::Char('a'));
    app.type_str("Nobody In Particular");
    // Move off the provider field so Enter submits instead of confirming
    // the (empty) dropdown
    app.send_key(Key::Tab);
    app.type_str("DK");
    app.send_key(Key::Enter);

    let state = bills_state(&app);
    let form = state.form_state.as_ref().unwrap();
    let error = form.validation_error.as_ref().unwrap();
    assert!(error.contains("Unknown provider"), "got: {}", error);
}

#[test]
fn test_suggestions_debounce_collapses_rapid_typing() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::VegetablesLoaded {
        vegetables: vec![vegetable("Apple Gourd", true), vegetable("Carrot", true)],
    });
    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    app.send_key(Key::Char('a'));
    // Move to the item name field: Provider -> Signer -> Date -> ItemName
    app.send_keys(&[Key::Tab, Key::Tab, Key::Tab]);

    let start = Instant::now();
    app.type_str("app");

    // Before the quiet period nothing fires
    assert!(!app.tick_suggestions(start + Duration::from_millis(100)));

    // One computation for the whole burst, over the final query
    assert!(app.tick_suggestions(start + Duration::from_millis(700)));
    {
        let state = bills_state(&app);
        let form = state.form_state.as_ref().unwrap();
        assert_eq!(form.suggestion.search_query, "app");
        assert_eq!(form.suggestion.suggestions.len(), 1);
        assert_eq!(form.suggestion.suggestions[0].name, "Apple Gourd");
    }

    // And only one
    assert!(!app.tick_suggestions(start + Duration::from_millis(1400)));
}

#[test]
fn test_suggestions_require_two_characters() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::VegetablesLoaded {
        vegetables: vec![vegetable("Carrot", true)],
    });
    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    app.send_key(Key::Char('a'));
    app.send_keys(&[Key::Tab, Key::Tab, Key::Tab]);

    let start = Instant::now();
    app.type_str("c");
    assert!(app.tick_suggestions(start + Duration::from_secs(1)));
    assert!(bills_state(&app)
        .form_state
        .as_ref()
        .unwrap()
        .suggestion
        .suggestions
        .is_empty());
}

#[test]
fn test_suggestions_respect_availability() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::VegetablesLoaded {
        vegetables: vec![vegetable("Carrot", true), vegetable("Cardamom", false)],
    });
    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    app.send_key(Key::Char('a'));
    app.send_keys(&[Key::Tab, Key::Tab, Key::Tab]);

    let start = Instant::now();
    app.type_str("car");
    assert!(app.tick_suggestions(start + Duration::from_secs(1)));

    let state = bills_state(&app);
    let form = state.form_state.as_ref().unwrap();
    // The item-entry flow only surfaces in-stock entries
    assert_eq!(form.suggestion.suggestions.len(), 1);
    assert_eq!(form.suggestion.suggestions[0].name, "Carrot");
}

#[test]
fn test_escape_cancels_pending_suggestions() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::VegetablesLoaded {
        vegetables: vec![vegetable("Carrot", true)],
    });
    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    app.send_key(Key::Char('a'));
    app.send_keys(&[Key::Tab, Key::Tab, Key::Tab]);

    let start = Instant::now();
    app.type_str("car");

    // Esc closes the form before the debounce fires; nothing may surface
    app.send_key(Key::Esc);
    assert!(bills_state(&app).form_state.is_none());
    assert!(!app.tick_suggestions(start + Duration::from_secs(1)));
}

#[test]
fn test_ctrl_d_removes_last_item() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::ProvidersLoaded {
        providers: vec![provider("p1", "Ram Traders")],
    });
    app.send_data_event(DataEvent::BillsLoaded { bills: vec![] });

    app.send_key(Key::Char('a'));
    app.send_keys(&[Key::Tab, Key::Tab, Key::Tab]);
    app.type_str("Okra");
    app.send_key(Key::Tab);
    app.type_str("1");
    app.send_key(Key::Tab);
    app.type_str("40");
    app.send_key(Key::Enter);
    assert_eq!(bills_state(&app).form_state.as_ref().unwrap().items.len(), 1);

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('d')));
    assert_eq!(bills_state(&app).form_state.as_ref().unwrap().items.len(), 0);
}

#[test]
fn test_export_status_line() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::BillsLoaded {
        bills: vec![bill("b1", "p1", "Ram Traders", "60", (2024, 1, 1))],
    });

    app.send_data_event(DataEvent::ExportFinished {
        path: std::path::PathBuf::from("/tmp/bills_2024.csv"),
    });
    let status = bills_state(&app).export_status.clone().unwrap();
    assert!(status.contains("bills_2024.csv"));

    app.send_data_event(DataEvent::ExportFailed {
        error: "disk full".to_string(),
    });
    let status = bills_state(&app).export_status.clone().unwrap();
    assert!(status.contains("disk full"));
}

#[test]
fn test_provider_events_update_bills_reference_data() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::ProvidersLoaded {
        providers: vec![provider("p1", "Ram Traders")],
    });
    assert_eq!(bills_state(&app).providers.len(), 1);

    // A provider created elsewhere becomes available for bill entry
    app.send_data_event(DataEvent::ProviderCreated {
        provider: provider("p2", "Shyam Vegetables"),
    });
    assert_eq!(bills_state(&app).providers.len(), 2);
}

#[test]
fn test_load_error_surfaces_on_bills_screen() {
    let mut app = TestApp::new();

    app.send_data_event(DataEvent::LoadError {
        error: "connection refused".to_string(),
    });

    match &bills_state(&app).bills_loading {
        sabzi::state::LoadingState::Error(message) => {
            assert!(message.contains("connection refused"))
        }
        other => panic!("Expected error loading state, got {:?}", other),
    }
}
