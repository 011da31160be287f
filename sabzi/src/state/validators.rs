use crate::state::{BillFormState, ProviderFormState};
use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use fresh_api::endpoints::{
    bills::{NewBill, NewLineItem},
    providers::{NewProvider, Provider},
    vegetables::Vegetable,
};
use uuid::Uuid;

/// Validate and build a NewBill from form state
pub fn validate_and_build_bill(
    form: &BillFormState,
    providers: &[Provider],
) -> Result<NewBill, String> {
    let provider = resolve_provider(&form.provider, providers)?;

    if form.signer.trim().is_empty() {
        return Err("Signer cannot be empty".to_string());
    }

    let date = validate_date(&form.date)?;

    if form.items.is_empty() {
        return Err("Add at least one item".to_string());
    }

    // The stored total is the sum of the line items; readers trust it and
    // never re-derive it
    let total: f64 = form.items.iter().map(|i| i.item_total).sum();

    Ok(NewBill {
        provider_id: provider.id.clone(),
        provider_name: provider.name.clone(),
        items: form.items.clone(),
        total,
        signer: form.signer.trim().to_string(),
        date,
    })
}

/// Validate the current item entry row and build a line item from it
pub fn validate_and_build_line_item(
    name: &str,
    quantity: &str,
    price: &str,
) -> Result<NewLineItem, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Item name cannot be empty".to_string());
    }

    let quantity = validate_positive_number(quantity, "quantity")?;
    let price = validate_positive_number(price, "price")?;

    Ok(NewLineItem::new(
        Uuid::new_v4().to_string(),
        name,
        quantity,
        price,
    ))
}

/// Validate and build a NewProvider from form state
pub fn validate_and_build_provider(form: &ProviderFormState) -> Result<NewProvider, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Provider name cannot be empty".to_string());
    }

    let contact = form.contact.trim();
    if contact.is_empty() {
        return Err("Contact number cannot be empty".to_string());
    }
    if !contact.chars().all(|c| c.is_ascii_digit()) {
        return Err("Contact number must be digits only".to_string());
    }

    Ok(NewProvider {
        name: name.to_string(),
        contact: contact.to_string(),
        address: form.address.trim().to_string(),
    })
}

/// Item names on the form that are not in the catalog yet. These get saved
/// as new catalog entries when the bill is submitted.
pub fn unknown_item_names(form: &BillFormState, catalog: &[Vegetable]) -> Vec<String> {
    form.items
        .iter()
        .map(|i| i.name.as_str())
        .filter(|name| !catalog.iter().any(|v| v.name.eq_ignore_ascii_case(name)))
        .map(str::to_string)
        .collect()
}

fn validate_date(date_str: &str) -> Result<chrono::DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| "Invalid date. Use format: YYYY-MM-DD".to_string())?;

    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| "Invalid date. Use format: YYYY-MM-DD".to_string())
}

fn validate_positive_number(input: &str, label: &str) -> Result<f64, String> {
    if input.is_empty() {
        return Err(format!("Item {} cannot be empty", label));
    }

    let value: f64 = input
        .parse()
        .map_err(|_| format!("Invalid {}. Enter a number (e.g., 2.5)", label))?;

    if value <= 0.0 || !value.is_finite() {
        return Err(format!("Item {} must be greater than zero", label));
    }

    Ok(value)
}

fn resolve_provider<'a>(input: &str, providers: &'a [Provider]) -> Result<&'a Provider, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Provider cannot be empty".to_string());
    }

    // Exact match by name (case-insensitive); bills must reference a known
    // provider id, so free text that matches nothing is rejected
    providers
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(input))
        .ok_or_else(|| format!("Unknown provider '{}'. Pick one from the list", input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn provider(id: &str, name: &str) -> Provider {
        Provider {
            id: id.to_string(),
            name: name.to_string(),
            mobile: "9876543210".to_string(),
            address: "Market Rd".to_string(),
            created_at: Utc::now(),
        }
    }

    fn form_with_items() -> BillFormState {
        let mut form = BillFormState::new();
        form.provider = "Ram Traders".to_string();
        form.signer = "DK".to_string();
        form.date = "2025-06-01".to_string();
        form.items = vec![
            validate_and_build_line_item("Tomato", "2", "30").unwrap(),
            validate_and_build_line_item("Okra", "1.5", "40").unwrap(),
        ];
        form
    }

    #[test]
    fn builds_bill_with_total_as_item_sum() {
        let providers = vec![provider("p1", "Ram Traders")];
        let bill = validate_and_build_bill(&form_with_items(), &providers).unwrap();

        assert_eq!(bill.provider_id, "p1");
        assert_eq!(bill.total, 2.0 * 30.0 + 1.5 * 40.0);
        assert_eq!(bill.date.with_timezone(&Local).year(), 2025);
    }

    #[test]
    fn provider_resolution_is_case_insensitive_but_strict() {
        let providers = vec![provider("p1", "Ram Traders")];

        let mut form = form_with_items();
        form.provider = "ram traders".to_string();
        assert!(validate_and_build_bill(&form, &providers).is_ok());

        form.provider = "Unknown Vendor".to_string();
        let err = validate_and_build_bill(&form, &providers).unwrap_err();
        assert!(err.contains("Unknown provider"));
    }

    #[test]
    fn rejects_empty_items_and_bad_dates() {
        let providers = vec![provider("p1", "Ram Traders")];

        let mut form = form_with_items();
        form.items.clear();
        assert!(validate_and_build_bill(&form, &providers)
            .unwrap_err()
            .contains("at least one item"));

        let mut form = form_with_items();
        form.date = "01/06/2025".to_string();
        assert!(validate_and_build_bill(&form, &providers)
            .unwrap_err()
            .contains("Invalid date"));
    }

    #[test]
    fn line_item_validation() {
        let item = validate_and_build_line_item("Tomato", "2.5", "12").unwrap();
        assert_eq!(item.item_total, 30.0);
        assert!(!item.id.is_empty());

        assert!(validate_and_build_line_item("", "2", "12").is_err());
        assert!(validate_and_build_line_item("Tomato", "0", "12").is_err());
        assert!(validate_and_build_line_item("Tomato", "2", "-1").is_err());
        assert!(validate_and_build_line_item("Tomato", "x", "12").is_err());
    }

    #[test]
    fn provider_form_validation() {
        let mut form = ProviderFormState::default();
        form.name = "Ram Traders".to_string();
        form.contact = "9876543210".to_string();
        form.address = "Market Rd".to_string();
        assert!(validate_and_build_provider(&form).is_ok());

        form.contact = "98-76".to_string();
        assert!(validate_and_build_provider(&form)
            .unwrap_err()
            .contains("digits"));
    }

    #[test]
    fn unknown_items_are_detected_case_insensitively() {
        let mut form = BillFormState::new();
        form.items = vec![
            validate_and_build_line_item("Tomato", "1", "10").unwrap(),
            validate_and_build_line_item("Snake Gourd", "1", "10").unwrap(),
        ];
        let catalog = vec![Vegetable {
            id: "v1".to_string(),
            name: "tomato".to_string(),
            is_available: true,
            created_at: Utc::now(),
        }];

        assert_eq!(unknown_item_names(&form, &catalog), ["Snake Gourd"]);
    }
}
