use chrono::{Local, NaiveDate};
use fresh_api::endpoints::bills::Bill;

/// Criteria for narrowing the bill list. Every axis is optional; `None`
/// means "no constraint", which keeps "unset" distinct from an empty string
/// or a zero value.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub provider_id: Option<String>,
    /// Matched against `Bill::signer` by name (the backend filters signers
    /// by name, not id).
    pub signer: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_text: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Attach free-text search. Whitespace-only input is treated as unset.
    pub fn search(mut self, raw: &str) -> Self {
        let trimmed = raw.trim();
        self.search_text = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

/// Permissive date parsing for filter inputs: a malformed date is "no
/// constraint", never an error, so a half-typed filter leaves the list
/// intact instead of blanking it.
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Amount,
}

impl SortField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Date => Self::Amount,
            Self::Amount => Self::Date,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriteria {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortCriteria {
    fn default() -> Self {
        // Most recent bills first, matching the list's load order
        Self {
            field: SortField::Date,
            direction: SortDirection::Desc,
        }
    }
}

/// Select and order a subset of `bills`.
///
/// Pure: the input slice is never touched and the result borrows into it.
/// All present criteria must match (logical AND). The sort is stable, so
/// bills with equal keys keep their input order in either direction.
pub fn filter_and_sort<'a>(
    bills: &'a [Bill],
    criteria: &FilterCriteria,
    sort: Option<SortCriteria>,
) -> Vec<&'a Bill> {
    let mut filtered: Vec<&Bill> = bills.iter().filter(|b| matches(b, criteria)).collect();

    if let Some(sort) = sort {
        filtered.sort_by(|a, b| {
            let ordering = match sort.field {
                SortField::Date => a.date.cmp(&b.date),
                // Malformed totals coerce to 0.0 (Amount::value); the
                // stored record is not rewritten
                SortField::Amount => a.total.value().total_cmp(&b.total.value()),
            };
            match sort.direction {
                SortDirection::Asc => ordering,
                // Equal stays Equal, so stability survives the reversal
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    filtered
}

fn matches(bill: &Bill, criteria: &FilterCriteria) -> bool {
    if let Some(ref provider_id) = criteria.provider_id {
        if bill.provider_id != *provider_id {
            return false;
        }
    }

    if let Some(ref signer) = criteria.signer {
        if bill.signer != *signer {
            return false;
        }
    }

    if criteria.start_date.is_some() || criteria.end_date.is_some() {
        // Compare on the local calendar day, so a bill written at 23:30 on
        // the end date is still inside the range
        let day = bill.date.with_timezone(&Local).date_naive();
        if let Some(start) = criteria.start_date {
            if day < start {
                return false;
            }
        }
        if let Some(end) = criteria.end_date {
            if day > end {
                return false;
            }
        }
    }

    if let Some(ref text) = criteria.search_text {
        let needle = text.to_lowercase();
        let provider_match = bill.provider_name.to_lowercase().contains(&needle);
        let item_match = bill
            .items
            .iter()
            .any(|item| item.name.to_lowercase().contains(&needle));
        if !provider_match && !item_match {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fresh_api::endpoints::bills::LineItem;
    use fresh_api::endpoints::Amount;

    fn item(name: &str) -> LineItem {
        LineItem {
            id: "i1".to_string(),
            name: name.to_string(),
            quantity: 2.0,
            price: 5.0,
            item_total: 10.0,
        }
    }

    fn bill(id: &str, provider_id: &str, total: &str, date: (i32, u32, u32)) -> Bill {
        // Noon local time, so day truncation is timezone-stable in tests
        let date = Local
            .with_ymd_and_hms(date.0, date.1, date.2, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        Bill {
            id: id.to_string(),
            provider_id: provider_id.to_string(),
            provider_name: format!("Provider {}", provider_id),
            items: vec![item("Tomato")],
            signer: "DK".to_string(),
            total: Amount::new(total),
            date,
            created_at: date,
        }
    }

    fn ids(bills: &[&Bill]) -> Vec<String> {
        bills.iter().map(|b| b.id.clone()).collect()
    }

    #[test]
    fn provider_filter_selects_matching_bills() {
        let bills = vec![
            bill("b1", "P1", "10", (2024, 1, 1)),
            bill("b2", "P2", "20", (2024, 2, 1)),
        ];
        let criteria = FilterCriteria {
            provider_id: Some("P1".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&bills, &criteria, None)), ["b1"]);
    }

    #[test]
    fn date_range_is_inclusive_of_boundary_days() {
        let bills = vec![
            bill("b1", "P1", "10", (2024, 1, 1)),
            bill("b2", "P2", "20", (2024, 2, 1)),
            bill("b3", "P3", "30", (2024, 2, 15)),
        ];
        let criteria = FilterCriteria {
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&bills, &criteria, None)), ["b2", "b3"]);
    }

    #[test]
    fn open_ended_ranges() {
        let bills = vec![
            bill("b1", "P1", "10", (2024, 1, 1)),
            bill("b2", "P2", "20", (2024, 2, 1)),
        ];

        let from = FilterCriteria {
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&bills, &from, None)), ["b2"]);

        let until = FilterCriteria {
            end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&bills, &until, None)), ["b1"]);
    }

    #[test]
    fn search_matches_provider_name_and_item_names() {
        let mut bills = vec![
            bill("b1", "P1", "10", (2024, 1, 1)),
            bill("b2", "P2", "20", (2024, 2, 1)),
        ];
        bills[1].items = vec![item("Green Chili")];

        let by_provider = FilterCriteria::default().search("provider p1");
        assert_eq!(ids(&filter_and_sort(&bills, &by_provider, None)), ["b1"]);

        let by_item = FilterCriteria::default().search("  CHILI ");
        assert_eq!(ids(&filter_and_sort(&bills, &by_item, None)), ["b2"]);
    }

    #[test]
    fn blank_search_is_no_constraint() {
        let bills = vec![bill("b1", "P1", "10", (2024, 1, 1))];
        let criteria = FilterCriteria::default().search("   ");
        assert!(criteria.is_empty());
        assert_eq!(filter_and_sort(&bills, &criteria, None).len(), 1);
    }

    #[test]
    fn all_criteria_combine_with_and() {
        let mut bills = vec![
            bill("b1", "P1", "10", (2024, 1, 10)),
            bill("b2", "P1", "20", (2024, 3, 10)),
            bill("b3", "P2", "30", (2024, 1, 10)),
        ];
        bills[0].items = vec![item("Okra")];
        bills[2].items = vec![item("Okra")];

        // Date range AND search both pass for b3, but the provider
        // constraint still has to hold
        let combined = FilterCriteria {
            provider_id: Some("P1".to_string()),
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            ..Default::default()
        }
        .search("okra");
        assert_eq!(ids(&filter_and_sort(&bills, &combined, None)), ["b1"]);

        // Intersection of the single-axis results
        let by_provider = FilterCriteria {
            provider_id: Some("P1".to_string()),
            ..Default::default()
        };
        let by_range = FilterCriteria {
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            ..Default::default()
        };
        let provider_ids = ids(&filter_and_sort(&bills, &by_provider, None));
        let range_ids = ids(&filter_and_sort(&bills, &by_range, None));
        let intersection: Vec<_> = provider_ids
            .iter()
            .filter(|id| range_ids.contains(id))
            .cloned()
            .collect();
        let both = FilterCriteria {
            provider_id: Some("P1".to_string()),
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&bills, &both, None)), intersection);
    }

    #[test]
    fn filtering_twice_with_equal_criteria_is_a_no_op() {
        let bills = vec![
            bill("b1", "P1", "10", (2024, 1, 1)),
            bill("b2", "P2", "20", (2024, 2, 1)),
            bill("b3", "P1", "30", (2024, 3, 1)),
        ];
        let criteria = FilterCriteria {
            provider_id: Some("P1".to_string()),
            ..Default::default()
        };
        let sort = Some(SortCriteria {
            field: SortField::Amount,
            direction: SortDirection::Desc,
        });

        let once: Vec<Bill> = filter_and_sort(&bills, &criteria, sort)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_and_sort(&once, &criteria, sort);
        assert_eq!(ids(&twice), ids(&once.iter().collect::<Vec<_>>()));
    }

    #[test]
    fn result_is_a_subset_of_the_input() {
        let bills = vec![
            bill("b1", "P1", "10", (2024, 1, 1)),
            bill("b2", "P2", "20", (2024, 2, 1)),
        ];
        let criteria = FilterCriteria::default().search("provider");
        for selected in filter_and_sort(&bills, &criteria, None) {
            assert!(bills.iter().any(|b| std::ptr::eq(b, selected)));
        }
    }

    #[test]
    fn sort_by_amount_and_date() {
        let bills = vec![
            bill("b1", "P1", "30", (2024, 1, 3)),
            bill("b2", "P2", "10", (2024, 1, 1)),
            bill("b3", "P3", "20", (2024, 1, 2)),
        ];
        let asc_amount = filter_and_sort(
            &bills,
            &FilterCriteria::default(),
            Some(SortCriteria {
                field: SortField::Amount,
                direction: SortDirection::Asc,
            }),
        );
        assert_eq!(ids(&asc_amount), ["b2", "b3", "b1"]);

        let desc_date = filter_and_sort(
            &bills,
            &FilterCriteria::default(),
            Some(SortCriteria {
                field: SortField::Date,
                direction: SortDirection::Desc,
            }),
        );
        assert_eq!(ids(&desc_date), ["b1", "b3", "b2"]);
    }

    #[test]
    fn equal_amounts_keep_input_order_in_both_directions() {
        let bills = vec![
            bill("b1", "P1", "10", (2024, 1, 1)),
            bill("b2", "P2", "10", (2024, 1, 2)),
            bill("b3", "P3", "5", (2024, 1, 3)),
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = filter_and_sort(
                &bills,
                &FilterCriteria::default(),
                Some(SortCriteria {
                    field: SortField::Amount,
                    direction,
                }),
            );
            let b1_pos = sorted.iter().position(|b| b.id == "b1").unwrap();
            let b2_pos = sorted.iter().position(|b| b.id == "b2").unwrap();
            assert!(b1_pos < b2_pos, "ties must preserve input order");
        }
    }

    #[test]
    fn malformed_total_sorts_as_zero() {
        let bills = vec![
            bill("b1", "P1", "garbage", (2024, 1, 1)),
            bill("b2", "P2", "5", (2024, 1, 2)),
        ];
        let sorted = filter_and_sort(
            &bills,
            &FilterCriteria::default(),
            Some(SortCriteria {
                field: SortField::Amount,
                direction: SortDirection::Asc,
            }),
        );
        assert_eq!(ids(&sorted), ["b1", "b2"]);
        // The record itself is untouched
        assert_eq!(bills[0].total.raw(), "garbage");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let criteria = FilterCriteria {
            provider_id: Some("P1".to_string()),
            ..Default::default()
        }
        .search("anything");
        assert!(filter_and_sort(&[], &criteria, Some(SortCriteria::default())).is_empty());
    }

    #[test]
    fn malformed_date_input_parses_to_none() {
        assert_eq!(parse_date_input("2024-01-15").map(|d| d.to_string()), Some("2024-01-15".to_string()));
        assert_eq!(parse_date_input(" 2024-01-15 ").map(|d| d.to_string()), Some("2024-01-15".to_string()));
        assert_eq!(parse_date_input("2024-13-40"), None);
        assert_eq!(parse_date_input("15/01/2024"), None);
        assert_eq!(parse_date_input(""), None);
    }
}
