use chrono::{DateTime, Local, Utc};

/// Format a monetary value the way the backend's reports do: `$x.xx`
pub fn fmt_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a bill timestamp as a local calendar date (dd/mm/yyyy)
pub fn fmt_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%d/%m/%Y").to_string()
}

/// Short one-line summary of a bill's items ("Tomato, Okra +2 more")
pub fn fmt_items_summary(names: &[&str], max_shown: usize) -> String {
    if names.is_empty() {
        return String::new();
    }

    let shown = names.iter().take(max_shown).copied().collect::<Vec<_>>();
    let rest = names.len().saturating_sub(max_shown);
    if rest > 0 {
        format!("{} +{} more", shown.join(", "), rest)
    } else {
        shown.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formatting() {
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_money(125.5), "$125.50");
    }

    #[test]
    fn items_summary_truncates() {
        assert_eq!(fmt_items_summary(&[], 2), "");
        assert_eq!(fmt_items_summary(&["Tomato"], 2), "Tomato");
        assert_eq!(
            fmt_items_summary(&["Tomato", "Okra", "Chili"], 2),
            "Tomato, Okra +1 more"
        );
    }
}
