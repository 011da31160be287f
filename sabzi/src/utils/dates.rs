//! Incremental validation for typed ISO dates (YYYY-MM-DD).
//!
//! The bill form and the filter panel accept dates one keystroke at a time;
//! a character is only accepted if the result is still the prefix of some
//! valid date, so nonsense like "2024-19" can never be entered.

/// Check whether `s` is a valid prefix of a YYYY-MM-DD date.
fn is_valid_date_prefix(s: &str) -> bool {
    let mut component_index = 0;
    let mut value: u32 = 0;
    let mut digits = 0;

    let mut year: Option<u32> = None;
    let mut month: Option<u32> = None;

    for &b in s.as_bytes() {
        if component_index >= 3 {
            return false;
        }

        match b {
            b'0'..=b'9' => {
                value = value * 10 + (b - b'0') as u32;
                digits += 1;

                match component_index {
                    // Year
                    0 => {
                        if digits > 4 {
                            return false;
                        }
                    }
                    // Month: require the leading zero so "2024-2" is
                    // rejected in favor of "2024-02"
                    1 => {
                        if digits > 2 || value > 12 {
                            return false;
                        }
                        if digits == 1 && value > 1 {
                            return false;
                        }
                        if digits == 2 && value == 0 {
                            return false;
                        }
                    }
                    // Day
                    _ => {
                        if digits > 2 {
                            return false;
                        }
                        if digits == 1 && value > 3 {
                            return false;
                        }
                        if digits == 2 && (value == 0 || value > 31) {
                            return false;
                        }
                    }
                }
            }

            b'-' => {
                // Separator after the day is not allowed
                if component_index == 2 {
                    return false;
                }

                // Validate component is complete before moving to next
                match component_index {
                    0 => {
                        if digits != 4 {
                            return false;
                        }
                        year = Some(value);
                    }
                    _ => {
                        if digits != 2 || value == 0 || value > 12 {
                            return false;
                        }
                        month = Some(value);
                    }
                }

                value = 0;
                digits = 0;
                component_index += 1;
            }

            _ => return false,
        }
    }

    // A complete date must name a real day of its month
    if component_index == 2 && digits == 2 {
        let (Some(y), Some(m)) = (year, month) else {
            return false;
        };
        return valid_day(y, m, value);
    }

    true
}

/// Append a character to a date string, auto-inserting the separator when a
/// component is complete. Returns None if the result would not be a valid
/// date prefix.
///
/// Examples:
/// - current="2025", c='0' -> Some("2025-0")
/// - current="2025-01", c='1' -> Some("2025-01-1")
pub fn append_date_char(current: &str, c: char) -> Option<String> {
    // First, try appending directly
    let direct = format!("{}{}", current, c);
    if is_valid_date_prefix(&direct) {
        return Some(direct);
    }

    // If direct append failed, try inserting the separator first
    let with_separator = format!("{}-{}", current, c);
    if is_valid_date_prefix(&with_separator) {
        return Some(with_separator);
    }

    None
}

fn valid_day(year: u32, month: u32, day: u32) -> bool {
    if day == 0 {
        return false;
    }

    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => day <= 31,
        4 | 6 | 9 | 11 => day <= 30,
        2 => {
            if is_leap_year(year) {
                day <= 29
            } else {
                day <= 28
            }
        }
        _ => false,
    }
}

fn is_leap_year(year: u32) -> bool {
    (year.is_multiple_of(4) && !year.is_multiple_of(100)) || year.is_multiple_of(400)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_date_prefixes() {
        assert!(is_valid_date_prefix("2"));
        assert!(is_valid_date_prefix("20"));
        assert!(is_valid_date_prefix("2026"));
        assert!(is_valid_date_prefix("2026-"));
        assert!(is_valid_date_prefix("2026-0"));
        assert!(is_valid_date_prefix("2026-01"));
        assert!(is_valid_date_prefix("2026-01-"));
        assert!(is_valid_date_prefix("2026-01-0"));
        assert!(is_valid_date_prefix("2026-01-05"));
    }

    #[test]
    fn leap_year_handling() {
        assert!(is_valid_date_prefix("2024-02-29"));
        assert!(!is_valid_date_prefix("2025-02-29"));
    }

    #[test]
    fn rejects_single_digit_months_and_days() {
        assert!(!is_valid_date_prefix("2024-2"));
        assert!(!is_valid_date_prefix("2025-02-4"));
    }

    #[test]
    fn rejects_wrong_separator() {
        assert!(!is_valid_date_prefix("2026/01/05"));
    }

    #[test]
    fn append_date_char_auto_separator() {
        // After complete year, auto-insert separator
        assert_eq!(append_date_char("2025", '0'), Some("2025-0".to_string()));

        // Normal append within component
        assert_eq!(append_date_char("2025-0", '1'), Some("2025-01".to_string()));

        // After complete month, auto-insert separator
        assert_eq!(
            append_date_char("2025-01", '1'),
            Some("2025-01-1".to_string())
        );

        // Normal append for day
        assert_eq!(
            append_date_char("2025-01-1", '5'),
            Some("2025-01-15".to_string())
        );
    }

    #[test]
    fn append_date_char_explicit_separator_still_works() {
        assert_eq!(append_date_char("2025", '-'), Some("2025-".to_string()));
        assert_eq!(
            append_date_char("2025-01", '-'),
            Some("2025-01-".to_string())
        );
    }

    #[test]
    fn append_date_char_rejects_invalid() {
        // Can't add more digits after a complete date
        assert_eq!(append_date_char("2025-01-15", '0'), None);

        // Would be month 19
        assert_eq!(append_date_char("2025-1", '9'), None);
    }
}
