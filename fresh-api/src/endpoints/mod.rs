pub mod bills;
pub mod providers;
pub mod signers;
pub mod vegetables;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Monetary amount as stored by the backend.
///
/// Bill totals arrive as decimal strings (`"245.50"`), but a number of older
/// records were written with a raw JSON number instead, so deserialization
/// accepts both. The raw text is preserved; [`Amount::value`] performs the
/// numeric coercion and treats unparseable text as zero so that sorting and
/// summing never fail on a bad record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amount(String);

impl Amount {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The backend's representation, untouched.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Numeric value; malformed text coerces to 0.0.
    pub fn value(&self) -> f64 {
        self.0.trim().parse().unwrap_or(0.0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(format!("{:.2}", value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Ok(Amount(s)),
            Raw::Number(n) => Ok(Amount(format!("{}", n))),
        }
    }
}

/// Deserialize a numeric field that some records store as a string.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_string_and_number() {
        let from_str: Amount = serde_json::from_str("\"245.50\"").unwrap();
        assert_eq!(from_str.raw(), "245.50");
        assert_eq!(from_str.value(), 245.5);

        let from_num: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(from_num.value(), 12.5);
    }

    #[test]
    fn malformed_amount_coerces_to_zero() {
        let bad = Amount::new("N/A");
        assert_eq!(bad.value(), 0.0);
        // The stored representation is not rewritten
        assert_eq!(bad.raw(), "N/A");
    }

    #[test]
    fn amount_serializes_as_string() {
        let amount = Amount::from(9.5);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"9.50\"");
    }
}
