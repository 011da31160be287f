use fresh_api::endpoints::{providers::Provider, signers::Signer};

/// Filter providers by query string for autocomplete
/// Returns up to 10 matching providers
pub fn filter_providers(providers: &[Provider], query: &str) -> Vec<Provider> {
    if query.is_empty() {
        return providers.iter().take(10).cloned().collect();
    }

    let query_lower = query.to_lowercase();
    providers
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&query_lower))
        .take(10)
        .cloned()
        .collect()
}

/// Filter signers by query string for autocomplete
/// Returns up to 10 matching signers
pub fn filter_signers(signers: &[Signer], query: &str) -> Vec<Signer> {
    if query.is_empty() {
        return signers.iter().take(10).cloned().collect();
    }

    let query_lower = query.to_lowercase();
    signers
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&query_lower))
        .take(10)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn provider(name: &str) -> Provider {
        Provider {
            id: name.to_lowercase(),
            name: name.to_string(),
            mobile: "9999999999".to_string(),
            address: "Market Rd".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_query_returns_leading_entries() {
        let providers: Vec<Provider> = (0..15).map(|i| provider(&format!("P{}", i))).collect();
        assert_eq!(filter_providers(&providers, "").len(), 10);
    }

    #[test]
    fn query_narrows_by_name() {
        let providers = vec![provider("Ram Traders"), provider("Shyam Vegetables")];
        let matched = filter_providers(&providers, "shyam");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Shyam Vegetables");
    }
}
