//! Provider vocabularies mapped onto [`AssetKind`].
//!
//! Each market's data provider spells classifications differently. Unknown
//! spellings map to `None` and are rejected by onboarding rather than
//! defaulted.

use crate::domain::value_objects::{AssetKind, Country};

/// Classify a provider type string for the given market
pub fn classify(country: Country, raw_type: &str) -> Option<AssetKind> {
    match country {
        Country::Us => classify_us(raw_type),
        Country::Br => classify_br(raw_type),
    }
}

fn classify_us(raw_type: &str) -> Option<AssetKind> {
    match raw_type.trim() {
        "Common Stock" | "ADR" => Some(AssetKind::Stock),
        "ETP" | "ETF" => Some(AssetKind::Etf),
        "REIT" => Some(AssetKind::Reit),
        "Closed-End Fund" | "Open-End Fund" | "Mutual Fund" => Some(AssetKind::Fund),
        _ => None,
    }
}

fn classify_br(raw_type: &str) -> Option<AssetKind> {
    match raw_type.trim().to_lowercase().as_str() {
        "stock" => Some(AssetKind::Stock),
        "etf" => Some(AssetKind::Etf),
        "fii" | "reit" => Some(AssetKind::Reit),
        "fund" => Some(AssetKind::Fund),
        _ => None,
    }
}

/// Pick the sector name for a newly onboarded asset.
///
/// Precedence: company-profile industry, then the lookup's own sector, then a
/// per-kind default.
pub fn sector_name(
    kind: AssetKind,
    profile_industry: Option<&str>,
    lookup_sector: Option<&str>,
) -> String {
    let non_blank = |s: &&str| !s.trim().is_empty();
    if let Some(industry) = profile_industry.filter(non_blank) {
        return industry.trim().to_string();
    }
    if let Some(sector) = lookup_sector.filter(non_blank) {
        return sector.trim().to_string();
    }
    match kind {
        AssetKind::Etf => "ETF",
        AssetKind::Reit => "Real Estate",
        AssetKind::Fund => "Funds",
        AssetKind::Stock => "Undefined",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_vocabulary() {
        assert_eq!(classify(Country::Us, "Common Stock"), Some(AssetKind::Stock));
        assert_eq!(classify(Country::Us, "ETP"), Some(AssetKind::Etf));
        assert_eq!(classify(Country::Us, "REIT"), Some(AssetKind::Reit));
        assert_eq!(classify(Country::Us, "Open-End Fund"), Some(AssetKind::Fund));
        assert_eq!(classify(Country::Us, "Warrant"), None);
    }

    #[test]
    fn test_br_vocabulary() {
        assert_eq!(classify(Country::Br, "stock"), Some(AssetKind::Stock));
        assert_eq!(classify(Country::Br, "FII"), Some(AssetKind::Reit));
        assert_eq!(classify(Country::Br, "bdr"), None);
    }

    #[test]
    fn test_vocabularies_do_not_leak_across_markets() {
        assert_eq!(classify(Country::Br, "Common Stock"), None);
        assert_eq!(classify(Country::Us, "fii"), None);
    }

    #[test]
    fn test_sector_precedence() {
        assert_eq!(
            sector_name(AssetKind::Stock, Some("Technology"), Some("Tech")),
            "Technology"
        );
        assert_eq!(
            sector_name(AssetKind::Stock, Some("  "), Some("Finance")),
            "Finance"
        );
        assert_eq!(sector_name(AssetKind::Etf, None, None), "ETF");
        assert_eq!(sector_name(AssetKind::Stock, None, None), "Undefined");
    }
}
