use crate::domain::value_objects::{AssetKind, Country, ShareClass, Symbol};

/// Derive the share class from a ticker.
///
/// Only B3 stocks encode a class in their numeric suffix. Funds and ETFs
/// listed there also end in 11, which marks a fund quota rather than a unit.
pub fn share_class(symbol: &Symbol, country: Country, kind: AssetKind) -> Option<ShareClass> {
    if country != Country::Br || kind != AssetKind::Stock {
        return None;
    }
    match symbol.numeric_suffix()? {
        3 => Some(ShareClass::On),
        4 => Some(ShareClass::Pn),
        5 => Some(ShareClass::Pna),
        6 => Some(ShareClass::Pnb),
        7 => Some(ShareClass::Pnc),
        8 => Some(ShareClass::Pnd),
        11 => Some(ShareClass::Unit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    #[test]
    fn test_br_stock_suffixes() {
        let class = |s| share_class(&sym(s), Country::Br, AssetKind::Stock);
        assert_eq!(class("PETR3"), Some(ShareClass::On));
        assert_eq!(class("ITSA4"), Some(ShareClass::Pn));
        assert_eq!(class("USIM5"), Some(ShareClass::Pna));
        assert_eq!(class("TAEE11"), Some(ShareClass::Unit));
        assert_eq!(class("XPTO9"), None);
    }

    #[test]
    fn test_funds_and_us_listings_have_no_class() {
        assert_eq!(share_class(&sym("HGLG11"), Country::Br, AssetKind::Reit), None);
        assert_eq!(share_class(&sym("BOVA11"), Country::Br, AssetKind::Etf), None);
        assert_eq!(share_class(&sym("AAPL"), Country::Us, AssetKind::Stock), None);
    }
}
