use crate::domain::value_objects::{Country, EarningKind, EventKind, OrderKind};
use rust_decimal::Decimal;
use thiserror::Error;

/// Business-rule violations. Always user-fixable, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid order type: {0}")]
    InvalidOrderType(String),

    #[error("Invalid country code: {0}")]
    InvalidCountryCode(String),

    #[error("Quantity {0} must be a whole number in this market")]
    InvalidQuantityGranularity(Decimal),

    #[error("Currency {currency} is not accepted in market {country}")]
    InvalidCurrencyForMarket { currency: String, country: Country },

    #[error("Buy quantity must not be negative")]
    InvalidBuyQuantity,

    #[error("Sell quantity must not be positive")]
    InvalidSellQuantity,

    #[error("Price must not be negative")]
    InvalidPrice,

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("Event rate must be positive")]
    InvalidEventRate,

    #[error("Invalid earning type: {0}")]
    InvalidEarningType(String),

    #[error("Earning amount must not be negative")]
    InvalidEarningAmount,

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Invalid order by: {0}")]
    InvalidOrderBy(String),

    #[error("{symbol} is listed in {listed}, not {requested}")]
    MarketMismatch {
        symbol: String,
        listed: Country,
        requested: Country,
    },

    #[error("Amount exceeds the supported decimal range")]
    AmountOverflow,
}

/// An order that passed every rule, with its tags parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub kind: OrderKind,
    pub country: Country,
}

/// Validates orders, corporate events and earnings against market conventions.
///
/// Pure predicates, no I/O. Rules are checked in a fixed order and the first
/// failure wins.
pub struct OrderRules;

impl OrderRules {
    /// Validate a user-entered buy or sell
    pub fn validate(
        order_type: &str,
        country: &str,
        quantity: Decimal,
        price: Decimal,
        currency: &str,
    ) -> Result<ValidatedOrder, ValidationError> {
        let kind = OrderKind::try_from(order_type)
            .ok()
            .filter(OrderKind::is_trade)
            .ok_or_else(|| ValidationError::InvalidOrderType(order_type.to_string()))?;

        let country = Self::country(country)?;

        if country.requires_integral_quantity() && !quantity.fract().is_zero() {
            return Err(ValidationError::InvalidQuantityGranularity(quantity));
        }

        Self::currency_for_market(country, currency)?;

        match kind {
            OrderKind::Buy if quantity.is_sign_negative() && !quantity.is_zero() => {
                return Err(ValidationError::InvalidBuyQuantity);
            }
            OrderKind::Sell if quantity.is_sign_positive() && !quantity.is_zero() => {
                return Err(ValidationError::InvalidSellQuantity);
            }
            _ => {}
        }

        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::InvalidPrice);
        }

        if quantity.checked_mul(price).is_none() {
            return Err(ValidationError::AmountOverflow);
        }

        Ok(ValidatedOrder { kind, country })
    }

    /// An existing asset only takes records in the market it is listed in
    pub fn same_market(
        symbol: &str,
        listed: Country,
        requested: Country,
    ) -> Result<(), ValidationError> {
        if listed != requested {
            return Err(ValidationError::MarketMismatch {
                symbol: symbol.to_string(),
                listed,
                requested,
            });
        }
        Ok(())
    }

    /// Validate an order generated by a corporate event.
    ///
    /// Event orders skip the type and granularity rules: a split may leave a
    /// fractional position even where trades must be whole.
    pub fn validate_event_order(
        country: Country,
        price: Decimal,
        currency: &str,
    ) -> Result<(), ValidationError> {
        Self::currency_for_market(country, currency)?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }

    /// Check a corporate-event tag against the supported set
    pub fn event_type_value_verification(event_type: &str) -> Result<EventKind, ValidationError> {
        EventKind::try_from(event_type)
            .map_err(|_| ValidationError::InvalidEventType(event_type.to_string()))
    }

    /// Validate an earning record
    pub fn validate_earning(
        earning_type: &str,
        country: Country,
        amount: Decimal,
        currency: &str,
    ) -> Result<EarningKind, ValidationError> {
        let kind = EarningKind::try_from(earning_type)
            .map_err(|_| ValidationError::InvalidEarningType(earning_type.to_string()))?;
        Self::currency_for_market(country, currency)?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::InvalidEarningAmount);
        }
        Ok(kind)
    }

    pub fn country(country: &str) -> Result<Country, ValidationError> {
        Country::try_from(country)
            .map_err(|_| ValidationError::InvalidCountryCode(country.to_string()))
    }

    fn currency_for_market(country: Country, currency: &str) -> Result<(), ValidationError> {
        if !currency.trim().eq_ignore_ascii_case(country.home_currency()) {
            return Err(ValidationError::InvalidCurrencyForMarket {
                currency: currency.to_string(),
                country,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_br_buy() {
        let validated = OrderRules::validate("buy", "BR", dec!(2), dec!(29.10), "BRL").unwrap();
        assert_eq!(validated.kind, OrderKind::Buy);
        assert_eq!(validated.country, Country::Br);
    }

    #[test]
    fn test_valid_fractional_us_sell() {
        let validated =
            OrderRules::validate("sell", "US", dec!(-0.5), dec!(180.25), "USD").unwrap();
        assert_eq!(validated.kind, OrderKind::Sell);
    }

    #[test]
    fn test_event_kinds_are_not_trades() {
        let result = OrderRules::validate("split", "BR", dec!(2), dec!(1), "BRL");
        assert_eq!(
            result,
            Err(ValidationError::InvalidOrderType("split".to_string()))
        );
    }

    #[test]
    fn test_unknown_country() {
        let result = OrderRules::validate("buy", "AR", dec!(2), dec!(1), "ARS");
        assert_eq!(
            result,
            Err(ValidationError::InvalidCountryCode("AR".to_string()))
        );
    }

    #[test]
    fn test_br_requires_whole_shares() {
        let result = OrderRules::validate("buy", "BR", dec!(1.5), dec!(10), "BRL");
        assert_eq!(
            result,
            Err(ValidationError::InvalidQuantityGranularity(dec!(1.5)))
        );
    }

    #[test]
    fn test_currency_must_match_market() {
        let result = OrderRules::validate("buy", "BR", dec!(2), dec!(10), "USD");
        assert!(matches!(
            result,
            Err(ValidationError::InvalidCurrencyForMarket {
                country: Country::Br,
                ..
            })
        ));
        assert!(OrderRules::validate("buy", "US", dec!(2), dec!(10), "usd").is_ok());
    }

    #[test]
    fn test_sign_must_match_type() {
        assert_eq!(
            OrderRules::validate("buy", "BR", dec!(-2), dec!(10), "BRL"),
            Err(ValidationError::InvalidBuyQuantity)
        );
        assert_eq!(
            OrderRules::validate("sell", "BR", dec!(2), dec!(10), "BRL"),
            Err(ValidationError::InvalidSellQuantity)
        );
        assert!(OrderRules::validate("buy", "BR", dec!(0), dec!(10), "BRL").is_ok());
    }

    #[test]
    fn test_negative_price() {
        assert_eq!(
            OrderRules::validate("buy", "US", dec!(1), dec!(-0.01), "USD"),
            Err(ValidationError::InvalidPrice)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        // Bad granularity and bad currency and bad sign: granularity is checked first
        let result = OrderRules::validate("buy", "BR", dec!(-1.5), dec!(10), "USD");
        assert_eq!(
            result,
            Err(ValidationError::InvalidQuantityGranularity(dec!(-1.5)))
        );
    }

    #[test]
    fn test_event_type_value_verification() {
        assert_eq!(
            OrderRules::event_type_value_verification("split"),
            Ok(EventKind::Split)
        );
        assert_eq!(
            OrderRules::event_type_value_verification("merger"),
            Err(ValidationError::InvalidEventType("merger".to_string()))
        );
    }

    #[test]
    fn test_event_order_allows_fractional_quantity_market() {
        assert!(OrderRules::validate_event_order(Country::Br, dec!(0), "BRL").is_ok());
        assert_eq!(
            OrderRules::validate_event_order(Country::Br, dec!(-1), "BRL"),
            Err(ValidationError::InvalidPrice)
        );
    }

    #[test]
    fn test_validate_earning() {
        assert_eq!(
            OrderRules::validate_earning("dividend", Country::Br, dec!(12.5), "BRL"),
            Ok(EarningKind::Dividend)
        );
        assert_eq!(
            OrderRules::validate_earning("dividend", Country::Br, dec!(-1), "BRL"),
            Err(ValidationError::InvalidEarningAmount)
        );
        assert_eq!(
            OrderRules::validate_earning("bonus", Country::Us, dec!(1), "USD"),
            Err(ValidationError::InvalidEarningType("bonus".to_string()))
        );
    }

    #[test]
    fn test_notional_must_fit_decimal() {
        let result = OrderRules::validate(
            "buy",
            "BR",
            dec!(1_000_000_000_000_000),
            dec!(1_000_000_000_000_000),
            "BRL",
        );
        assert_eq!(result, Err(ValidationError::AmountOverflow));
    }

    #[test]
    fn test_same_market() {
        assert!(OrderRules::same_market("ITSA4", Country::Br, Country::Br).is_ok());
        assert_eq!(
            OrderRules::same_market("ITSA4", Country::Br, Country::Us),
            Err(ValidationError::MarketMismatch {
                symbol: "ITSA4".into(),
                listed: Country::Br,
                requested: Country::Us,
            })
        );
    }
}
