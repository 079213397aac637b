use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag carried by every order row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Buy,
    Sell,
    /// Booked by a split event
    Split,
    /// Booked by a demerger event
    Demerger,
    /// Booked by a bonus-share event
    Bonus,
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Buy => "buy",
            OrderKind::Sell => "sell",
            OrderKind::Split => "split",
            OrderKind::Demerger => "demerger",
            OrderKind::Bonus => "bonus",
        }
    }

    /// Buy and sell are the only kinds a user enters directly
    pub fn is_trade(&self) -> bool {
        matches!(self, OrderKind::Buy | OrderKind::Sell)
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OrderKind {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "buy" => Ok(OrderKind::Buy),
            "sell" => Ok(OrderKind::Sell),
            "split" => Ok(OrderKind::Split),
            "demerger" => Ok(OrderKind::Demerger),
            "bonus" => Ok(OrderKind::Bonus),
            _ => Err("Invalid order type"),
        }
    }
}

/// Corporate action that rewrites holdings across every brokerage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Split,
    Demerger,
    Bonus,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Split => "split",
            EventKind::Demerger => "demerger",
            EventKind::Bonus => "bonus",
        }
    }

    /// Order kind booked for each brokerage when the event is applied
    pub fn order_kind(&self) -> OrderKind {
        match self {
            EventKind::Split => OrderKind::Split,
            EventKind::Demerger => OrderKind::Demerger,
            EventKind::Bonus => OrderKind::Bonus,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventKind {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "split" => Ok(EventKind::Split),
            "demerger" => Ok(EventKind::Demerger),
            "bonus" => Ok(EventKind::Bonus),
            _ => Err("Invalid event type"),
        }
    }
}

/// Cash distribution type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningKind {
    Dividend,
    /// Brazilian "juros sobre capital proprio"
    InterestOnCapital,
    /// Fund and REIT income distributions
    Income,
}

impl EarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EarningKind::Dividend => "dividend",
            EarningKind::InterestOnCapital => "interest_on_capital",
            EarningKind::Income => "income",
        }
    }
}

impl fmt::Display for EarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EarningKind {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "dividend" => Ok(EarningKind::Dividend),
            "interest_on_capital" | "jcp" => Ok(EarningKind::InterestOnCapital),
            "income" => Ok(EarningKind::Income),
            _ => Err("Invalid earning type"),
        }
    }
}
