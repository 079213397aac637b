use serde::{Deserialize, Serialize};
use std::fmt;

/// Markets the ledger accepts orders for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "BR")]
    Br,
    #[serde(rename = "US")]
    Us,
}

impl Country {
    pub const ALL: [Country; 2] = [Country::Br, Country::Us];

    pub fn code(&self) -> &'static str {
        match self {
            Country::Br => "BR",
            Country::Us => "US",
        }
    }

    /// Currency every order and earning in this market must be booked in
    pub fn home_currency(&self) -> &'static str {
        match self {
            Country::Br => "BRL",
            Country::Us => "USD",
        }
    }

    /// B3 trades whole shares only; US brokers allow fractional shares
    pub fn requires_integral_quantity(&self) -> bool {
        matches!(self, Country::Br)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Country {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_uppercase().as_str() {
            "BR" => Ok(Country::Br),
            "US" => Ok(Country::Us),
            _ => Err("Unsupported country code"),
        }
    }
}
