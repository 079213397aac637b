use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticker symbol, unique per market (e.g. `ITSA4`, `AAPL`, `BRK.B`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Result<Self, &'static str> {
        let s: String = value.into();
        let s = s.trim();
        if s.is_empty() {
            return Err("Symbol cannot be empty");
        }
        if s.len() > 20 {
            return Err("Symbol too long (max 20 chars)");
        }
        // Share-class suffixes use '.' or '-' on US listings
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err("Symbol must be alphanumeric");
        }
        Ok(Symbol(s.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing digits of the ticker, if any (`ITSA4` -> `4`, `TAEE11` -> `11`)
    pub fn numeric_suffix(&self) -> Option<u32> {
        let digits: String = self
            .0
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if digits.is_empty() || digits.len() == self.0.len() {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Symbol {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Symbol::new(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::new(value)
    }
}
