use crate::application::ports::{ProviderError, RepositoryError};
use crate::domain::{EarningId, OrderId, ValidationError};
use thiserror::Error;

/// Coarse classification the transport layer maps to protocol status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusHint {
    BadRequest,
    NotFound,
    Internal,
}

impl StatusHint {
    pub fn code(&self) -> u16 {
        match self {
            StatusHint::BadRequest => 400,
            StatusHint::NotFound => 404,
            StatusHint::Internal => 500,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown brokerage: {0}")]
    UnknownBrokerage(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Asset {0} is not in this user's portfolio")]
    RelationNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Earning not found: {0}")]
    EarningNotFound(EarningId),

    #[error("Unsupported asset class {raw_type:?} for {symbol}")]
    UnsupportedAssetClass { symbol: String, raw_type: String },

    #[error("Market data error: {0}")]
    Upstream(ProviderError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl LedgerError {
    pub fn status_hint(&self) -> StatusHint {
        match self {
            LedgerError::Validation(_)
            | LedgerError::UnknownBrokerage(_)
            | LedgerError::UnsupportedAssetClass { .. }
            | LedgerError::Upstream(_) => StatusHint::BadRequest,
            LedgerError::UnknownSymbol(_)
            | LedgerError::AssetNotFound(_)
            | LedgerError::RelationNotFound(_)
            | LedgerError::OrderNotFound(_)
            | LedgerError::EarningNotFound(_) => StatusHint::NotFound,
            LedgerError::Repository(_) => StatusHint::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
