use thiserror::Error;

/// Opaque storage failure. Surfaced unchanged, never interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A unique natural key is already taken
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
