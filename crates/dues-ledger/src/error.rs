//! Error types for ledger operations.

use thiserror::Error;

/// Errors produced by the ledger crate.
///
/// Store mutations are infallible; the only failure the core can report is
/// a housemate name that cannot be used as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The housemate name is empty or contains whitespace.
    #[error("invalid housemate name {name:?}: {reason}")]
    InvalidHousemateName { name: String, reason: String },
}

/// Convenience type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
