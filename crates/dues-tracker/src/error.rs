//! Error types for household operations.

use dues_ledger::HousemateId;
use thiserror::Error;

/// Errors returned by [`HousemateService`](crate::HousemateService) and
/// [`TrackerService`](crate::TrackerService) operations.
///
/// Every rejection happens before the ledger is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("housemate already exists: {0}")]
    MemberAlreadyExists(HousemateId),

    #[error("housemate not found: {0}")]
    MemberNotFound(HousemateId),

    #[error("house is full: capacity {capacity}")]
    HouseFull { capacity: usize },

    #[error("housemate has pending dues: {0}")]
    HasPendingDue(HousemateId),

    #[error("incorrect payment: {amount} against a due of {due}")]
    IncorrectPayment { amount: i64, due: i64 },

    /// The amount, or a housemate's running dues, would not fit in an `i64`.
    #[error("amount too large to record")]
    AmountTooLarge,

    #[error("ledger lock poisoned")]
    Poisoned,
}

impl TrackerError {
    /// Stable code written to command output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MemberAlreadyExists(_) => "MEMBER_ALREADY_EXISTS",
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::HouseFull { .. } => "HOUSEFUL",
            Self::HasPendingDue(_) => "FAILURE",
            Self::IncorrectPayment { .. } => "INCORRECT_PAYMENT",
            Self::AmountTooLarge => "AMOUNT_TOO_LARGE",
            Self::Poisoned => "INTERNAL_ERROR",
        }
    }
}

/// Convenience type alias for household operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
