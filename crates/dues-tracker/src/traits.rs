//! Capability traits for household operations.
//!
//! [`HousemateService`] covers membership and [`TrackerService`] covers
//! money. Both are implemented by [`Household`](crate::Household); callers
//! that only need one capability can depend on that trait alone.

use dues_ledger::HousemateId;

use crate::dues::Due;
use crate::error::Result;
use crate::expense::Expense;

/// Membership operations.
pub trait HousemateService: Send + Sync {
    /// Add a housemate, subject to the house capacity.
    fn move_in(&self, housemate: &HousemateId) -> Result<()>;

    /// Remove a housemate who neither owes nor is owed anything.
    fn move_out(&self, housemate: &HousemateId) -> Result<()>;
}

/// Expense and settlement operations.
pub trait TrackerService: Send + Sync {
    /// Split an expense and re-simplify the household's dues.
    fn add_expense(&self, expense: &Expense) -> Result<()>;

    /// What `housemate` owes each other resident, largest first.
    fn show_dues(&self, housemate: &HousemateId) -> Result<Vec<Due>>;

    /// Record a payment from `from` to `to` and return the amount still due.
    fn clear_dues(&self, from: &HousemateId, to: &HousemateId, amount: i64) -> Result<i64>;
}
