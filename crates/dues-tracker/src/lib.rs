//! Household expense tracking on top of the dues ledger.
//!
//! This crate enforces the household rules the ledger itself does not know
//! about:
//!
//! - a house holds at most [`HouseConfig::capacity`] housemates
//! - every named housemate must be resident before anything is recorded
//! - nobody moves out while they owe or are owed money
//! - a payment may not exceed what is currently due
//!
//! [`Household`] implements both capability traits, [`HousemateService`] and
//! [`TrackerService`], over any [`LedgerStore`](dues_ledger::LedgerStore).

pub mod config;
pub mod dues;
pub mod error;
pub mod expense;
pub mod household;
pub mod traits;

pub use config::HouseConfig;
pub use dues::{dues_listing, Due};
pub use error::{Result, TrackerError};
pub use expense::Expense;
pub use household::Household;
pub use traits::{HousemateService, TrackerService};

// Re-export key ledger types
pub use dues_ledger::{HousemateId, LedgerSnapshot, Transfer};
