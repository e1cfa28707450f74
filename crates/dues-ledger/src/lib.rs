//! Core ledger for shared household expenses.
//!
//! This crate tracks what housemates owe each other and reduces those dues to
//! a short list of transfers. It provides:
//!
//! - [`HousemateId`] and [`Transfer`] value types
//! - [`Directory`]: the set of resident housemates
//! - [`DueMatrix`]: pairwise dues with a non-negative cell guarantee
//! - [`LedgerStore`]: the store trait boundary
//! - [`InMemoryLedger`]: the in-memory store
//! - [`simplify`]: greedy debt simplification
//! - [`LedgerSnapshot`]: an owned copy of the whole ledger
//!
//! The store performs no business validation. Capacity limits, membership
//! checks and payment checks belong to the caller.

pub mod directory;
pub mod error;
pub mod matrix;
pub mod memory;
pub mod simplify;
pub mod snapshot;
pub mod traits;
pub mod types;

pub use directory::Directory;
pub use error::{LedgerError, Result};
pub use matrix::DueMatrix;
pub use memory::InMemoryLedger;
pub use snapshot::LedgerSnapshot;
pub use traits::LedgerStore;
pub use types::{HousemateId, Transfer};
