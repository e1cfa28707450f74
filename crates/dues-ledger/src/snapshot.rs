//! Point-in-time copy of the ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{HousemateId, Transfer};

/// Owned copy of the full ledger state.
///
/// Only non-zero dues are listed, ordered by debtor then creditor, so two
/// snapshots compare equal exactly when the ledgers hold the same amounts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Resident housemates in name order.
    pub housemates: Vec<HousemateId>,
    /// Accumulated dues as recorded from expenses and settlements.
    pub raw: Vec<Transfer>,
    /// Dues after simplification.
    pub simplified: Vec<Transfer>,
}

impl LedgerSnapshot {
    /// `true` when nobody owes anybody in the simplified view.
    pub fn is_settled(&self) -> bool {
        self.simplified.is_empty()
    }

    /// Net balance per housemate derived from the raw dues.
    pub fn net_balances(&self) -> BTreeMap<HousemateId, i64> {
        let mut balances: BTreeMap<HousemateId, i64> =
            self.housemates.iter().map(|id| (id.clone(), 0)).collect();
        for transfer in &self.raw {
            if let Some(balance) = balances.get_mut(&transfer.creditor) {
                *balance = balance.saturating_add(transfer.amount);
            }
            if let Some(balance) = balances.get_mut(&transfer.debtor) {
                *balance = balance.saturating_sub(transfer.amount);
            }
        }
        balances
    }
}
