//! In-memory ledger store.
//!
//! [`InMemoryLedger`] keeps the directory and both due matrices in ordered
//! maps. Nothing is persisted; data is lost when the store is dropped.

use std::collections::BTreeMap;

use tracing::debug;

use crate::directory::Directory;
use crate::matrix::DueMatrix;
use crate::simplify::settle_balances;
use crate::snapshot::LedgerSnapshot;
use crate::traits::LedgerStore;
use crate::types::{HousemateId, Transfer};

/// In-memory implementation of [`LedgerStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    directory: Directory,
    raw: DueMatrix,
    simplified: DueMatrix,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair off what others owe `id` against what `id` owes others, moving
    /// each matched amount onto a direct raw due between the two.
    fn forward_raw_dues(&mut self, id: &HousemateId) {
        let mut debtors: Vec<(HousemateId, i64)> =
            self.raw.owed_to(id).into_iter().filter(|(_, a)| *a > 0).collect();
        let mut creditors: Vec<(HousemateId, i64)> =
            self.raw.owed_by(id).into_iter().filter(|(_, a)| *a > 0).collect();

        let (mut d, mut c) = (0, 0);
        while d < debtors.len() && c < creditors.len() {
            let amount = debtors[d].1.min(creditors[c].1);
            let (debtor, creditor) = (&debtors[d].0, &creditors[c].0);
            if debtor != creditor && !self.raw.adjust(debtor, creditor, amount) {
                debug!(%debtor, %creditor, amount, "discarded forwarded raw due");
            }

            debtors[d].1 -= amount;
            creditors[c].1 -= amount;
            if debtors[d].1 == 0 {
                d += 1;
            }
            if creditors[c].1 == 0 {
                c += 1;
            }
        }

        let unmatched: i64 = debtors[d..]
            .iter()
            .chain(&creditors[c..])
            .fold(0i64, |acc, (_, a)| acc.saturating_add(*a));
        if unmatched > 0 {
            debug!(housemate = %id, unmatched, "dropped unmatched raw dues on removal");
        }
    }
}

impl LedgerStore for InMemoryLedger {
    fn add_housemate(&mut self, id: &HousemateId) {
        self.directory.insert(id.clone());
        self.raw.add_member(id);
        self.simplified.add_member(id);
    }

    fn remove_housemate(&mut self, id: &HousemateId) {
        self.forward_raw_dues(id);
        self.directory.remove(id);
        self.raw.remove_member(id);
        self.simplified.remove_member(id);
    }

    fn record_debt(&mut self, debtor: &HousemateId, creditor: &HousemateId, amount: i64) {
        if !self.raw.adjust(debtor, creditor, amount) {
            debug!(%debtor, %creditor, amount, "discarded raw due update");
        }
        if amount == 0 {
            self.simplified.set(debtor, creditor, 0);
        }
    }

    fn settle(&mut self, from: &HousemateId, to: &HousemateId, amount: i64) {
        if amount <= 0 {
            return;
        }

        let absorbed = amount.min(self.raw.get(from, to));
        let excess = amount - absorbed;
        self.raw.adjust(from, to, -absorbed);
        if excess > 0 && !self.raw.adjust(to, from, excess) {
            debug!(%from, %to, excess, "discarded raw due settlement excess");
        }
        if !self.simplified.adjust(from, to, -amount) {
            debug!(%from, %to, amount, "discarded simplified due settlement");
        }
    }

    fn simplify(&mut self) {
        let balances = self.net_balances();
        self.simplified.clear_values();

        let transfers = settle_balances(&balances);
        for transfer in &transfers {
            self.simplified
                .adjust(&transfer.debtor, &transfer.creditor, transfer.amount);
        }
        debug!(
            housemates = balances.len(),
            transfers = transfers.len(),
            "simplified dues"
        );
    }

    fn reset(&mut self) {
        self.directory.clear();
        self.raw.clear();
        self.simplified.clear();
    }

    fn contains(&self, id: &HousemateId) -> bool {
        self.directory.contains(id)
    }

    fn housemate_count(&self) -> usize {
        self.directory.len()
    }

    fn housemates(&self) -> Vec<HousemateId> {
        self.directory.iter().cloned().collect()
    }

    fn net_balance(&self, id: &HousemateId) -> i64 {
        self.raw_incoming(id).saturating_sub(self.raw_outgoing(id))
    }

    fn raw_outgoing(&self, id: &HousemateId) -> i64 {
        self.raw.owed_by_total(id)
    }

    fn raw_incoming(&self, id: &HousemateId) -> i64 {
        self.raw.owed_to_total(id)
    }

    fn raw_due(&self, from: &HousemateId, to: &HousemateId) -> i64 {
        self.raw.get(from, to)
    }

    fn simplified_due(&self, from: &HousemateId, to: &HousemateId) -> i64 {
        self.simplified.get(from, to)
    }

    fn simplified_dues(&self, id: &HousemateId) -> BTreeMap<HousemateId, i64> {
        self.simplified.owed_by(id)
    }

    fn transfers(&self) -> Vec<Transfer> {
        self.simplified.transfers()
    }

    fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            housemates: self.housemates(),
            raw: self.raw.transfers(),
            simplified: self.simplified.transfers(),
        }
    }
}
