//! The [`LedgerStore`] trait defining the ledger storage interface.
//!
//! The store holds two due matrices for the resident housemates: the raw
//! dues accumulated from expenses, and the simplified dues produced by debt
//! simplification. Store operations perform no business validation; callers
//! check membership, capacity and amounts before mutating.

use std::collections::BTreeMap;

use crate::snapshot::LedgerSnapshot;
use crate::types::{HousemateId, Transfer};

/// Storage backend for household dues.
///
/// Mutations take effect immediately and never trigger simplification on
/// their own; call [`LedgerStore::simplify`] after any change to balances.
pub trait LedgerStore: Send + Sync {
    /// Add a housemate with zero dues against every resident.
    ///
    /// There is no existence check: adding a resident again resets their
    /// dues to zero.
    fn add_housemate(&mut self, id: &HousemateId);

    /// Remove a housemate together with every due involving them.
    ///
    /// Raw dues that pass through the housemate are forwarded first: what
    /// others owe them is paired off against what they owe others, so every
    /// remaining net balance is unchanged. Outstanding dues are not checked;
    /// any unmatched remainder is dropped.
    fn remove_housemate(&mut self, id: &HousemateId);

    /// Increase what `debtor` owes `creditor` in the raw dues.
    ///
    /// An update that would leave the cell negative is discarded. A zero
    /// `amount` also zeroes the simplified due for the pair.
    fn record_debt(&mut self, debtor: &HousemateId, creditor: &HousemateId, amount: i64);

    /// Record a payment of `amount` from `from` to `to`.
    ///
    /// The raw due of `from` to `to` absorbs as much of the payment as it
    /// holds and any excess is recorded as a raw due of `to` to `from`, so
    /// the net balance of `from` rises by exactly `amount` and that of `to`
    /// falls by the same. The simplified due is reduced by `amount` unless
    /// that would take it below zero. Non-positive amounts are ignored.
    fn settle(&mut self, from: &HousemateId, to: &HousemateId, amount: i64);

    /// Recompute the simplified dues from the raw dues.
    fn simplify(&mut self);

    /// Drop every housemate and due.
    fn reset(&mut self);

    fn contains(&self, id: &HousemateId) -> bool;

    fn housemate_count(&self) -> usize;

    /// Resident housemates in name order.
    fn housemates(&self) -> Vec<HousemateId>;

    /// What `id` is owed minus what `id` owes, over the raw dues.
    fn net_balance(&self, id: &HousemateId) -> i64;

    /// Total `id` owes across the raw dues.
    fn raw_outgoing(&self, id: &HousemateId) -> i64;

    /// Total owed to `id` across the raw dues.
    fn raw_incoming(&self, id: &HousemateId) -> i64;

    /// Raw due from `from` to `to`.
    fn raw_due(&self, from: &HousemateId, to: &HousemateId) -> i64;

    /// Simplified due from `from` to `to`.
    fn simplified_due(&self, from: &HousemateId, to: &HousemateId) -> i64;

    /// Copy of everything `id` owes in the simplified view, keyed by creditor.
    fn simplified_dues(&self, id: &HousemateId) -> BTreeMap<HousemateId, i64>;

    /// Non-zero simplified dues, ordered by debtor then creditor.
    fn transfers(&self) -> Vec<Transfer>;

    fn snapshot(&self) -> LedgerSnapshot;

    /// Net balance of every resident.
    fn net_balances(&self) -> BTreeMap<HousemateId, i64> {
        self.housemates()
            .into_iter()
            .map(|id| {
                let balance = self.net_balance(&id);
                (id, balance)
            })
            .collect()
    }

    /// `true` if recording every `(debtor, creditor, amount)` debt keeps each
    /// housemate's raw totals within `i64`.
    ///
    /// Callers check this before a batch of [`record_debt`](Self::record_debt)
    /// calls; net balances and simplification are exact only while it holds.
    fn can_record(&self, debts: &[(&HousemateId, &HousemateId, i64)]) -> bool {
        let mut outgoing: BTreeMap<&HousemateId, i64> = BTreeMap::new();
        let mut incoming: BTreeMap<&HousemateId, i64> = BTreeMap::new();
        for &(debtor, creditor, amount) in debts {
            let out = outgoing
                .entry(debtor)
                .or_insert_with(|| self.raw_outgoing(debtor));
            let Some(next_out) = out.checked_add(amount) else {
                return false;
            };
            *out = next_out;

            let inc = incoming
                .entry(creditor)
                .or_insert_with(|| self.raw_incoming(creditor));
            let Some(next_in) = inc.checked_add(amount) else {
                return false;
            };
            *inc = next_in;
        }
        true
    }

    /// `true` if `id` owes or is owed anything in the simplified view.
    fn has_pending_dues(&self, id: &HousemateId) -> bool {
        self.transfers()
            .iter()
            .any(|t| t.amount > 0 && (&t.debtor == id || &t.creditor == id))
    }
}
