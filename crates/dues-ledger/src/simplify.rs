//! Debt simplification.
//!
//! Collapses a set of net balances into a short list of transfers using a
//! greedy rule: repeatedly match the largest debtor with the largest
//! creditor, settle the smaller of the two amounts, and carry the remainder
//! forward. Each round zeroes at least one balance, so `n` housemates need at
//! most `n - 1` transfers. The result is not guaranteed to be the minimum
//! transfer count.
//!
//! Ties are broken by name: when several housemates share the lowest (or
//! highest) balance, the one that sorts first is chosen.

use std::collections::BTreeMap;

use crate::types::{HousemateId, Transfer};

/// Compute simplified transfers for the given net balances.
///
/// Positive balances are owed money, negative balances owe money. Zero
/// balances are ignored. If the balances do not sum to zero the unmatched
/// remainder is left without a transfer.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use dues_ledger::{simplify::settle_balances, HousemateId};
///
/// let mut balances = BTreeMap::new();
/// balances.insert(HousemateId::new("ANDY").unwrap(), 2000);
/// balances.insert(HousemateId::new("BO").unwrap(), -1150);
/// balances.insert(HousemateId::new("WOODY").unwrap(), -850);
///
/// let transfers = settle_balances(&balances);
/// assert_eq!(transfers.len(), 2);
/// assert_eq!(transfers[0].debtor.as_str(), "BO");
/// assert_eq!(transfers[0].amount, 1150);
/// ```
pub fn settle_balances(balances: &BTreeMap<HousemateId, i64>) -> Vec<Transfer> {
    let mut working: Vec<(&HousemateId, i64)> = balances
        .iter()
        .filter(|(_, balance)| **balance != 0)
        .map(|(id, balance)| (id, *balance))
        .collect();
    let mut transfers = Vec::new();

    while let Some((debtor, creditor)) = extremes(&working) {
        let debt = working[debtor].1;
        let credit = working[creditor].1;
        if debt >= 0 || credit <= 0 {
            break;
        }

        let amount = credit.min(debt.saturating_neg());
        transfers.push(Transfer::new(
            working[debtor].0.clone(),
            working[creditor].0.clone(),
            amount,
        ));

        let left = credit + debt;
        if left >= 0 {
            working[debtor].1 = 0;
            working[creditor].1 = left;
        } else {
            working[creditor].1 = 0;
            working[debtor].1 = left;
        }
        working.retain(|(_, balance)| *balance != 0);
    }

    transfers
}

/// Indices of the lowest and highest balance; first in name order on ties.
fn extremes(working: &[(&HousemateId, i64)]) -> Option<(usize, usize)> {
    let (first, rest) = working.split_first()?;
    let (mut min, mut max) = (0, 0);
    let (mut low, mut high) = (first.1, first.1);

    for (offset, (_, balance)) in rest.iter().enumerate() {
        if *balance < low {
            low = *balance;
            min = offset + 1;
        }
        if *balance > high {
            high = *balance;
            max = offset + 1;
        }
    }

    Some((min, max))
}
