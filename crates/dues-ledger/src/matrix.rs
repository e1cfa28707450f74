//! Square matrix of pairwise dues between housemates.
//!
//! A cell `(debtor, creditor)` holds what `debtor` owes `creditor`. Every
//! ordered pair of distinct members has a cell, created at zero when the
//! second of the two joins. Cells never go negative: an adjustment that would
//! take a cell below zero is discarded.

use std::collections::BTreeMap;

use crate::types::{HousemateId, Transfer};

/// Pairwise dues, keyed by debtor then creditor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DueMatrix {
    cells: BTreeMap<HousemateId, BTreeMap<HousemateId, i64>>,
}

impl DueMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row and column of zeroes for `id` against every existing member.
    ///
    /// Adding a member twice resets their row and column to zero.
    pub fn add_member(&mut self, id: &HousemateId) {
        let others: Vec<HousemateId> = self.cells.keys().filter(|k| *k != id).cloned().collect();

        let row = others.iter().map(|other| (other.clone(), 0)).collect();
        self.cells.insert(id.clone(), row);

        for other in &others {
            if let Some(row) = self.cells.get_mut(other) {
                row.insert(id.clone(), 0);
            }
        }
    }

    /// Drop the row and column for `id`.
    pub fn remove_member(&mut self, id: &HousemateId) {
        self.cells.remove(id);
        for row in self.cells.values_mut() {
            row.remove(id);
        }
    }

    /// What `debtor` owes `creditor`; zero for unknown pairs.
    pub fn get(&self, debtor: &HousemateId, creditor: &HousemateId) -> i64 {
        self.cells
            .get(debtor)
            .and_then(|row| row.get(creditor))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite a cell. Returns `false` if the pair has no cell.
    pub fn set(&mut self, debtor: &HousemateId, creditor: &HousemateId, amount: i64) -> bool {
        match self.cell_mut(debtor, creditor) {
            Some(cell) => {
                *cell = amount;
                true
            }
            None => false,
        }
    }

    /// Add `delta` to a cell.
    ///
    /// Returns `false` and leaves the cell untouched when the pair has no
    /// cell, or when the result would be negative or overflow.
    pub fn adjust(&mut self, debtor: &HousemateId, creditor: &HousemateId, delta: i64) -> bool {
        let Some(cell) = self.cell_mut(debtor, creditor) else {
            return false;
        };
        match cell.checked_add(delta) {
            Some(next) if next >= 0 => {
                *cell = next;
                true
            }
            _ => false,
        }
    }

    /// Copy of everything `debtor` owes, keyed by creditor.
    pub fn owed_by(&self, debtor: &HousemateId) -> BTreeMap<HousemateId, i64> {
        self.cells.get(debtor).cloned().unwrap_or_default()
    }

    /// Copy of everything owed to `creditor`, keyed by debtor.
    pub fn owed_to(&self, creditor: &HousemateId) -> BTreeMap<HousemateId, i64> {
        self.cells
            .iter()
            .filter_map(|(debtor, row)| row.get(creditor).map(|amount| (debtor.clone(), *amount)))
            .collect()
    }

    /// Total `debtor` owes across all creditors, saturating at `i64::MAX`.
    pub fn owed_by_total(&self, debtor: &HousemateId) -> i64 {
        self.cells
            .get(debtor)
            .map(|row| saturating_sum(row.values()))
            .unwrap_or(0)
    }

    /// Total owed to `creditor` across all debtors, saturating at `i64::MAX`.
    pub fn owed_to_total(&self, creditor: &HousemateId) -> i64 {
        saturating_sum(self.cells.values().filter_map(|row| row.get(creditor)))
    }

    /// Zero every cell, keeping the membership.
    pub fn clear_values(&mut self) {
        for row in self.cells.values_mut() {
            for cell in row.values_mut() {
                *cell = 0;
            }
        }
    }

    /// Drop every member and cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Non-zero cells as transfers, ordered by debtor then creditor.
    pub fn transfers(&self) -> Vec<Transfer> {
        self.cells
            .iter()
            .flat_map(|(debtor, row)| {
                row.iter()
                    .filter(|(_, amount)| **amount != 0)
                    .map(move |(creditor, amount)| {
                        Transfer::new(debtor.clone(), creditor.clone(), *amount)
                    })
            })
            .collect()
    }

    fn cell_mut(&mut self, debtor: &HousemateId, creditor: &HousemateId) -> Option<&mut i64> {
        self.cells.get_mut(debtor).and_then(|row| row.get_mut(creditor))
    }
}

fn saturating_sum<'a>(values: impl Iterator<Item = &'a i64>) -> i64 {
    values.fold(0i64, |acc, v| acc.saturating_add(*v))
}
