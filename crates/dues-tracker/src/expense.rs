//! Expense splitting.

use std::iter;

use dues_ledger::HousemateId;

/// An amount paid by one housemate and shared equally with others.
///
/// The amount is divided by the payer plus every beneficiary, so the payer
/// carries their own share. Each beneficiary then owes the payer one share.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub amount: f64,
    pub payer: HousemateId,
    pub beneficiaries: Vec<HousemateId>,
}

impl Expense {
    pub fn new(amount: f64, payer: HousemateId, beneficiaries: Vec<HousemateId>) -> Self {
        Self {
            amount,
            payer,
            beneficiaries,
        }
    }

    /// Number of people the amount is split between.
    pub fn headcount(&self) -> usize {
        1 + self.beneficiaries.len()
    }

    /// One person's share, rounded half away from zero.
    ///
    /// `None` when the rounded share is not representable as an `i64`.
    pub fn share(&self) -> Option<i64> {
        let share = (self.amount / self.headcount() as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        (share.is_finite() && share >= i64::MIN as f64 && share < i64::MAX as f64)
            .then_some(share as i64)
    }

    /// The payer followed by every beneficiary.
    pub fn participants(&self) -> impl Iterator<Item = &HousemateId> {
        iter::once(&self.payer).chain(self.beneficiaries.iter())
    }

    /// Beneficiaries who owe the payer a share. A payer listed among their
    /// own beneficiaries counts towards the split but owes nobody.
    pub fn debtors(&self) -> impl Iterator<Item = &HousemateId> {
        self.beneficiaries.iter().filter(move |b| **b != self.payer)
    }
}
