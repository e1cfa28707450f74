//! The household: business rules over a [`LedgerStore`].
//!
//! [`Household`] owns its store behind a single `RwLock`. Every mutating
//! operation holds the write lock from validation through simplification, so
//! readers only ever observe a ledger between complete operations.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use dues_ledger::{HousemateId, InMemoryLedger, LedgerSnapshot, LedgerStore};
use tracing::{debug, info};

use crate::config::HouseConfig;
use crate::dues::{dues_listing, Due};
use crate::error::{Result, TrackerError};
use crate::expense::Expense;
use crate::traits::{HousemateService, TrackerService};

/// A house of housemates sharing expenses.
pub struct Household<S: LedgerStore = InMemoryLedger> {
    config: HouseConfig,
    store: RwLock<S>,
}

impl Household<InMemoryLedger> {
    /// Create an empty household backed by an in-memory ledger.
    pub fn new(config: HouseConfig) -> Self {
        Self::with_store(config, InMemoryLedger::new())
    }
}

impl Default for Household<InMemoryLedger> {
    fn default() -> Self {
        Self::new(HouseConfig::default())
    }
}

impl<S: LedgerStore> Household<S> {
    /// Create a household over an existing store.
    pub fn with_store(config: HouseConfig, store: S) -> Self {
        Self {
            config,
            store: RwLock::new(store),
        }
    }

    pub fn config(&self) -> &HouseConfig {
        &self.config
    }

    /// Resident housemates in name order.
    pub fn members(&self) -> Result<Vec<HousemateId>> {
        Ok(self.read()?.housemates())
    }

    /// Copy of the current ledger.
    pub fn snapshot(&self) -> Result<LedgerSnapshot> {
        Ok(self.read()?.snapshot())
    }

    /// Drop every housemate and due.
    pub fn reset(&self) -> Result<()> {
        self.write()?.reset();
        info!("household reset");
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, S>> {
        self.store.read().map_err(|_| TrackerError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, S>> {
        self.store.write().map_err(|_| TrackerError::Poisoned)
    }
}

fn ensure_resident<S: LedgerStore>(store: &S, housemate: &HousemateId) -> Result<()> {
    if store.contains(housemate) {
        Ok(())
    } else {
        debug!(%housemate, "housemate not found");
        Err(TrackerError::MemberNotFound(housemate.clone()))
    }
}

impl<S: LedgerStore> HousemateService for Household<S> {
    fn move_in(&self, housemate: &HousemateId) -> Result<()> {
        let mut store = self.write()?;
        if store.contains(housemate) {
            debug!(%housemate, "move-in rejected: already resident");
            return Err(TrackerError::MemberAlreadyExists(housemate.clone()));
        }
        if store.housemate_count() >= self.config.capacity {
            debug!(%housemate, capacity = self.config.capacity, "move-in rejected: house full");
            return Err(TrackerError::HouseFull {
                capacity: self.config.capacity,
            });
        }

        store.add_housemate(housemate);
        info!(%housemate, residents = store.housemate_count(), "housemate moved in");
        Ok(())
    }

    fn move_out(&self, housemate: &HousemateId) -> Result<()> {
        let mut store = self.write()?;
        ensure_resident(&*store, housemate)?;
        if store.has_pending_dues(housemate) {
            debug!(%housemate, "move-out rejected: pending dues");
            return Err(TrackerError::HasPendingDue(housemate.clone()));
        }

        store.remove_housemate(housemate);
        info!(%housemate, residents = store.housemate_count(), "housemate moved out");
        Ok(())
    }
}

impl<S: LedgerStore> TrackerService for Household<S> {
    fn add_expense(&self, expense: &Expense) -> Result<()> {
        let mut store = self.write()?;
        for participant in expense.participants() {
            ensure_resident(&*store, participant)?;
        }

        let Some(share) = expense.share() else {
            debug!(
                payer = %expense.payer,
                amount = expense.amount,
                "expense rejected: share out of range"
            );
            return Err(TrackerError::AmountTooLarge);
        };
        let debts: Vec<_> = expense
            .debtors()
            .map(|debtor| (debtor, &expense.payer, share))
            .collect();
        if !store.can_record(&debts) {
            debug!(payer = %expense.payer, share, "expense rejected: amount too large");
            return Err(TrackerError::AmountTooLarge);
        }

        for &(debtor, payer, share) in &debts {
            store.record_debt(debtor, payer, share);
        }
        store.simplify();

        info!(
            payer = %expense.payer,
            amount = expense.amount,
            share,
            split = expense.headcount(),
            "expense recorded"
        );
        Ok(())
    }

    fn show_dues(&self, housemate: &HousemateId) -> Result<Vec<Due>> {
        let store = self.read()?;
        ensure_resident(&*store, housemate)?;
        Ok(dues_listing(store.simplified_dues(housemate)))
    }

    fn clear_dues(&self, from: &HousemateId, to: &HousemateId, amount: i64) -> Result<i64> {
        let mut store = self.write()?;
        ensure_resident(&*store, from)?;
        ensure_resident(&*store, to)?;

        let due = store.simplified_due(from, to);
        if amount < 0 || amount > due {
            debug!(%from, %to, amount, due, "payment rejected");
            return Err(TrackerError::IncorrectPayment { amount, due });
        }

        let excess = amount.saturating_sub(store.raw_due(from, to));
        if excess > 0 && !store.can_record(&[(to, from, excess)]) {
            debug!(%from, %to, amount, "payment rejected: amount too large");
            return Err(TrackerError::AmountTooLarge);
        }

        store.settle(from, to, amount);
        let remaining = due - amount;
        info!(%from, %to, amount, remaining, "dues cleared");
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn id(name: &str) -> HousemateId {
        HousemateId::new(name).unwrap()
    }

    fn house(names: &[&str]) -> Household {
        let house = Household::default();
        for name in names {
            house.move_in(&id(name)).unwrap();
        }
        house
    }

    fn spend(house: &Household, amount: f64, payer: &str, beneficiaries: &[&str]) -> Result<()> {
        let expense = Expense::new(
            amount,
            id(payer),
            beneficiaries.iter().map(|b| id(b)).collect(),
        );
        house.add_expense(&expense)
    }

    fn lines(dues: &[Due]) -> Vec<String> {
        dues.iter().map(Due::to_string).collect()
    }

    #[test]
    fn move_in_twice_is_rejected() {
        let house = house(&["ANDY"]);
        assert_eq!(
            house.move_in(&id("ANDY")),
            Err(TrackerError::MemberAlreadyExists(id("ANDY")))
        );
        assert_eq!(house.members().unwrap(), vec![id("ANDY")]);
    }

    #[test]
    fn capacity_is_enforced() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        let before = house.snapshot().unwrap();

        assert_eq!(
            house.move_in(&id("REX")),
            Err(TrackerError::HouseFull { capacity: 3 })
        );
        assert_eq!(house.snapshot().unwrap(), before);
        assert_eq!(house.members().unwrap().len(), 3);
    }

    #[test]
    fn duplicate_in_full_house_reports_existing_member() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        assert_eq!(
            house.move_in(&id("BO")),
            Err(TrackerError::MemberAlreadyExists(id("BO")))
        );
    }

    #[test]
    fn zero_capacity_rejects_everyone() {
        let house = Household::new(HouseConfig::with_capacity(0));
        assert_eq!(
            house.move_in(&id("ANDY")),
            Err(TrackerError::HouseFull { capacity: 0 })
        );
    }

    #[test]
    fn larger_capacity_from_config() {
        let house = Household::new(HouseConfig::with_capacity(4));
        for name in ["ANDY", "WOODY", "BO", "REX"] {
            house.move_in(&id(name)).unwrap();
        }
        assert!(house.move_in(&id("HAMM")).is_err());
    }

    #[test]
    fn move_out_unknown_housemate() {
        let house = house(&["ANDY"]);
        assert_eq!(
            house.move_out(&id("REX")),
            Err(TrackerError::MemberNotFound(id("REX")))
        );
    }

    #[test]
    fn expense_splits_between_payer_and_beneficiaries() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 3000.0, "ANDY", &["WOODY", "BO"]).unwrap();
        spend(&house, 300.0, "WOODY", &["BO"]).unwrap();

        assert_eq!(lines(&house.show_dues(&id("BO")).unwrap()), vec!["ANDY 1150", "WOODY 0"]);
        assert_eq!(lines(&house.show_dues(&id("WOODY")).unwrap()), vec!["ANDY 850", "BO 0"]);
        assert_eq!(lines(&house.show_dues(&id("ANDY")).unwrap()), vec!["BO 0", "WOODY 0"]);
    }

    #[test]
    fn expense_with_unknown_beneficiary_changes_nothing() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 3000.0, "ANDY", &["WOODY", "BO"]).unwrap();
        let before = house.snapshot().unwrap();

        assert_eq!(
            spend(&house, 300.0, "WOODY", &["BO", "REX"]),
            Err(TrackerError::MemberNotFound(id("REX")))
        );
        assert_eq!(house.snapshot().unwrap(), before);
    }

    #[test]
    fn expense_with_unknown_payer_is_rejected() {
        let house = house(&["ANDY"]);
        assert_eq!(
            spend(&house, 100.0, "REX", &["ANDY"]),
            Err(TrackerError::MemberNotFound(id("REX")))
        );
    }

    #[test]
    fn payer_listed_as_beneficiary_owes_nothing() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 6000.0, "WOODY", &["WOODY", "ANDY"]).unwrap();
        assert_eq!(lines(&house.show_dues(&id("ANDY")).unwrap()), vec!["WOODY 2000", "BO 0"]);
        assert_eq!(lines(&house.show_dues(&id("WOODY")).unwrap()), vec!["ANDY 0", "BO 0"]);
    }

    #[test]
    fn show_dues_for_unknown_housemate() {
        let house = house(&["ANDY"]);
        assert_eq!(
            house.show_dues(&id("REX")),
            Err(TrackerError::MemberNotFound(id("REX")))
        );
    }

    #[test]
    fn clear_dues_returns_remaining() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 3000.0, "ANDY", &["WOODY", "BO"]).unwrap();
        spend(&house, 300.0, "WOODY", &["BO"]).unwrap();

        assert_eq!(house.clear_dues(&id("BO"), &id("ANDY"), 500), Ok(650));
        assert_eq!(lines(&house.show_dues(&id("BO")).unwrap()), vec!["ANDY 650", "WOODY 0"]);
        assert_eq!(house.clear_dues(&id("BO"), &id("ANDY"), 650), Ok(0));
        assert_eq!(house.move_out(&id("BO")), Ok(()));
    }

    #[test]
    fn overpayment_leaves_ledger_unchanged() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 3000.0, "ANDY", &["WOODY", "BO"]).unwrap();
        let before = house.snapshot().unwrap();

        assert_eq!(
            house.clear_dues(&id("BO"), &id("ANDY"), 2500),
            Err(TrackerError::IncorrectPayment { amount: 2500, due: 1000 })
        );
        assert_eq!(
            house.clear_dues(&id("BO"), &id("ANDY"), -1),
            Err(TrackerError::IncorrectPayment { amount: -1, due: 1000 })
        );
        assert_eq!(house.snapshot().unwrap(), before);
    }

    #[test]
    fn clear_dues_requires_both_residents() {
        let house = house(&["ANDY"]);
        assert_eq!(
            house.clear_dues(&id("ANDY"), &id("REX"), 0),
            Err(TrackerError::MemberNotFound(id("REX")))
        );
        assert_eq!(
            house.clear_dues(&id("REX"), &id("ANDY"), 0),
            Err(TrackerError::MemberNotFound(id("REX")))
        );
    }

    #[test]
    fn pending_dues_block_move_out_both_ways() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 3000.0, "ANDY", &["WOODY", "BO"]).unwrap();
        let before = house.snapshot().unwrap();

        assert_eq!(
            house.move_out(&id("ANDY")),
            Err(TrackerError::HasPendingDue(id("ANDY")))
        );
        assert_eq!(
            house.move_out(&id("BO")),
            Err(TrackerError::HasPendingDue(id("BO")))
        );
        assert_eq!(house.snapshot().unwrap(), before);
    }

    #[test]
    fn settled_household_can_empty_out() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 6000.0, "WOODY", &["ANDY", "BO"]).unwrap();
        spend(&house, 6000.0, "ANDY", &["BO"]).unwrap();

        assert_eq!(lines(&house.show_dues(&id("BO")).unwrap()), vec!["WOODY 4000", "ANDY 1000"]);
        assert_eq!(house.clear_dues(&id("BO"), &id("ANDY"), 1000), Ok(0));
        assert_eq!(house.clear_dues(&id("BO"), &id("WOODY"), 4000), Ok(0));

        for name in ["ANDY", "WOODY", "BO"] {
            assert_eq!(house.move_out(&id(name)), Ok(()));
        }
        assert!(house.members().unwrap().is_empty());
    }

    #[test]
    fn paid_dues_stay_paid_after_the_next_expense() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 6000.0, "WOODY", &["ANDY", "BO"]).unwrap();
        spend(&house, 6000.0, "ANDY", &["BO"]).unwrap();
        assert_eq!(house.clear_dues(&id("BO"), &id("ANDY"), 1000), Ok(0));
        assert_eq!(house.clear_dues(&id("BO"), &id("WOODY"), 4000), Ok(0));

        spend(&house, 0.0, "ANDY", &["BO"]).unwrap();
        assert_eq!(lines(&house.show_dues(&id("BO")).unwrap()), vec!["ANDY 0", "WOODY 0"]);
        assert!(house.snapshot().unwrap().is_settled());

        assert_eq!(house.move_out(&id("ANDY")), Ok(()));
        spend(&house, 0.0, "WOODY", &["BO"]).unwrap();
        assert_eq!(lines(&house.show_dues(&id("BO")).unwrap()), vec!["WOODY 0"]);
        assert_eq!(house.move_out(&id("BO")), Ok(()));
    }

    #[test]
    fn partial_payment_survives_resimplification() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 3000.0, "ANDY", &["WOODY", "BO"]).unwrap();
        spend(&house, 300.0, "WOODY", &["BO"]).unwrap();
        assert_eq!(house.clear_dues(&id("BO"), &id("ANDY"), 500), Ok(650));

        spend(&house, 0.0, "WOODY", &["BO"]).unwrap();
        assert_eq!(lines(&house.show_dues(&id("BO")).unwrap()), vec!["ANDY 650", "WOODY 0"]);
        assert_eq!(lines(&house.show_dues(&id("WOODY")).unwrap()), vec!["ANDY 850", "BO 0"]);
    }

    #[test]
    fn oversized_expense_is_rejected_untouched() {
        let house = house(&["ANDY", "WOODY", "BO"]);
        spend(&house, 1e19, "ANDY", &["BO"]).unwrap();
        let before = house.snapshot().unwrap();

        assert_eq!(
            spend(&house, 1e19, "ANDY", &["WOODY"]),
            Err(TrackerError::AmountTooLarge)
        );
        assert_eq!(spend(&house, 1e30, "WOODY", &["BO"]), Err(TrackerError::AmountTooLarge));
        assert_eq!(house.snapshot().unwrap(), before);

        assert_eq!(
            lines(&house.show_dues(&id("BO")).unwrap()),
            vec!["ANDY 5000000000000000000", "WOODY 0"]
        );
        spend(&house, 100.0, "WOODY", &["ANDY"]).unwrap();
    }

    #[test]
    fn reset_empties_the_household() {
        let house = house(&["ANDY", "WOODY"]);
        spend(&house, 100.0, "ANDY", &["WOODY"]).unwrap();
        house.reset().unwrap();
        assert_eq!(house.snapshot().unwrap(), LedgerSnapshot::default());
    }

    #[test]
    fn concurrent_move_ins_respect_capacity() {
        let house = Household::new(HouseConfig::with_capacity(3));
        std::thread::scope(|scope| {
            for i in 0..16 {
                let house = &house;
                scope.spawn(move || {
                    let _ = house.move_in(&id(&format!("H{i}")));
                });
            }
        });
        assert_eq!(house.members().unwrap().len(), 3);
    }

    proptest! {
        #[test]
        fn clear_dues_reduces_the_due_exactly(
            amount in 0.0f64..100_000.0,
            paid in 0i64..60_000,
        ) {
            let house = house(&["ANDY", "WOODY", "BO"]);
            spend(&house, amount, "ANDY", &["WOODY", "BO"]).unwrap();
            let due = house.snapshot().unwrap()
                .simplified
                .iter()
                .find(|t| t.debtor == id("BO") && t.creditor == id("ANDY"))
                .map(|t| t.amount)
                .unwrap_or(0);
            let before = house.snapshot().unwrap();

            match house.clear_dues(&id("BO"), &id("ANDY"), paid) {
                Ok(remaining) => {
                    prop_assert!(paid <= due);
                    prop_assert_eq!(remaining, due - paid);
                }
                Err(err) => {
                    prop_assert!(paid > due);
                    prop_assert_eq!(err, TrackerError::IncorrectPayment { amount: paid, due });
                    prop_assert_eq!(house.snapshot().unwrap(), before);
                }
            }
        }

        #[test]
        fn balances_stay_conserved(
            expenses in prop::collection::vec((0.0f64..10_000.0, 0usize..3, 0usize..3), 0..20),
        ) {
            let names = ["ANDY", "BO", "WOODY"];
            let house = house(&names);
            for (amount, payer, beneficiary) in expenses {
                spend(&house, amount, names[payer], &[names[beneficiary]]).unwrap();
            }
            let snapshot = house.snapshot().unwrap();
            prop_assert_eq!(snapshot.net_balances().values().sum::<i64>(), 0);
            prop_assert!(snapshot.simplified.len() < names.len());
        }
    }
}
