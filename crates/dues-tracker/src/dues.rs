use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use dues_ledger::HousemateId;
use serde::Serialize;

/// One line of a dues listing: what is owed to `housemate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Due {
    pub housemate: HousemateId,
    pub amount: i64,
}

impl Due {
    pub fn new(housemate: HousemateId, amount: i64) -> Self {
        Self { housemate, amount }
    }
}

impl fmt::Display for Due {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.housemate, self.amount)
    }
}

/// Largest amount first, then by name.
fn listing_order(a: &Due, b: &Due) -> Ordering {
    b.amount
        .cmp(&a.amount)
        .then_with(|| a.housemate.cmp(&b.housemate))
}

/// Build a sorted dues listing from a creditor-keyed map.
pub fn dues_listing(owed: BTreeMap<HousemateId, i64>) -> Vec<Due> {
    let mut dues: Vec<Due> = owed
        .into_iter()
        .map(|(housemate, amount)| Due::new(housemate, amount))
        .collect();
    dues.sort_by(listing_order);
    dues
}
