//! The set of housemates currently living in the house.

use std::collections::BTreeSet;

use crate::types::HousemateId;

/// Membership set of resident housemates, iterated in name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directory {
    members: BTreeSet<HousemateId>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a housemate. Returns `false` if they were already present.
    pub fn insert(&mut self, id: HousemateId) -> bool {
        self.members.insert(id)
    }

    /// Remove a housemate. Returns `false` if they were not present.
    pub fn remove(&mut self, id: &HousemateId) -> bool {
        self.members.remove(id)
    }

    pub fn contains(&self, id: &HousemateId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HousemateId> {
        self.members.iter()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}
