use serde::{Deserialize, Serialize};

/// Configuration for a household.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    /// Maximum number of resident housemates.
    pub capacity: usize,
}

impl HouseConfig {
    pub const DEFAULT_CAPACITY: usize = 3;

    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}
