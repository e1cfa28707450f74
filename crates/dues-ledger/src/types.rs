//! Core ledger types: [`HousemateId`] and [`Transfer`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Identifier of a housemate tracked by the ledger.
///
/// Names are opaque; the only rules are that they are non-empty and contain
/// no whitespace or control characters, so they survive a round trip through
/// a whitespace-separated command line. Ordering is plain byte-wise string
/// order, which is also the tie-break order used by debt simplification.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HousemateId(String);

impl HousemateId {
    /// Create a housemate identifier, validating the name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dues_ledger::HousemateId;
    ///
    /// assert!(HousemateId::new("ANDY").is_ok());
    /// assert!(HousemateId::new("").is_err());
    /// assert!(HousemateId::new("two words").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_housemate_name(&name)?;
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HousemateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HousemateId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for HousemateId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<HousemateId> for String {
    fn from(id: HousemateId) -> Self {
        id.0
    }
}

impl AsRef<str> for HousemateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_housemate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LedgerError::InvalidHousemateName {
            name: name.to_string(),
            reason: "name must not be empty".into(),
        });
    }

    if let Some(ch) = name.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(LedgerError::InvalidHousemateName {
            name: name.to_string(),
            reason: format!("contains forbidden character: {ch:?}"),
        });
    }

    Ok(())
}

/// A directed amount owed by `debtor` to `creditor`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transfer {
    pub debtor: HousemateId,
    pub creditor: HousemateId,
    pub amount: i64,
}

impl Transfer {
    pub fn new(debtor: HousemateId, creditor: HousemateId, amount: i64) -> Self {
        Self {
            debtor,
            creditor,
            amount,
        }
    }
}
