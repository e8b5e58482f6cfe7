//! Numeric asset identifiers.

use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

/// Opaque numeric identifier of a registered pool asset.
///
/// Ids are assigned monotonically by the registry and never reused, even
/// after the asset is removed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct AssetId(u64);

impl AssetId {
    /// The first id handed out by a fresh registry.
    pub const FIRST: Self = Self(0);

    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the id following this one.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] once the id space is exhausted.
    pub fn next(&self) -> Result<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(PoolError::Overflow("asset id space exhausted"))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(AssetId::FIRST.next(), Ok(AssetId::new(1)));
    }

    #[test]
    fn next_overflow() {
        assert!(matches!(
            AssetId::new(u64::MAX).next(),
            Err(PoolError::Overflow(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(AssetId::new(42).to_string(), "42");
    }
}
