//! Balancer weights.

use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

/// Exponent assigned to an asset in the balancer invariant `Π Bᵢ^Wᵢ`.
///
/// Weights are finite and non-negative.  They are not normalized: only
/// ratios between weights matter for pricing, and liquidity changes move
/// a single asset's weight without touching the others.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Default,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Weight of a freshly registered asset.
    pub const ZERO: Self = Self(0.0);

    /// Creates a validated weight.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidWeight`] if `value` is negative, `NaN`
    /// or infinite.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(PoolError::InvalidWeight("weight must be finite"));
        }
        if value < 0.0 {
            return Err(PoolError::InvalidWeight("weight must not be negative"));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns `true` for a zero weight.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = PoolError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
