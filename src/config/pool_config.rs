//! The on-ledger configuration record.

use serde::{Deserialize, Serialize};

use crate::domain::{AssetId, ChainId, Name};
use crate::error::Result;

/// Whether the pool is waiting for its own share transfer to settle.
///
/// `withdraw` moves the caller's shares to the pool and arms
/// [`AwaitingSelfSettlement`](Settlement::AwaitingSelfSettlement); the
/// share transfer handler observes the armed state, returns it to
/// [`Idle`](Settlement::Idle), and retires exactly the quantity it moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// No settlement in flight.
    #[default]
    Idle,
    /// The next share transfer into the pool retires what it moves.
    AwaitingSelfSettlement,
}

/// Manager, home chain, id allocator, and settlement state of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfiguration {
    /// Account allowed to administer assets and withdraw.
    pub manager: Name,
    /// Chain the pool itself runs on.
    pub chain_id: ChainId,
    /// Most recently allocated asset id; `None` until the first
    /// registration.
    pub last_asset_id: Option<AssetId>,
    /// Share settlement state; [`Settlement::Idle`] at rest.
    pub settlement: Settlement,
}

impl PoolConfiguration {
    /// A fresh configuration with no assets allocated.
    #[must_use]
    pub fn new(manager: Name, chain_id: ChainId) -> Self {
        Self {
            manager,
            chain_id,
            last_asset_id: None,
            settlement: Settlement::Idle,
        }
    }

    /// The id the next registration will receive.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`](crate::error::PoolError::Overflow)
    /// once the id space is exhausted.
    pub fn next_asset_id(&self) -> Result<AssetId> {
        self.last_asset_id.map_or(Ok(AssetId::FIRST), |last| last.next())
    }

    /// Allocates and records the next asset id.  Ids are never reused.
    ///
    /// # Errors
    ///
    /// See [`next_asset_id`](Self::next_asset_id).
    pub fn allocate_asset_id(&mut self) -> Result<AssetId> {
        let next = self.next_asset_id()?;
        self.last_asset_id = Some(next);
        Ok(next)
    }
}
