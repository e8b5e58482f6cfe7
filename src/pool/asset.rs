//! Registered asset records and pool status rows.

use serde::{Deserialize, Serialize};

use crate::domain::{AssetId, ChainId, Name, Quantity, Symbol, Weight};

/// An asset the pool trades.
///
/// Created with zero weight and inactive.  An inactive asset cannot be
/// swapped or deposited proportionally; it can still be withdrawn and
/// deposited with an explicit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Unique, never reused.
    pub asset_id: AssetId,
    /// Chain the asset originates from.
    pub home_chain: ChainId,
    /// Token contract holding the pool's reserve.
    pub custodian: Name,
    /// Symbol on the custodian.
    pub symbol: Symbol,
    /// Whether swaps and proportional deposits are allowed.
    pub active: bool,
    /// Free-form description.
    pub metadata: String,
    /// Exponent in the pool invariant.
    pub weight: Weight,
}

/// One row of [`Pool::query_pool`](super::Pool::query_pool).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Asset queried.
    pub asset_id: AssetId,
    /// Pool's balance on the custodian; zero if it holds none.
    pub reserve: Quantity,
    /// Current weight.
    pub weight: Weight,
}
