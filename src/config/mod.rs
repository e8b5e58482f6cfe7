//! Pool configuration.
//!
//! Two layers exist:
//!
//! | Type | Lifetime | Source |
//! |------|----------|--------|
//! | [`PoolSettings`] | deployment | TOML file or defaults |
//! | [`PoolConfiguration`] | on-ledger singleton | `init` action |
//!
//! Settings bound labels, memos, and inline recursion, and list the
//! chains assets may originate from.  The configuration names the
//! manager, the pool's own chain, the last allocated asset id, and the
//! share settlement state.

mod pool_config;
mod settings;

pub use pool_config::{PoolConfiguration, Settlement};
pub use settings::{ChainSetting, PoolSettings};
