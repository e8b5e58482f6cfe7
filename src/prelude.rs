//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use oswaps::prelude::*;
//! ```

pub use crate::action::{Action, Transaction, TransferParams};
pub use crate::chain::Chain;
pub use crate::config::{PoolConfiguration, PoolSettings, Settlement};
pub use crate::domain::{AssetId, ChainId, Name, Quantity, Symbol, SymbolCode, Weight};
pub use crate::error::{PoolError, Result};
pub use crate::pool::{AssetDescriptor, Intent, Pool, PoolAction, StatusEntry};
pub use crate::traits::{BalanceLedger, Host};
