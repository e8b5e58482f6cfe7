//! Fungible token ledgers.
//!
//! [`TokenLedger`] is the storage and bookkeeping shared by every token
//! class on the ledger: the custodian contracts of pooled assets and the
//! pool's own liquidity shares.  [`TokenContract`] wraps a ledger with the
//! standard `create` / `issue` / `transfer` / `retire` actions of an
//! external custodian.

mod contract;
mod ledger;

pub use contract::{TokenContract, MAX_MEMO_LEN};
pub use ledger::{CurrencyStats, TokenLedger};
