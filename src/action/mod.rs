//! Actions and transactions as carried on the host ledger.
//!
//! An [`Action`] names a receiving contract, an action name, the accounts
//! that authorized it, and an opaque borsh-encoded payload.  A
//! [`Transaction`] is an ordered list of actions that executes atomically.
//! The pool introspects the raw bytes of the enclosing transaction to bind
//! an intent to the transfer that follows it, so both types round-trip
//! through borsh exactly.

mod params;
mod transaction;

pub use params::{CreateParams, IssueParams, RetireParams, TransferParams};
pub use transaction::{Action, Transaction};

/// Name of the standard token transfer action.
pub const TRANSFER: &str = "transfer";
/// Name of the standard token retire action.
pub const RETIRE: &str = "retire";
/// Name of the standard token create action.
pub const CREATE: &str = "create";
/// Name of the standard token issue action.
pub const ISSUE: &str = "issue";
