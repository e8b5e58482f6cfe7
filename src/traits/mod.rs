//! Host abstractions consumed by the pool.
//!
//! The pool never touches ledger state it does not own.  Balances of
//! custodied assets come through [`BalanceLedger`]; authorization,
//! transaction introspection, and outbound transfers come through
//! [`Host`].  The in-process [`Chain`](crate::chain::Chain) implements
//! both; a different ledger can be substituted by implementing them.

mod balance_ledger;
mod host;

pub use balance_ledger::BalanceLedger;
pub use host::Host;
