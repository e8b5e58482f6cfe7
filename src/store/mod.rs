//! Persistent keyed storage as seen by contracts on the host ledger.
//!
//! [`Table`] is a keyed multi-row table, [`Singleton`] a single-slot
//! record.  Both are plain owned values: the host snapshots and restores
//! them wholesale to make a transaction atomic, so they hold no interior
//! mutability and no handles into other state.

mod singleton;
mod table;

pub use singleton::Singleton;
pub use table::Table;
