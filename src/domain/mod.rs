//! Value types of the pool domain.
//!
//! Every type validates its invariants on construction (and, for names and
//! symbols, again on deserialization), so downstream code can rely on
//! well-formed values.

mod asset_id;
mod chain_id;
mod name;
mod quantity;
mod symbol;
mod weight;

pub use asset_id::AssetId;
pub use chain_id::ChainId;
pub use name::Name;
pub use quantity::{parse_amount, Quantity, MAX_AMOUNT};
pub use symbol::{Symbol, SymbolCode, MAX_PRECISION};
pub use weight::Weight;
