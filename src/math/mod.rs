//! Weighted-invariant arithmetic.
//!
//! The pool holds `V = Π Bᵢ^Wᵢ` constant across swaps, where `Bᵢ` is the
//! reserve of asset `i` in raw units and `Wᵢ` its weight.  All evaluation
//! happens in `f64`; results are rounded half away from zero to whole
//! units by [`round_units`].
//!
//! | Function | Computes |
//! |----------|----------|
//! | [`exact_in_output`] | output for a fixed input |
//! | [`exact_out_input`] | input required for a fixed output |
//! | [`rebalanced_weight`] | weight after a liquidity change |
//! | [`log_invariant`] | `ln V` for invariant checks |

mod balancer;
mod rounding;

#[cfg(test)]
mod proptest_properties;

pub use balancer::{exact_in_output, exact_out_input, log_invariant, rebalanced_weight};
pub use rounding::round_units;
