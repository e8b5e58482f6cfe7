//! Property-based tests for the weighted-invariant math.
//!
//! 1. **Invariant preservation**: an exact-input swap keeps `ln V` within
//!    the rounding of one output unit.
//! 2. **Round trip**: exact-output for the output of an exact-input swap
//!    asks for the original input, up to rounding.
//! 3. **Weight conservation**: a proportional deposit scales the weight by
//!    `(B + ΔB) / B`.
//! 4. **Monotonicity**: more input never yields less output.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{exact_in_output, exact_out_input, log_invariant, rebalanced_weight};
use crate::domain::Weight;

fn weight(v: f64) -> Weight {
    let Ok(w) = Weight::new(v) else {
        panic!("valid weight");
    };
    w
}

#[allow(clippy::cast_precision_loss)]
fn real(v: i64) -> f64 {
    v as f64
}

proptest! {
    #[test]
    fn invariant_preserved_by_exact_in(
        b_in in 1_000_000i64..1_000_000_000,
        b_out in 1_000_000i64..1_000_000_000,
        w_in in 0.1f64..10.0,
        w_out in 0.1f64..10.0,
        fraction in 0.0001f64..0.5,
    ) {
        let amount = (real(b_in) * fraction) as i64;
        let (w_in, w_out) = (weight(w_in), weight(w_out));
        let Ok(out) = exact_in_output(b_in, b_in + amount, w_in, b_out, w_out) else {
            panic!("swap failed");
        };
        prop_assume!(out < b_out);
        let Some(before) = log_invariant(&[(b_in, w_in), (b_out, w_out)]) else {
            panic!("invariant before");
        };
        let Some(after) = log_invariant(&[(b_in + amount, w_in), (b_out - out, w_out)]) else {
            panic!("invariant after");
        };
        let tolerance = w_out.get() / real(b_out - out) + 1e-9;
        prop_assert!((after - before).abs() <= tolerance,
            "drift {} > {}", (after - before).abs(), tolerance);
    }

    #[test]
    fn exact_out_round_trips_exact_in(
        b_in in 1_000_000i64..1_000_000_000,
        b_out in 1_000_000i64..1_000_000_000,
        w_in in 0.5f64..2.0,
        w_out in 0.5f64..2.0,
        fraction in 0.001f64..0.5,
    ) {
        let amount = (real(b_in) * fraction) as i64;
        let (wi, wo) = (weight(w_in), weight(w_out));
        let Ok(out) = exact_in_output(b_in, b_in + amount, wi, b_out, wo) else {
            panic!("exact in failed");
        };
        prop_assume!(out > 0 && out < b_out);
        let Ok(required) = exact_out_input(b_in, wi, b_out, out, wo) else {
            panic!("exact out failed");
        };
        // One output unit is worth this many input units at the post-trade price.
        let marginal = (real(b_in + amount) / w_in) / (real(b_out - out) / w_out);
        let tolerance = 2.0 + marginal;
        prop_assert!(real((required - amount).abs()) <= tolerance,
            "required {} vs input {} (tolerance {})", required, amount, tolerance);
    }

    #[test]
    fn proportional_deposit_conserves_weight_ratio(
        balance in 1i64..1_000_000_000_000,
        delta in 0i64..1_000_000_000_000,
        current in 0.01f64..100.0,
    ) {
        let Ok(next) = rebalanced_weight(weight(current), Weight::ZERO, balance, delta) else {
            panic!("rebalance failed");
        };
        let expected = real(balance + delta) / real(balance);
        let ratio = next.get() / current;
        prop_assert!((ratio - expected).abs() <= expected * 1e-12);
    }

    #[test]
    fn more_input_never_yields_less(
        b_in in 1_000i64..1_000_000_000,
        b_out in 1_000i64..1_000_000_000,
        a in 0i64..1_000_000,
        extra in 0i64..1_000_000,
    ) {
        let w = weight(1.0);
        let Ok(small) = exact_in_output(b_in, b_in + a, w, b_out, w) else {
            panic!("swap failed");
        };
        let Ok(large) = exact_in_output(b_in, b_in + a + extra, w, b_out, w) else {
            panic!("swap failed");
        };
        prop_assert!(large >= small);
    }
}
