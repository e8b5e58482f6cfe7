//! Balancer-style swap and weight computations.
//!
//! Balances are raw units (`i64`); weights are [`Weight`]s.  Every
//! function validates its inputs and never panics.

use crate::domain::Weight;
use crate::error::{PoolError, Result};

use super::round_units;

#[allow(clippy::cast_precision_loss)]
fn real(units: i64) -> f64 {
    units as f64
}

fn require_positive_balance(balance: i64, what: &'static str) -> Result<()> {
    if balance <= 0 {
        return Err(PoolError::InsufficientPoolLiquidity(what));
    }
    Ok(())
}

fn require_positive_weight(weight: Weight) -> Result<f64> {
    if weight.is_zero() {
        return Err(PoolError::InvalidWeight("swap asset has zero weight"));
    }
    Ok(weight.get())
}

/// Output of an exact-input swap.
///
/// `in_before` and `in_after` are the input reserve before and after the
/// transferred input; `out_before` is the output reserve.  The output
/// reserve after the swap is
///
/// ```text
/// round(B_out · exp(-(W_in / W_out) · ln(B_in_after / B_in)))
/// ```
///
/// and the result is the difference to `out_before`.
///
/// # Errors
///
/// - [`PoolError::InsufficientPoolLiquidity`] if either reserve before the
///   swap is not positive or `in_after < in_before`.
/// - [`PoolError::InvalidWeight`] if either weight is zero.
/// - [`PoolError::Overflow`] if the result is not representable.
///
/// # Examples
///
/// ```
/// use oswaps::domain::Weight;
/// use oswaps::math::exact_in_output;
///
/// let w = Weight::new(1.0).expect("weight");
/// // 1000.0000 FOO : 2000.0000 BAR, sell 100.0000 FOO.
/// let out = exact_in_output(10_000_000, 11_000_000, w, 20_000_000, w).expect("swap");
/// assert_eq!(out, 1_818_182);
/// ```
pub fn exact_in_output(
    in_before: i64,
    in_after: i64,
    in_weight: Weight,
    out_before: i64,
    out_weight: Weight,
) -> Result<i64> {
    require_positive_balance(in_before, "input reserve is empty")?;
    require_positive_balance(out_before, "output reserve is empty")?;
    if in_after < in_before {
        return Err(PoolError::InsufficientPoolLiquidity(
            "input reserve decreased",
        ));
    }
    let w_in = require_positive_weight(in_weight)?;
    let w_out = require_positive_weight(out_weight)?;

    let exponent = -(w_in / w_out) * (real(in_after) / real(in_before)).ln();
    let out_after = round_units(real(out_before) * exponent.exp())?;
    out_before
        .checked_sub(out_after)
        .ok_or(PoolError::Overflow("swap output"))
}

/// Input required by an exact-output swap.
///
/// The input reserve after the swap is
///
/// ```text
/// round(B_in · exp(-(W_out / W_in) · ln(B_out_after / B_out)))
/// ```
///
/// and the result is its difference to `in_before`.
///
/// # Errors
///
/// - [`PoolError::InsufficientPoolLiquidity`] if either reserve is not
///   positive, `out_amount` is not positive, or it would empty the output
///   reserve.
/// - [`PoolError::InvalidWeight`] if either weight is zero.
/// - [`PoolError::Overflow`] if the result is not representable.
pub fn exact_out_input(
    in_before: i64,
    in_weight: Weight,
    out_before: i64,
    out_amount: i64,
    out_weight: Weight,
) -> Result<i64> {
    require_positive_balance(in_before, "input reserve is empty")?;
    require_positive_balance(out_before, "output reserve is empty")?;
    if out_amount <= 0 {
        return Err(PoolError::InsufficientPoolLiquidity(
            "requested output is not positive",
        ));
    }
    let out_after = out_before
        .checked_sub(out_amount)
        .filter(|v| *v > 0)
        .ok_or(PoolError::InsufficientPoolLiquidity(
            "requested output drains the reserve",
        ))?;
    let w_in = require_positive_weight(in_weight)?;
    let w_out = require_positive_weight(out_weight)?;

    let exponent = -(w_out / w_in) * (real(out_after) / real(out_before)).ln();
    let in_after = round_units(real(in_before) * exponent.exp())?;
    in_after
        .checked_sub(in_before)
        .ok_or(PoolError::Overflow("swap input"))
}

/// Weight of an asset after its reserve changes by `delta` raw units.
///
/// A non-zero `target` is returned unchanged.  With a zero target the
/// weight scales with the reserve, `W · (1 + Δ / B)`, so a deposit
/// (`delta > 0`) or withdrawal (`delta < 0`) leaves the asset's price
/// against every other asset unchanged.
///
/// # Errors
///
/// - [`PoolError::InsufficientPoolLiquidity`] if `target` is zero and
///   `balance_before` is not positive.
/// - [`PoolError::InvalidWeight`] if the scaled weight is negative.
///
/// # Examples
///
/// ```
/// use oswaps::domain::Weight;
/// use oswaps::math::rebalanced_weight;
///
/// let w = Weight::new(1.0).expect("weight");
/// let doubled = rebalanced_weight(w, Weight::ZERO, 1_000, 1_000).expect("weight");
/// assert_eq!(doubled.get(), 2.0);
/// ```
pub fn rebalanced_weight(
    current: Weight,
    target: Weight,
    balance_before: i64,
    delta: i64,
) -> Result<Weight> {
    if !target.is_zero() {
        return Ok(target);
    }
    require_positive_balance(balance_before, "proportional change needs a reserve")?;
    Weight::new(current.get() * (1.0 + real(delta) / real(balance_before)))
}

/// Natural logarithm of the weighted invariant `Π Bᵢ^Wᵢ`.
///
/// Assets with zero weight do not contribute.  Returns `None` if any
/// weighted reserve is not positive.
#[must_use]
pub fn log_invariant(reserves: &[(i64, Weight)]) -> Option<f64> {
    reserves
        .iter()
        .filter(|(_, w)| !w.is_zero())
        .try_fold(0.0, |acc, (balance, weight)| {
            (*balance > 0).then(|| acc + weight.get() * real(*balance).ln())
        })
}
