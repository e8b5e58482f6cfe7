//! Conversion of real-valued results to whole token units.

use crate::domain::MAX_AMOUNT;
use crate::error::{PoolError, Result};

/// Rounds `value` half away from zero to whole units.
///
/// # Errors
///
/// Returns [`PoolError::Overflow`] if `value` is not finite or its
/// magnitude exceeds [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use oswaps::math::round_units;
///
/// assert_eq!(round_units(2.5), Ok(3));
/// assert_eq!(round_units(-2.5), Ok(-3));
/// assert_eq!(round_units(18_181_818.18), Ok(18_181_818));
/// assert!(round_units(f64::NAN).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn round_units(value: f64) -> Result<i64> {
    if !value.is_finite() {
        return Err(PoolError::Overflow("non-finite unit value"));
    }
    let rounded = value.round();
    if rounded.abs() > MAX_AMOUNT as f64 {
        return Err(PoolError::Overflow("unit value out of range"));
    }
    Ok(rounded as i64)
}
