//! Symbol-tagged token quantities and human-readable amount parsing.

use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::{Symbol, SymbolCode};
use crate::error::{PoolError, Result};

/// Largest magnitude a quantity may hold (`2^62 - 1`).
pub const MAX_AMOUNT: i64 = (1_i64 << 62) - 1;

/// An amount of raw token units tagged with its [`Symbol`].
///
/// `amount` counts the smallest unit, so `1000.0000 FOO` at precision 4
/// is stored as `10_000_000`.  Arithmetic is checked and only combines
/// quantities of the same symbol.
///
/// # Examples
///
/// ```
/// use oswaps::domain::{Quantity, Symbol, SymbolCode};
///
/// let foo = Symbol::new(SymbolCode::new("FOO").expect("code"), 4).expect("symbol");
/// let q = Quantity::new(10_000_000, foo);
/// assert_eq!(q.to_string(), "1000.0000 FOO");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Quantity {
    amount: i64,
    symbol: Symbol,
}

impl Quantity {
    /// Creates a quantity from raw units.
    #[must_use]
    pub const fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// Creates a zero quantity of `symbol`.
    #[must_use]
    pub const fn zero(symbol: Symbol) -> Self {
        Self { amount: 0, symbol }
    }

    /// Parses a human-readable amount such as `"1000.0000 FOO"` for `symbol`.
    ///
    /// # Errors
    ///
    /// See [`parse_amount`].
    pub fn parse(symbol: &Symbol, text: &str) -> Result<Self> {
        Ok(Self::new(parse_amount(symbol, text)?, symbol.clone()))
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the symbol.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the symbol code.
    #[must_use]
    pub fn code(&self) -> &SymbolCode {
        self.symbol.code()
    }

    /// Returns `true` if the amount is in range and the symbol is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-MAX_AMOUNT..=MAX_AMOUNT).contains(&self.amount) && self.symbol.is_valid()
    }

    /// Checked addition of a same-symbol quantity.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SymbolMismatch`] if the symbols differ.
    /// - [`PoolError::Overflow`] if the result leaves `±MAX_AMOUNT`.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.combine(other, i64::checked_add, "quantity addition overflow")
    }

    /// Checked subtraction of a same-symbol quantity.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SymbolMismatch`] if the symbols differ.
    /// - [`PoolError::Overflow`] if the result leaves `±MAX_AMOUNT`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.combine(other, i64::checked_sub, "quantity subtraction overflow")
    }

    fn combine(
        &self,
        other: &Self,
        op: fn(i64, i64) -> Option<i64>,
        overflow: &'static str,
    ) -> Result<Self> {
        if self.symbol != other.symbol {
            return Err(PoolError::SymbolMismatch("quantities carry different symbols"));
        }
        let amount = op(self.amount, other.amount)
            .filter(|v| (-MAX_AMOUNT..=MAX_AMOUNT).contains(v))
            .ok_or(PoolError::Overflow(overflow))?;
        Ok(Self::new(amount, self.symbol.clone()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let magnitude = self.amount.unsigned_abs();
        let precision = u32::from(self.symbol.precision());
        if precision == 0 {
            return write!(f, "{sign}{magnitude} {}", self.symbol.code());
        }
        let scale = 10u64.pow(precision);
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            magnitude / scale,
            magnitude % scale,
            self.symbol.code(),
            width = precision as usize
        )
    }
}

/// Parses `"<integer>[.<fraction>] <CODE>"` into raw units of `symbol`.
///
/// The fraction may carry fewer digits than the symbol's precision
/// (`"1.5 FOO"` at precision 4 is `15_000`), never more.
///
/// # Errors
///
/// - [`PoolError::SymbolMismatch`] if `<CODE>` differs from the symbol code.
/// - [`PoolError::InvalidAmountFormat`] if the text is not of that shape,
///   is negative, carries too many decimals, or exceeds the amount range.
pub fn parse_amount(symbol: &Symbol, text: &str) -> Result<i64> {
    let malformed = || PoolError::InvalidAmountFormat(text.to_owned());

    let (number, code) = text.trim().split_once(' ').ok_or_else(malformed)?;
    if code.trim() != symbol.code().as_str() {
        return Err(PoolError::SymbolMismatch("amount symbol differs from asset"));
    }

    let (whole, fraction) = match number.split_once('.') {
        Some((w, f)) => (w, f),
        None => (number, ""),
    };
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) {
        return Err(malformed());
    }
    if number.contains('.') && fraction.is_empty() {
        return Err(malformed());
    }

    let precision = usize::from(symbol.precision());
    if fraction.len() > precision {
        return Err(PoolError::InvalidAmountFormat(format!(
            "{text}: more than {precision} decimals"
        )));
    }

    let scale = 10i64.pow(u32::from(symbol.precision()));
    let whole: i64 = whole.parse().map_err(|_| malformed())?;
    let mut frac: i64 = if fraction.is_empty() {
        0
    } else {
        fraction.parse().map_err(|_| malformed())?
    };
    for _ in fraction.len()..precision {
        frac *= 10;
    }

    whole
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac))
        .filter(|v| *v <= MAX_AMOUNT)
        .ok_or_else(malformed)
}
