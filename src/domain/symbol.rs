//! Token symbol codes and precision-qualified symbols.

use core::fmt;
use core::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

/// Maximum length of a symbol code.
const MAX_CODE_LEN: usize = 7;

/// Maximum number of decimal places a symbol may carry.
pub const MAX_PRECISION: u8 = 18;

/// An upper-case token ticker such as `FOO` or `LIQA`.
///
/// Codes are 1 to 7 characters `A-Z`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, Serialize)]
#[serde(transparent)]
pub struct SymbolCode(String);

impl SymbolCode {
    /// Creates a validated symbol code.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidSymbol`] if the code is empty, longer
    /// than 7 characters, or not entirely upper-case ASCII letters.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty()
            || value.len() > MAX_CODE_LEN
            || !value.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(PoolError::InvalidSymbol(value));
        }
        Ok(Self(value))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the liquidity-share code for an asset id.
    ///
    /// The id is written in bijective base 26 (`A`..`Z`, `AA`, `AB`, ...)
    /// after `prefix`, so distinct ids always yield distinct codes:
    /// `0 -> LIQA`, `25 -> LIQZ`, `26 -> LIQAA`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NameTooLong`] if the encoded code exceeds 7
    /// characters, or [`PoolError::InvalidSymbol`] for an invalid prefix.
    pub fn for_share_class(prefix: &str, id: u64) -> Result<Self> {
        let mut digits = Vec::new();
        let mut rest = id;
        loop {
            #[allow(clippy::cast_possible_truncation)]
            digits.push(b'A' + (rest % 26) as u8);
            if rest < 26 {
                break;
            }
            rest = rest / 26 - 1;
        }
        digits.reverse();
        if prefix.len() + digits.len() > MAX_CODE_LEN {
            return Err(PoolError::NameTooLong("share symbol exceeds 7 characters"));
        }
        let mut code = String::with_capacity(prefix.len() + digits.len());
        code.push_str(prefix);
        code.extend(digits.into_iter().map(char::from));
        Self::new(code)
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SymbolCode {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl BorshDeserialize for SymbolCode {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let raw = String::deserialize_reader(reader)?;
        Self::new(raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl<'de> Deserialize<'de> for SymbolCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as Deserialize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A symbol code together with its decimal precision, e.g. `4,FOO`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Symbol {
    code: SymbolCode,
    precision: u8,
}

impl Symbol {
    /// Creates a symbol.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidSymbol`] if `precision` exceeds 18.
    pub fn new(code: SymbolCode, precision: u8) -> Result<Self> {
        if precision > MAX_PRECISION {
            return Err(PoolError::InvalidSymbol(format!("{precision},{code}")));
        }
        Ok(Self { code, precision })
    }

    /// Returns the symbol code.
    #[must_use]
    pub fn code(&self) -> &SymbolCode {
        &self.code
    }

    /// Returns the number of decimal places.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns `true` if the precision is within range.
    ///
    /// Always true for symbols built through [`Symbol::new`]; decoded
    /// symbols are checked again before use.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.precision <= MAX_PRECISION
    }

    /// Returns a symbol with the same precision and a different code.
    #[must_use]
    pub fn with_code(&self, code: SymbolCode) -> Self {
        Self {
            code,
            precision: self.precision,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}
