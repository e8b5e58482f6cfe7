//! Ledger account and action names.

use core::fmt;
use core::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, Result};

/// Maximum length of a name.
const MAX_NAME_LEN: usize = 12;

/// An account or action name on the host ledger.
///
/// Names are 1 to 12 characters drawn from `a-z`, `1-5` and `.`, and may
/// not end with a dot.  Validation also runs on deserialization, so a name
/// decoded from a transaction is always well formed.
///
/// # Examples
///
/// ```
/// use oswaps::domain::Name;
///
/// let alice = Name::new("alice").expect("valid name");
/// assert_eq!(alice.as_str(), "alice");
/// assert!(Name::new("Alice").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidName`] if the name is empty, longer than
    /// 12 characters, contains characters outside `a-z1-5.`, or ends with
    /// a dot.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let well_formed = !value.is_empty()
            && value.len() <= MAX_NAME_LEN
            && !value.ends_with('.')
            && value
                .bytes()
                .all(|b| matches!(b, b'a'..=b'z' | b'1'..=b'5' | b'.'));
        if !well_formed {
            return Err(PoolError::InvalidName(value));
        }
        Ok(Self(value))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Name {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl BorshDeserialize for Name {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let raw = String::deserialize_reader(reader)?;
        Self::new(raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as Deserialize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
