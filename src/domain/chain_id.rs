//! Home-chain identifiers.

use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PoolError, Result};

/// A 32-byte chain identifier (the hash of a chain's genesis state).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct ChainId([u8; 32]);

impl ChainId {
    /// Telos mainnet.
    pub const TELOS: Self = Self([
        0x46, 0x67, 0xb2, 0x05, 0xc6, 0x83, 0x8e, 0xf7, 0x0f, 0xf7, 0x98, 0x8f, 0x6e, 0x82, 0x57,
        0xe8, 0xbe, 0x0e, 0x12, 0x84, 0xa2, 0xf5, 0x96, 0x99, 0x05, 0x4a, 0x01, 0x8f, 0x74, 0x3b,
        0x1d, 0x11,
    ]);

    /// Creates a chain id from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Decodes a 64-digit hex string.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidChain`] if the string is not exactly 32
    /// hex-encoded bytes.
    pub fn from_hex(raw: &str) -> Result<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(raw.trim(), &mut bytes)
            .map_err(|_| PoolError::InvalidChain(raw.to_owned()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let raw = <String as Deserialize>::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
