//! Deployment-level settings.

use serde::{Deserialize, Serialize};

use crate::domain::{ChainId, SymbolCode};
use crate::error::{PoolError, Result};

/// Separator between a chain name and an explicit chain id in a label.
const LABEL_SEPARATOR: char = ';';

/// A supported home chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainSetting {
    /// Human label, e.g. `Telos`.
    pub name: String,
    /// Chain id as 64 hex digits.
    pub id: String,
}

impl ChainSetting {
    /// Decodes the configured chain id.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidChain`] if `id` is not valid hex.
    pub fn chain_id(&self) -> Result<ChainId> {
        ChainId::from_hex(&self.id)
    }
}

/// Static settings of a pool deployment.
///
/// # Validation
///
/// - At least one chain; names are unique and non-empty; ids decode.
/// - `share_prefix` is 1 to 6 upper-case letters, so every share code
///   has room for at least one id digit.
/// - `max_inline_depth` is at least 1.
///
/// # Examples
///
/// ```
/// use oswaps::config::PoolSettings;
///
/// let settings = PoolSettings::from_toml_str("max_memo_len = 128").expect("settings");
/// assert_eq!(settings.max_memo_len, 128);
/// assert_eq!(settings.share_prefix, "LIQ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    /// Chains assets may be registered from.
    pub chains: Vec<ChainSetting>,
    /// Longest accepted chain label in `register`.
    pub max_chain_label_len: usize,
    /// Longest accepted transfer memo.
    pub max_memo_len: usize,
    /// Prefix of every liquidity-share symbol code.
    pub share_prefix: String,
    /// Deepest inline-action nesting the host executes.
    pub max_inline_depth: usize,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            chains: vec![ChainSetting {
                name: "Telos".to_owned(),
                id: ChainId::TELOS.to_string(),
            }],
            max_chain_label_len: 100,
            max_memo_len: 256,
            share_prefix: "LIQ".to_owned(),
            max_inline_depth: 16,
        }
    }
}

impl PoolSettings {
    /// Parses and validates settings from TOML.  Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidSettings`] if the document does not
    /// parse or fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| PoolError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validates all settings invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidSettings`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.chains.is_empty() {
            return Err(PoolError::InvalidSettings("no supported chains".to_owned()));
        }
        for (i, chain) in self.chains.iter().enumerate() {
            if chain.name.is_empty() || chain.name.contains(LABEL_SEPARATOR) {
                return Err(PoolError::InvalidSettings(format!(
                    "invalid chain name {:?}",
                    chain.name
                )));
            }
            if self.chains.iter().skip(i + 1).any(|c| c.name == chain.name) {
                return Err(PoolError::InvalidSettings(format!(
                    "duplicate chain {}",
                    chain.name
                )));
            }
            chain
                .chain_id()
                .map_err(|_| PoolError::InvalidSettings(format!("bad id for {}", chain.name)))?;
        }
        if self.share_prefix.len() >= 7 || SymbolCode::new(self.share_prefix.as_str()).is_err() {
            return Err(PoolError::InvalidSettings(format!(
                "invalid share prefix {:?}",
                self.share_prefix
            )));
        }
        if self.max_inline_depth == 0 {
            return Err(PoolError::InvalidSettings(
                "max_inline_depth must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    /// Looks up a supported chain by name.
    #[must_use]
    pub fn chain(&self, name: &str) -> Option<&ChainSetting> {
        self.chains.iter().find(|c| c.name == name)
    }

    /// Resolves a chain label of the form `"<name>"` or
    /// `"<name>;<hex chain id>"` to a chain id.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NameTooLong`] if the label exceeds
    ///   `max_chain_label_len`.
    /// - [`PoolError::InvalidChain`] if the name is unsupported or the
    ///   explicit id differs from the configured one.
    pub fn resolve_chain(&self, label: &str) -> Result<ChainId> {
        if label.len() > self.max_chain_label_len {
            return Err(PoolError::NameTooLong("chain label"));
        }
        let (name, explicit) = match label.split_once(LABEL_SEPARATOR) {
            Some((name, id)) => (name, Some(id)),
            None => (label, None),
        };
        let chain = self
            .chain(name)
            .ok_or_else(|| PoolError::InvalidChain(label.to_owned()))?;
        let id = chain.chain_id()?;
        if let Some(raw) = explicit {
            if ChainId::from_hex(raw)? != id {
                return Err(PoolError::InvalidChain(label.to_owned()));
            }
        }
        Ok(id)
    }
}
