//! Unified error type for the pool engine and its host.
//!
//! Every fallible operation returns [`PoolError`].  Any error aborts the
//! enclosing ledger transaction as a whole: the host restores the state it
//! held before the transaction started, including inbound transfers that
//! were already applied.

use thiserror::Error;

use crate::domain::AssetId;

/// Errors raised by the pool, its share sub-ledger, and the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The named account did not authorize the action.
    #[error("missing authority of {0}")]
    AuthorizationDenied(String),

    /// No descriptor is registered under the asset id.
    #[error("unknown asset id {0}")]
    UnknownAsset(AssetId),

    /// The asset is frozen for swaps and proportional deposits.
    #[error("asset {0} is frozen")]
    AssetFrozen(AssetId),

    /// The transaction enclosing an intent is not shaped `[.., intent, transfer]`.
    #[error("malformed intent transaction: {0}")]
    MalformedIntentTransaction(&'static str),

    /// The recorded intent and the observed transfer disagree.
    #[error("intent does not match transfer: {0}")]
    IntentTransferMismatch(&'static str),

    /// The pool cannot cover the operation with its reserves.
    #[error("insufficient pool liquidity: {0}")]
    InsufficientPoolLiquidity(&'static str),

    /// The transferred amount is below the input required by the swap.
    #[error("insufficient input: required {required}, provided {provided}")]
    InsufficientInput {
        /// Raw units the swap requires.
        required: i64,
        /// Raw units actually transferred.
        provided: i64,
    },

    /// Liquidity shares may only move to or from the pool account.
    #[error("liquidity share transfers must be to or from the pool")]
    PeerTransferForbidden,

    /// A human-readable amount string could not be parsed.
    #[error("invalid amount format: {0}")]
    InvalidAmountFormat(String),

    /// A symbol disagrees with the symbol it is checked against.
    #[error("symbol mismatch: {0}")]
    SymbolMismatch(&'static str),

    /// The chain label names an unsupported chain.
    #[error("unsupported chain {0}")]
    InvalidChain(String),

    /// A label or derived symbol exceeds its length bound.
    #[error("name too long: {0}")]
    NameTooLong(&'static str),

    /// The custodian of an asset cannot be the pool itself.
    #[error("asset custodian cannot be the pool account")]
    InvalidCustodian,

    /// The custodian ledger has no token with this symbol.
    #[error("unknown token {0}")]
    UnknownToken(String),

    /// The referenced account does not exist on the ledger.
    #[error("unknown account {0}")]
    UnknownAccount(String),

    /// The pool has not been initialized.
    #[error("pool is not configured")]
    NotConfigured,

    /// A balance would be overdrawn.
    #[error("overdrawn balance of {owner} in {symbol}")]
    InsufficientBalance {
        /// Account whose balance is insufficient.
        owner: String,
        /// Symbol code of the balance.
        symbol: String,
    },

    /// A token transfer violates a standard transfer rule.
    #[error("invalid transfer: {0}")]
    InvalidTransfer(&'static str),

    /// An account or action name is not well formed.
    #[error("invalid name {0:?}")]
    InvalidName(String),

    /// A symbol code or precision is not well formed.
    #[error("invalid symbol {0:?}")]
    InvalidSymbol(String),

    /// A quantity is negative, zero where forbidden, or out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A weight is negative or not finite.
    #[error("invalid weight: {0}")]
    InvalidWeight(&'static str),

    /// The receiving contract does not implement the action.
    #[error("unknown action {0}")]
    UnknownAction(String),

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Binary (de)serialization failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// Deployment settings are invalid.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Inline actions nested deeper than the host allows.
    #[error("inline action depth exceeded")]
    InlineDepthExceeded,
}

impl From<std::io::Error> for PoolError {
    fn from(err: std::io::Error) -> Self {
        Self::Codec(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = PoolError> = core::result::Result<T, E>;
