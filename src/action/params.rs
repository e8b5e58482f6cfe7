//! Payloads of the standard fungible-token actions.
//!
//! External token contracts and the pool's own liquidity shares share
//! these layouts, so a transfer observed through a notification decodes
//! the same way regardless of which contract executed it.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::domain::{Name, Quantity};

/// `transfer(from, to, quantity, memo)`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TransferParams {
    /// Debited account.
    pub from: Name,
    /// Credited account.
    pub to: Name,
    /// Amount and symbol moved.
    pub quantity: Quantity,
    /// Free-form note.
    pub memo: String,
}

/// `retire(quantity, memo)`: burns supply held by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RetireParams {
    /// Amount and symbol burned.
    pub quantity: Quantity,
    /// Free-form note.
    pub memo: String,
}

/// `create(issuer, max_supply)`: declares a new token class.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreateParams {
    /// Account allowed to issue and retire.
    pub issuer: Name,
    /// Supply cap; its symbol defines the class.
    pub max_supply: Quantity,
}

/// `issue(to, quantity, memo)`: mints new supply.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct IssueParams {
    /// Receiving account.
    pub to: Name,
    /// Amount and symbol minted.
    pub quantity: Quantity,
    /// Free-form note.
    pub memo: String,
}
