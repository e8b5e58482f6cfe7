//! Action and transaction envelopes.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::domain::Name;
use crate::error::{PoolError, Result};

/// A single contract invocation.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Action {
    account: Name,
    name: Name,
    authorization: Vec<Name>,
    data: Vec<u8>,
}

impl Action {
    /// Builds an action whose payload is the borsh encoding of `params`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidName`] if `name` is not a valid name.
    /// - [`PoolError::Codec`] if `params` cannot be encoded.
    pub fn new<T: BorshSerialize>(
        account: Name,
        name: &str,
        authorization: Vec<Name>,
        params: &T,
    ) -> Result<Self> {
        Ok(Self {
            account,
            name: Name::new(name)?,
            authorization,
            data: borsh::to_vec(params)?,
        })
    }

    /// Builds an action from an already encoded payload.
    #[must_use]
    pub fn from_raw(account: Name, name: Name, authorization: Vec<Name>, data: Vec<u8>) -> Self {
        Self {
            account,
            name,
            authorization,
            data,
        }
    }

    /// Returns the receiving contract.
    #[must_use]
    pub fn account(&self) -> &Name {
        &self.account
    }

    /// Returns the action name.
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the authorizing accounts.
    #[must_use]
    pub fn authorization(&self) -> &[Name] {
        &self.authorization
    }

    /// Returns the encoded payload.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if this action is `name` on contract `account`.
    #[must_use]
    pub fn is(&self, account: &Name, name: &str) -> bool {
        &self.account == account && self.name.as_str() == name
    }

    /// Decodes the payload as `T`.  Trailing bytes are an error.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Codec`] if the payload is not a valid `T`.
    pub fn decode<T: BorshDeserialize>(&self) -> Result<T> {
        borsh::from_slice(&self.data).map_err(PoolError::from)
    }
}

/// An ordered list of actions executed atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Transaction {
    actions: Vec<Action>,
}

impl Transaction {
    /// Creates a transaction from its actions.
    #[must_use]
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Returns the actions in execution order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Returns the final action.
    #[must_use]
    pub fn last(&self) -> Option<&Action> {
        self.actions.last()
    }

    /// Returns the action immediately before the final one.
    #[must_use]
    pub fn next_to_last(&self) -> Option<&Action> {
        self.actions.len().checked_sub(2).and_then(|i| self.actions.get(i))
    }

    /// Serializes the transaction to its raw wire bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Codec`] if encoding fails.
    pub fn pack(&self) -> Result<Vec<u8>> {
        borsh::to_vec(self).map_err(PoolError::from)
    }

    /// Deserializes raw wire bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Codec`] if the bytes are not a transaction.
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        borsh::from_slice(bytes).map_err(PoolError::from)
    }
}
