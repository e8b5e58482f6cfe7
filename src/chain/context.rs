//! The host view handed to a contract for one action.

use std::collections::{BTreeMap, BTreeSet};

use crate::action::Action;
use crate::domain::{Name, Quantity, Symbol, SymbolCode};
use crate::token::TokenContract;
use crate::traits::{BalanceLedger, Host};

/// Read access to the ledger plus an outbox of inline actions.
///
/// The contract being executed is never reachable through the context:
/// token contracts are lifted out of the ledger while they run, and the
/// pool is borrowed separately.
#[derive(Debug)]
pub struct ActionContext<'a> {
    tokens: &'a BTreeMap<Name, TokenContract>,
    accounts: &'a BTreeSet<Name>,
    receiver: Name,
    first_receiver: Name,
    authorization: &'a [Name],
    transaction: &'a [u8],
    inline: Vec<Action>,
}

impl<'a> ActionContext<'a> {
    pub(super) fn new(
        tokens: &'a BTreeMap<Name, TokenContract>,
        accounts: &'a BTreeSet<Name>,
        receiver: Name,
        first_receiver: Name,
        authorization: &'a [Name],
        transaction: &'a [u8],
    ) -> Self {
        Self {
            tokens,
            accounts,
            receiver,
            first_receiver,
            authorization,
            transaction,
            inline: Vec::new(),
        }
    }

    pub(super) fn into_inline(self) -> Vec<Action> {
        self.inline
    }
}

impl BalanceLedger for ActionContext<'_> {
    fn balance(&self, custodian: &Name, owner: &Name, code: &SymbolCode) -> Option<Quantity> {
        self.tokens.get(custodian)?.balance(owner, code)
    }

    fn token_symbol(&self, custodian: &Name, code: &SymbolCode) -> Option<Symbol> {
        self.tokens.get(custodian)?.symbol(code)
    }
}

impl Host for ActionContext<'_> {
    fn receiver(&self) -> &Name {
        &self.receiver
    }

    fn first_receiver(&self) -> &Name {
        &self.first_receiver
    }

    fn has_auth(&self, account: &Name) -> bool {
        self.authorization.contains(account)
    }

    fn is_account(&self, account: &Name) -> bool {
        self.accounts.contains(account)
    }

    fn transaction_bytes(&self) -> &[u8] {
        self.transaction
    }

    fn send_inline(&mut self, action: Action) {
        self.inline.push(action);
    }
}
