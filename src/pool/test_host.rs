//! A scripted [`Host`] for exercising the pool without the chain.

#![allow(clippy::panic)]

use std::collections::{BTreeMap, BTreeSet};

use crate::action::{Action, Transaction};
use crate::domain::{Name, Quantity, Symbol, SymbolCode};
use crate::traits::{BalanceLedger, Host};

pub(super) fn name(s: &str) -> Name {
    let Ok(n) = Name::new(s) else {
        panic!("valid name {s}");
    };
    n
}

pub(super) fn symbol(code: &str, precision: u8) -> Symbol {
    let Ok(code) = SymbolCode::new(code) else {
        panic!("valid code {code}");
    };
    let Ok(sym) = Symbol::new(code, precision) else {
        panic!("valid symbol");
    };
    sym
}

pub(super) fn foo(amount: i64) -> Quantity {
    Quantity::new(amount, symbol("FOO", 4))
}

pub(super) fn bar(amount: i64) -> Quantity {
    Quantity::new(amount, symbol("BAR", 4))
}

/// Balances, signers, and captured inline actions of one handler call.
#[derive(Debug, Clone)]
pub(super) struct TestHost {
    balances: BTreeMap<(Name, Name, SymbolCode), Quantity>,
    symbols: BTreeMap<(Name, SymbolCode), Symbol>,
    accounts: BTreeSet<Name>,
    signers: Vec<Name>,
    receiver: Name,
    first_receiver: Name,
    transaction: Vec<u8>,
    pub(super) inline: Vec<Action>,
}

impl TestHost {
    /// Pool `oswaps` with custodians `token.foo` (4,FOO) and `token.bar`
    /// (4,BAR).
    pub(super) fn new() -> Self {
        let mut symbols = BTreeMap::new();
        symbols.insert((name("token.foo"), symbol("FOO", 4).code().clone()), symbol("FOO", 4));
        symbols.insert((name("token.bar"), symbol("BAR", 4).code().clone()), symbol("BAR", 4));
        let accounts = ["oswaps", "manager", "alice", "bob", "token.foo", "token.bar"]
            .into_iter()
            .map(name)
            .collect();
        Self {
            balances: BTreeMap::new(),
            symbols,
            accounts,
            signers: Vec::new(),
            receiver: name("oswaps"),
            first_receiver: name("oswaps"),
            transaction: Vec::new(),
            inline: Vec::new(),
        }
    }

    pub(super) fn signed_by(&self, signers: &[&str]) -> Self {
        Self {
            signers: signers.iter().copied().map(name).collect(),
            ..self.clone()
        }
    }

    pub(super) fn executing(&self, tx: &Transaction) -> Self {
        let Ok(transaction) = tx.pack() else {
            panic!("packs");
        };
        Self {
            transaction,
            ..self.clone()
        }
    }

    pub(super) fn notified_by(&self, contract: &str) -> Self {
        Self {
            first_receiver: name(contract),
            ..self.clone()
        }
    }

    pub(super) fn credit(&mut self, custodian: &str, owner: &str, quantity: Quantity) {
        let key = (name(custodian), name(owner), quantity.code().clone());
        let next = match self.balances.get(&key) {
            Some(current) => Quantity::new(
                current.amount() + quantity.amount(),
                quantity.symbol().clone(),
            ),
            None => quantity,
        };
        self.balances.insert(key, next);
    }
}

impl BalanceLedger for TestHost {
    fn balance(&self, custodian: &Name, owner: &Name, code: &SymbolCode) -> Option<Quantity> {
        self.balances
            .get(&(custodian.clone(), owner.clone(), code.clone()))
            .cloned()
    }

    fn token_symbol(&self, custodian: &Name, code: &SymbolCode) -> Option<Symbol> {
        self.symbols.get(&(custodian.clone(), code.clone())).cloned()
    }
}

impl Host for TestHost {
    fn receiver(&self) -> &Name {
        &self.receiver
    }

    fn first_receiver(&self) -> &Name {
        &self.first_receiver
    }

    fn has_auth(&self, account: &Name) -> bool {
        self.signers.contains(account)
    }

    fn is_account(&self, account: &Name) -> bool {
        self.accounts.contains(account)
    }

    fn transaction_bytes(&self) -> &[u8] {
        &self.transaction
    }

    fn send_inline(&mut self, action: Action) {
        self.inline.push(action);
    }
}
