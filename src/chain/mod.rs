//! A deterministic in-process ledger host.
//!
//! [`Chain`] runs [`Transaction`]s against a set of accounts, standard
//! token contracts, and one [`Pool`].  It provides exactly what the pool
//! needs from a ledger:
//!
//! - whole-transaction atomicity: a failing transaction leaves no trace;
//! - post-transfer notifications: after a token contract executes a
//!   transfer from or to the pool, the pool's notification handler runs;
//! - inline actions, executed depth-first after the action (and its
//!   notifications) that sent them, up to a bounded depth;
//! - raw transaction bytes for intent introspection.

mod context;

pub use context::ActionContext;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::action::{Action, Transaction, TransferParams};
use crate::config::PoolSettings;
use crate::domain::{Name, Quantity, Symbol, SymbolCode};
use crate::error::{PoolError, Result};
use crate::pool::Pool;
use crate::token::TokenContract;
use crate::traits::BalanceLedger;

/// Ledger state: accounts, token contracts, and the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    accounts: BTreeSet<Name>,
    tokens: BTreeMap<Name, TokenContract>,
    pool: Pool,
    max_inline_depth: usize,
}

impl Chain {
    /// Creates a ledger with the pool deployed as `pool_account`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidSettings`] if `settings` fail
    /// validation.
    pub fn new(pool_account: Name, settings: PoolSettings) -> Result<Self> {
        let max_inline_depth = settings.max_inline_depth;
        let pool = Pool::new(pool_account.clone(), settings)?;
        Ok(Self {
            accounts: BTreeSet::from([pool_account]),
            tokens: BTreeMap::new(),
            pool,
            max_inline_depth,
        })
    }

    /// Opens an account.  Opening an existing account is a no-op.
    pub fn create_account(&mut self, account: Name) {
        self.accounts.insert(account);
    }

    /// Opens `account` and deploys a token contract on it.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidCustodian`] if `account` is the pool.
    pub fn deploy_token(&mut self, account: Name) -> Result<()> {
        if &account == self.pool.account() {
            return Err(PoolError::InvalidCustodian);
        }
        self.accounts.insert(account.clone());
        self.tokens.entry(account).or_default();
        Ok(())
    }

    /// Whether `account` exists.
    #[must_use]
    pub fn is_account(&self, account: &Name) -> bool {
        self.accounts.contains(account)
    }

    /// The pool contract's state.
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The token contract deployed on `account`.
    #[must_use]
    pub fn token(&self, account: &Name) -> Option<&TokenContract> {
        self.tokens.get(account)
    }

    /// Executes `actions` as one transaction signed by `signers`.
    ///
    /// # Errors
    ///
    /// See [`push_transaction`](Self::push_transaction).
    pub fn push_actions(&mut self, actions: Vec<Action>, signers: &[Name]) -> Result<()> {
        self.push_transaction(&Transaction::new(actions), signers)
    }

    /// Executes a transaction atomically.
    ///
    /// Every top-level authorization must be among `signers`.  On any
    /// error the ledger is restored to its state before the call.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] if an action claims an
    ///   authorization nobody signed.
    /// - [`PoolError::InlineDepthExceeded`] if inline actions nest too deep.
    /// - Any error raised by an action, notification, or inline action.
    #[tracing::instrument(skip_all, fields(actions = tx.actions().len()))]
    pub fn push_transaction(&mut self, tx: &Transaction, signers: &[Name]) -> Result<()> {
        for action in tx.actions() {
            if let Some(missing) = action.authorization().iter().find(|a| !signers.contains(a)) {
                return Err(PoolError::AuthorizationDenied(missing.to_string()));
            }
        }
        let bytes = tx.pack()?;
        let snapshot = self.clone();
        let outcome = tx
            .actions()
            .iter()
            .try_for_each(|action| self.run_action(action, &bytes, 0));
        match outcome {
            Ok(()) => {
                debug!("transaction committed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "transaction rolled back");
                *self = snapshot;
                Err(e)
            }
        }
    }

    fn run_action(&mut self, action: &Action, tx: &[u8], depth: usize) -> Result<()> {
        if depth > self.max_inline_depth {
            return Err(PoolError::InlineDepthExceeded);
        }
        let receiver = action.account().clone();
        if !self.accounts.contains(&receiver) {
            return Err(PoolError::UnknownAccount(receiver.to_string()));
        }

        let inline = if &receiver == self.pool.account() {
            let mut ctx = ActionContext::new(
                &self.tokens,
                &self.accounts,
                receiver.clone(),
                receiver.clone(),
                action.authorization(),
                tx,
            );
            self.pool.apply(&mut ctx, action)?;
            ctx.into_inline()
                .into_iter()
                .map(|sent| (receiver.clone(), sent))
                .collect()
        } else {
            self.run_token_action(action, tx)?
        };

        for (sender, sent) in inline {
            if let Some(foreign) = sent.authorization().iter().find(|a| **a != sender) {
                return Err(PoolError::AuthorizationDenied(foreign.to_string()));
            }
            self.run_action(&sent, tx, depth + 1)?;
        }
        Ok(())
    }

    /// Runs an action on a token contract, then notifies the pool if the
    /// action was a transfer involving it.  Returns the inline actions
    /// sent, in order, each with its sender.
    fn run_token_action(&mut self, action: &Action, tx: &[u8]) -> Result<Vec<(Name, Action)>> {
        let contract_account = action.account().clone();
        let mut contract = self.tokens.remove(&contract_account).ok_or_else(|| {
            PoolError::UnknownAction(format!("{contract_account}::{}", action.name()))
        })?;
        let outcome = {
            let mut ctx = ActionContext::new(
                &self.tokens,
                &self.accounts,
                contract_account.clone(),
                contract_account.clone(),
                action.authorization(),
                tx,
            );
            contract
                .apply(&mut ctx, action)
                .map(|transfer| (transfer, ctx.into_inline()))
        };
        self.tokens.insert(contract_account.clone(), contract);
        let (transfer, sent) = outcome?;
        let mut inline: Vec<(Name, Action)> = sent
            .into_iter()
            .map(|a| (contract_account.clone(), a))
            .collect();

        let pool_account = self.pool.account().clone();
        let involves_pool = |t: &TransferParams| t.from == pool_account || t.to == pool_account;
        if let Some(transfer) = transfer.filter(involves_pool) {
            let mut ctx = ActionContext::new(
                &self.tokens,
                &self.accounts,
                pool_account.clone(),
                contract_account,
                action.authorization(),
                tx,
            );
            self.pool.on_transfer_notify(&mut ctx, &transfer)?;
            inline.extend(ctx.into_inline().into_iter().map(|a| (pool_account.clone(), a)));
        }
        Ok(inline)
    }
}

impl BalanceLedger for Chain {
    fn balance(&self, custodian: &Name, owner: &Name, code: &SymbolCode) -> Option<Quantity> {
        if custodian == self.pool.account() {
            return self.pool.shares().balance(owner, code).cloned();
        }
        self.tokens.get(custodian)?.balance(owner, code)
    }

    fn token_symbol(&self, custodian: &Name, code: &SymbolCode) -> Option<Symbol> {
        if custodian == self.pool.account() {
            return self
                .pool
                .shares()
                .stats(code)
                .map(|s| s.supply.symbol().clone());
        }
        self.tokens.get(custodian)?.symbol(code)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::action::{CreateParams, IssueParams};

    fn name(s: &str) -> Name {
        let Ok(n) = Name::new(s) else {
            panic!("valid name {s}");
        };
        n
    }

    fn foo(amount: i64) -> Quantity {
        let Ok(code) = SymbolCode::new("FOO") else {
            panic!("valid code");
        };
        let Ok(symbol) = Symbol::new(code, 4) else {
            panic!("valid symbol");
        };
        Quantity::new(amount, symbol)
    }

    fn action<T: borsh::BorshSerialize>(
        contract: &str,
        act: &str,
        auth: &str,
        params: &T,
    ) -> Action {
        let Ok(a) = Action::new(name(contract), act, vec![name(auth)], params) else {
            panic!("encodes {act}");
        };
        a
    }

    fn transfer(from: &str, to: &str, amount: i64, memo: &str) -> Action {
        let params = TransferParams {
            from: name(from),
            to: name(to),
            quantity: foo(amount),
            memo: memo.to_owned(),
        };
        action("token.foo", "transfer", from, &params)
    }

    /// A ledger with `token.foo` issuing FOO to `alice`, who holds 100.0000.
    fn funded() -> Chain {
        let Ok(mut chain) = Chain::new(name("oswaps"), PoolSettings::default()) else {
            panic!("valid settings");
        };
        chain.create_account(name("alice"));
        chain.create_account(name("bob"));
        let Ok(()) = chain.deploy_token(name("token.foo")) else {
            panic!("deploy");
        };
        let create = CreateParams {
            issuer: name("alice"),
            max_supply: foo(1_000_000_000),
        };
        let issue = IssueParams {
            to: name("alice"),
            quantity: foo(1_000_000),
            memo: String::new(),
        };
        let Ok(()) = chain.push_actions(
            vec![
                action("token.foo", "create", "token.foo", &create),
                action("token.foo", "issue", "alice", &issue),
            ],
            &[name("token.foo"), name("alice")],
        ) else {
            panic!("mint");
        };
        chain
    }

    fn balance(chain: &Chain, owner: &str) -> Option<i64> {
        let Ok(code) = SymbolCode::new("FOO") else {
            panic!("valid code");
        };
        chain
            .balance(&name("token.foo"), &name(owner), &code)
            .map(|q| q.amount())
    }

    #[test]
    fn transfer_moves_balance() {
        let mut chain = funded();
        assert_eq!(
            chain.push_actions(vec![transfer("alice", "bob", 250_000, "hi")], &[name("alice")]),
            Ok(())
        );
        assert_eq!(balance(&chain, "alice"), Some(750_000));
        assert_eq!(balance(&chain, "bob"), Some(250_000));
    }

    #[test]
    fn later_failure_rolls_back_earlier_actions() {
        let mut chain = funded();
        let before = chain.clone();
        assert!(matches!(
            chain.push_actions(
                vec![
                    transfer("alice", "bob", 250_000, ""),
                    transfer("bob", "alice", 500_000, ""),
                ],
                &[name("alice"), name("bob")],
            ),
            Err(PoolError::InsufficientBalance { .. })
        ));
        assert_eq!(chain, before);
    }

    #[test]
    fn create_needs_contract_authority() {
        let mut chain = funded();
        let create = CreateParams {
            issuer: name("bob"),
            max_supply: foo(1_000),
        };
        assert_eq!(
            chain.push_actions(
                vec![action("token.foo", "create", "bob", &create)],
                &[name("bob")]
            ),
            Err(PoolError::AuthorizationDenied("token.foo".to_owned()))
        );
    }

    #[test]
    fn issue_only_to_issuer() {
        let mut chain = funded();
        let issue = IssueParams {
            to: name("bob"),
            quantity: foo(1),
            memo: String::new(),
        };
        assert!(matches!(
            chain.push_actions(
                vec![action("token.foo", "issue", "alice", &issue)],
                &[name("alice")]
            ),
            Err(PoolError::InvalidTransfer(_))
        ));
    }

    #[test]
    fn transfer_rules() {
        let mut chain = funded();
        let signers = [name("alice")];
        assert_eq!(
            chain.push_actions(vec![transfer("alice", "carol", 1, "")], &signers),
            Err(PoolError::UnknownAccount("carol".to_owned()))
        );
        assert!(matches!(
            chain.push_actions(vec![transfer("alice", "alice", 1, "")], &signers),
            Err(PoolError::InvalidTransfer(_))
        ));
        assert!(matches!(
            chain.push_actions(vec![transfer("alice", "bob", 0, "")], &signers),
            Err(PoolError::InvalidQuantity(_))
        ));
        assert!(matches!(
            chain.push_actions(
                vec![transfer("alice", "bob", 1, &"m".repeat(257))],
                &signers
            ),
            Err(PoolError::InvalidTransfer(_))
        ));
    }

    #[test]
    fn unknown_targets_rejected() {
        let mut chain = funded();
        let raw = Action::from_raw(name("token.foo"), name("burnall"), vec![], vec![]);
        assert!(matches!(
            chain.push_actions(vec![raw], &[]),
            Err(PoolError::UnknownAction(_))
        ));
        let nowhere = Action::from_raw(name("nowhere"), name("ping"), vec![], vec![]);
        assert_eq!(
            chain.push_actions(vec![nowhere], &[]),
            Err(PoolError::UnknownAccount("nowhere".to_owned()))
        );
        let plain = Action::from_raw(name("bob"), name("ping"), vec![], vec![]);
        assert!(matches!(
            chain.push_actions(vec![plain], &[]),
            Err(PoolError::UnknownAction(_))
        ));
    }

    #[test]
    fn pool_account_cannot_host_a_token() {
        let mut chain = funded();
        assert_eq!(
            chain.deploy_token(name("oswaps")),
            Err(PoolError::InvalidCustodian)
        );
        assert!(chain.token(&name("oswaps")).is_none());
        assert!(chain.is_account(&name("oswaps")));
    }

    #[test]
    fn donation_to_unconfigured_pool_is_kept() {
        let mut chain = funded();
        assert_eq!(
            chain.push_actions(vec![transfer("alice", "oswaps", 10, "")], &[name("alice")]),
            Ok(())
        );
        assert_eq!(balance(&chain, "oswaps"), Some(10));
        assert!(chain.pool().pending_intent().is_none());
    }
}
