//! A standard custodian token contract.

use tracing::debug;

use crate::action::{
    Action, CreateParams, IssueParams, RetireParams, TransferParams, CREATE, ISSUE, RETIRE,
    TRANSFER,
};
use crate::domain::{Name, Quantity, Symbol, SymbolCode};
use crate::error::{PoolError, Result};
use crate::traits::Host;

use super::TokenLedger;

/// Longest memo a token action accepts, in bytes.
pub const MAX_MEMO_LEN: usize = 256;

/// A custodian contract holding one ledger of token classes.
///
/// Handles `create`, `issue`, `transfer`, and `retire` the way a standard
/// fungible-token contract does; amounts must be strictly positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenContract {
    ledger: TokenLedger,
}

impl TokenContract {
    /// Creates a contract with no token classes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    /// Balance of `owner` in class `code`.
    #[must_use]
    pub fn balance(&self, owner: &Name, code: &SymbolCode) -> Option<Quantity> {
        self.ledger.balance(owner, code).cloned()
    }

    /// Symbol of class `code`.
    #[must_use]
    pub fn symbol(&self, code: &SymbolCode) -> Option<Symbol> {
        self.ledger.stats(code).map(|s| s.supply.symbol().clone())
    }

    /// Executes one action addressed to this contract.
    ///
    /// Returns the transfer performed, if any, so the host can notify its
    /// parties.
    ///
    /// # Errors
    ///
    /// - [`PoolError::UnknownAction`] for actions other than the four
    ///   standard ones.
    /// - Any authorization, quantity, or balance error of the action.
    pub fn apply<H: Host>(
        &mut self,
        host: &mut H,
        action: &Action,
    ) -> Result<Option<TransferParams>> {
        match action.name().as_str() {
            CREATE => {
                let params: CreateParams = action.decode()?;
                host.require_auth(host.receiver())?;
                self.ledger.create(params.issuer, params.max_supply)?;
                Ok(None)
            }
            ISSUE => {
                let params: IssueParams = action.decode()?;
                check_memo(&params.memo)?;
                let issuer = self
                    .ledger
                    .check_quantity(&params.quantity, false)?
                    .issuer
                    .clone();
                if params.to != issuer {
                    return Err(PoolError::InvalidTransfer(
                        "tokens can only be issued to the issuer",
                    ));
                }
                host.require_auth(&issuer)?;
                self.ledger.mint(&params.quantity)?;
                debug!(quantity = %params.quantity, to = %params.to, "issued");
                Ok(None)
            }
            TRANSFER => {
                let params: TransferParams = action.decode()?;
                self.transfer(host, &params)?;
                Ok(Some(params))
            }
            RETIRE => {
                let params: RetireParams = action.decode()?;
                check_memo(&params.memo)?;
                let issuer = self
                    .ledger
                    .check_quantity(&params.quantity, false)?
                    .issuer
                    .clone();
                host.require_auth(&issuer)?;
                self.ledger.burn(&params.quantity)?;
                Ok(None)
            }
            other => Err(PoolError::UnknownAction(format!(
                "{}::{other}",
                host.receiver()
            ))),
        }
    }

    fn transfer<H: Host>(&mut self, host: &H, params: &TransferParams) -> Result<()> {
        if params.from == params.to {
            return Err(PoolError::InvalidTransfer("cannot transfer to self"));
        }
        host.require_auth(&params.from)?;
        if !host.is_account(&params.to) {
            return Err(PoolError::UnknownAccount(params.to.to_string()));
        }
        self.ledger.check_quantity(&params.quantity, false)?;
        check_memo(&params.memo)?;
        self.ledger
            .move_balance(&params.from, &params.to, &params.quantity)?;
        debug!(
            contract = %host.receiver(),
            from = %params.from,
            to = %params.to,
            quantity = %params.quantity,
            "transferred"
        );
        Ok(())
    }
}

fn check_memo(memo: &str) -> Result<()> {
    if memo.len() > MAX_MEMO_LEN {
        return Err(PoolError::InvalidTransfer("memo has more than 256 bytes"));
    }
    Ok(())
}
