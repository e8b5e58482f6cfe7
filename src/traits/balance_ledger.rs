//! Read access to token balances held by custodian contracts.

use crate::domain::{Name, Quantity, Symbol, SymbolCode};

/// Read-only view of every custodian token ledger.
///
/// The pool's own entry on a custodian ledger is its reserve of that
/// asset.
pub trait BalanceLedger {
    /// Balance of `owner` in token `code` on `custodian`, or `None` if the
    /// owner has never held it.
    fn balance(&self, custodian: &Name, owner: &Name, code: &SymbolCode) -> Option<Quantity>;

    /// Full symbol (code and precision) of token `code` on `custodian`, or
    /// `None` if the custodian has no such token.
    fn token_symbol(&self, custodian: &Name, code: &SymbolCode) -> Option<Symbol>;
}
