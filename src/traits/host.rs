//! The execution context an action handler runs in.

use crate::action::Action;
use crate::domain::Name;
use crate::error::{PoolError, Result};

use super::BalanceLedger;

/// Capabilities the ledger grants a contract while it handles one action.
///
/// # Contract
///
/// - [`receiver`](Host::receiver) is the contract whose code is running.
/// - [`first_receiver`](Host::first_receiver) is the contract the action
///   was addressed to; it differs from the receiver only while handling a
///   notification.
/// - Actions passed to [`send_inline`](Host::send_inline) run after the
///   current handler returns, in order, inside the same transaction.  If
///   any of them fails the whole transaction is rolled back.
pub trait Host: BalanceLedger {
    /// The contract executing.
    fn receiver(&self) -> &Name;

    /// The contract the current action was addressed to.
    fn first_receiver(&self) -> &Name;

    /// Whether `account` authorized the current action.
    fn has_auth(&self, account: &Name) -> bool;

    /// Whether `account` exists on the ledger.
    fn is_account(&self, account: &Name) -> bool;

    /// Raw bytes of the transaction being executed.
    fn transaction_bytes(&self) -> &[u8];

    /// Schedules an action to run after the current one.
    fn send_inline(&mut self, action: Action);

    /// Fails unless `account` authorized the current action.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::AuthorizationDenied`] naming the account.
    fn require_auth(&self, account: &Name) -> Result<()> {
        if self.has_auth(account) {
            Ok(())
        } else {
            Err(PoolError::AuthorizationDenied(account.to_string()))
        }
    }
}
