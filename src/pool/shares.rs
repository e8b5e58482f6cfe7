//! The liquidity share sub-ledger's own `transfer` and `retire` actions.

use tracing::debug;

use super::{relay, Pool};
use crate::action::{RetireParams, TransferParams};
use crate::config::Settlement;
use crate::error::{PoolError, Result};
use crate::traits::Host;

impl Pool {
    /// Moves liquidity shares between an owner and the pool.
    ///
    /// Shares never move between two other accounts, whatever the amount.
    /// Zero amounts are otherwise allowed.  While a withdrawal awaits
    /// settlement, the transfer must return shares to the pool; it then
    /// resets the settlement state and retires exactly what it moved.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PeerTransferForbidden`] if neither side is the pool.
    /// - [`PoolError::InvalidTransfer`] for a self-transfer, an overlong
    ///   memo, or a settlement transfer leaving the pool.
    /// - [`PoolError::AuthorizationDenied`] if neither the pool nor `from`
    ///   signed.
    /// - [`PoolError::UnknownAccount`] if `to` does not exist.
    /// - [`PoolError::UnknownToken`], [`PoolError::InvalidQuantity`],
    ///   [`PoolError::SymbolMismatch`] for a bad quantity.
    /// - [`PoolError::InsufficientBalance`] if `from` holds too few shares.
    pub(crate) fn transfer_shares<H: Host>(
        &mut self,
        host: &mut H,
        params: &TransferParams,
    ) -> Result<()> {
        if params.from != self.account && params.to != self.account {
            return Err(PoolError::PeerTransferForbidden);
        }
        if params.from == params.to {
            return Err(PoolError::InvalidTransfer("cannot transfer to self"));
        }
        if !host.has_auth(&self.account) {
            host.require_auth(&params.from)?;
        }
        if !host.is_account(&params.to) {
            return Err(PoolError::UnknownAccount(params.to.to_string()));
        }
        self.shares.check_quantity(&params.quantity, true)?;
        if params.memo.len() > self.settings.max_memo_len {
            return Err(PoolError::InvalidTransfer("memo too long"));
        }

        let settling = self
            .config
            .get()
            .is_some_and(|c| c.settlement == Settlement::AwaitingSelfSettlement);
        if settling && params.to != self.account {
            return Err(PoolError::InvalidTransfer(
                "settlement transfer must return shares to the pool",
            ));
        }

        self.shares
            .move_balance(&params.from, &params.to, &params.quantity)?;
        debug!(
            from = %params.from,
            to = %params.to,
            quantity = %params.quantity,
            "shares transferred"
        );

        if settling {
            self.configuration_mut()?.settlement = Settlement::Idle;
            host.send_inline(relay::retire(
                &self.account,
                params.quantity.clone(),
                relay::RETIRE_MEMO.to_owned(),
            )?);
        }
        Ok(())
    }

    /// Burns shares held by the pool.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] without pool authority.
    /// - [`PoolError::UnknownToken`], [`PoolError::InvalidQuantity`],
    ///   [`PoolError::SymbolMismatch`] for a bad quantity.
    /// - [`PoolError::InvalidTransfer`] for an overlong memo.
    /// - [`PoolError::InsufficientBalance`] if the pool holds too few.
    pub(crate) fn retire_shares<H: Host>(
        &mut self,
        host: &mut H,
        params: &RetireParams,
    ) -> Result<()> {
        let issuer = self.shares.check_quantity(&params.quantity, false)?.issuer.clone();
        host.require_auth(&issuer)?;
        if params.memo.len() > self.settings.max_memo_len {
            return Err(PoolError::InvalidTransfer("memo too long"));
        }
        self.shares.burn(&params.quantity)?;
        debug!(quantity = %params.quantity, "shares retired");
        Ok(())
    }
}
