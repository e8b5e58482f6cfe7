//! Deposits, withdrawals, and share issuance.

use tracing::info;

use super::{relay, AddLiquidityIntent, AssetDescriptor, Pool, WithdrawParams};
use crate::action::TransferParams;
use crate::config::Settlement;
use crate::domain::{parse_amount, Name, Quantity, Weight};
use crate::error::{PoolError, Result};
use crate::math::rebalanced_weight;
use crate::traits::Host;

impl Pool {
    /// Applies a deposit whose transfer has just been observed.
    ///
    /// With a zero target weight the asset must already hold a reserve and
    /// be active, and its weight scales with the reserve.  A non-zero
    /// target replaces the weight and freezes the asset.  The depositor
    /// receives shares one-for-one with the deposited units.
    pub(super) fn resolve_add_liquidity<H: Host>(
        &mut self,
        host: &mut H,
        intent: &AddLiquidityIntent,
        transfer: &TransferParams,
    ) -> Result<()> {
        let asset = self.find_asset(intent.asset_id)?.clone();
        self.check_inbound(&*host, &asset, &intent.account, transfer)?;
        let amount = parse_amount(&asset.symbol, &intent.amount)?;
        if amount != transfer.quantity.amount() {
            return Err(PoolError::IntentTransferMismatch("amount differs from intent"));
        }
        let target = Weight::new(intent.weight)?;

        let before = self
            .reserve(&*host, &asset)
            .checked_sub(&transfer.quantity)?
            .amount();
        if target.is_zero() {
            if before <= 0 {
                return Err(PoolError::InsufficientPoolLiquidity(
                    "proportional deposit into an empty reserve",
                ));
            }
            if !asset.active {
                return Err(PoolError::AssetFrozen(asset.asset_id));
            }
        }
        self.rebalance(&asset, target, before, amount)?;

        if amount > 0 {
            self.issue_internal(host, &intent.account, &asset, amount)?;
        }
        info!(
            asset_id = %asset.asset_id,
            account = %intent.account,
            deposit = %transfer.quantity,
            "liquidity added"
        );
        Ok(())
    }

    /// Withdraws pooled assets for `account`, retiring the same number of
    /// its shares.
    ///
    /// Arms the self-settlement state, moves the shares home with an inline
    /// share transfer (which retires them), and relays the underlying
    /// asset to `account`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] without manager authority.
    /// - [`PoolError::UnknownAsset`], [`PoolError::InvalidAmountFormat`],
    ///   [`PoolError::SymbolMismatch`], [`PoolError::InvalidWeight`] for
    ///   bad parameters.
    /// - [`PoolError::InvalidQuantity`] for a non-positive amount.
    /// - [`PoolError::InsufficientPoolLiquidity`] if the withdrawal would
    ///   empty the reserve.
    pub(crate) fn withdraw<H: Host>(&mut self, host: &mut H, params: WithdrawParams) -> Result<()> {
        self.require_manager(&*host, None)?;
        let asset = self.find_asset(params.asset_id)?.clone();
        let amount = parse_amount(&asset.symbol, &params.amount)?;
        if amount <= 0 {
            return Err(PoolError::InvalidQuantity("withdrawal must be positive"));
        }
        let target = Weight::new(params.weight)?;
        let before = self.reserve(&*host, &asset).amount();
        if before <= amount {
            return Err(PoolError::InsufficientPoolLiquidity(
                "withdrawal would empty the reserve",
            ));
        }
        self.rebalance(&asset, target, before, -amount)?;

        self.configuration_mut()?.settlement = Settlement::AwaitingSelfSettlement;
        let shares = Quantity::new(amount, self.share_symbol(asset.asset_id)?);
        host.send_inline(relay::transfer(
            &self.account,
            &self.account,
            &params.account,
            &self.account,
            shares,
            relay::SHARE_RETURN_MEMO.to_owned(),
        )?);
        host.send_inline(relay::transfer(
            &asset.custodian,
            &self.account,
            &self.account,
            &params.account,
            Quantity::new(amount, asset.symbol.clone()),
            relay::WITHDRAWAL_MEMO.to_owned(),
        )?);
        info!(
            asset_id = %asset.asset_id,
            account = %params.account,
            amount = %params.amount,
            "liquidity withdrawn"
        );
        Ok(())
    }

    /// Mints `amount` shares of `asset` to the pool and relays them to
    /// `owner`.
    pub(super) fn issue_internal<H: Host>(
        &mut self,
        host: &mut H,
        owner: &Name,
        asset: &AssetDescriptor,
        amount: i64,
    ) -> Result<()> {
        let shares = Quantity::new(amount, self.share_symbol(asset.asset_id)?);
        self.shares.mint(&shares)?;
        host.send_inline(relay::transfer(
            &self.account,
            &self.account,
            &self.account,
            owner,
            shares,
            relay::LIQUIDITY_RECEIPT_MEMO.to_owned(),
        )?);
        Ok(())
    }

    fn rebalance(
        &mut self,
        asset: &AssetDescriptor,
        target: Weight,
        before: i64,
        delta: i64,
    ) -> Result<()> {
        let weight = rebalanced_weight(asset.weight, target, before, delta)?;
        let freeze = !target.is_zero();
        self.assets
            .modify(&asset.asset_id, |a| {
                a.weight = weight;
                if freeze {
                    a.active = false;
                }
            })
            .ok_or(PoolError::UnknownAsset(asset.asset_id))
    }
}
