//! Configuration and asset registry operations.

use tracing::{info, warn};

use super::{
    AssetDescriptor, DeregisterParams, InitParams, Pool, RegisterParams, SetActiveParams,
    StatusEntry,
};
use crate::config::PoolConfiguration;
use crate::domain::{AssetId, Quantity, Weight, MAX_AMOUNT};
use crate::error::{PoolError, Result};
use crate::traits::{BalanceLedger, Host};

impl Pool {
    /// Initializes the pool, or replaces its manager and chain.
    ///
    /// The first call must be authorized by the pool account; later calls
    /// by the current manager.  Re-initializing keeps the asset id
    /// allocator and settlement state.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] without the required authority.
    /// - [`PoolError::UnknownAccount`] if `manager` does not exist.
    /// - [`PoolError::InvalidChain`] / [`PoolError::NameTooLong`] for a bad
    ///   chain label.
    pub(crate) fn init<H: Host>(&mut self, host: &H, params: InitParams) -> Result<()> {
        match self.config.get() {
            Some(current) => host.require_auth(&current.manager)?,
            None => host.require_auth(&self.account)?,
        }
        if !host.is_account(&params.manager) {
            return Err(PoolError::UnknownAccount(params.manager.to_string()));
        }
        let chain_id = self.settings.resolve_chain(&params.chain)?;
        let next = match self.config.get() {
            Some(current) => PoolConfiguration {
                manager: params.manager,
                chain_id,
                ..current.clone()
            },
            None => PoolConfiguration::new(params.manager, chain_id),
        };
        info!(manager = %next.manager, chain = %chain_id, "pool configured");
        self.config.set(next);
        Ok(())
    }

    /// Registers an asset and creates its liquidity share class.
    ///
    /// The asset starts with zero weight and inactive.  Its share class
    /// takes the custodian token's precision; an existing class under the
    /// same code is reset.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] if `actor` did not sign.
    /// - [`PoolError::NotConfigured`] before `init`.
    /// - [`PoolError::InvalidCustodian`] if the custodian is the pool.
    /// - [`PoolError::NameTooLong`] / [`PoolError::InvalidChain`] for a bad
    ///   chain label.
    /// - [`PoolError::UnknownToken`] if the custodian has no such token.
    /// - [`PoolError::SymbolMismatch`] if the precision differs from the
    ///   custodian's.
    pub(crate) fn register_asset<H: Host>(
        &mut self,
        host: &H,
        params: RegisterParams,
    ) -> Result<AssetId> {
        host.require_auth(&params.actor)?;
        let asset_id = self.configuration()?.next_asset_id()?;
        if params.custodian == self.account {
            return Err(PoolError::InvalidCustodian);
        }
        let home_chain = self.settings.resolve_chain(&params.chain)?;
        let native = host
            .token_symbol(&params.custodian, params.symbol.code())
            .ok_or_else(|| {
                PoolError::UnknownToken(format!("{}@{}", params.symbol.code(), params.custodian))
            })?;
        if native != params.symbol {
            return Err(PoolError::SymbolMismatch(
                "symbol precision differs from custodian token",
            ));
        }

        let share_symbol = native.with_code(self.share_code(asset_id)?);
        self.shares
            .reset_class(self.account.clone(), Quantity::new(MAX_AMOUNT, share_symbol.clone()))?;
        self.configuration_mut()?.allocate_asset_id()?;
        self.assets.emplace(
            asset_id,
            AssetDescriptor {
                asset_id,
                home_chain,
                custodian: params.custodian,
                symbol: params.symbol,
                active: false,
                metadata: params.metadata,
                weight: Weight::ZERO,
            },
        );
        info!(%asset_id, shares = %share_symbol, actor = %params.actor, "asset registered");
        Ok(asset_id)
    }

    /// Removes an asset and empties its share class.
    ///
    /// Pooled balances on the custodian are left in place; shares still
    /// held by users lose their backing.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] unless `actor` is the manager
    ///   and signed.
    /// - [`PoolError::UnknownAsset`] for an unregistered id.
    pub(crate) fn deregister_asset<H: Host>(
        &mut self,
        host: &H,
        params: DeregisterParams,
    ) -> Result<()> {
        self.require_manager(host, Some(&params.actor))?;
        self.find_asset(params.asset_id)?;
        let code = self.share_code(params.asset_id)?;
        if let Some(stats) = self.shares.remove_class(&code) {
            if stats.supply.amount() > 0 {
                warn!(
                    asset_id = %params.asset_id,
                    outstanding = %stats.supply,
                    "deregistered asset leaves liquidity shares unbacked"
                );
            }
        }
        self.assets.erase(&params.asset_id);
        info!(asset_id = %params.asset_id, memo = %params.memo, "asset deregistered");
        Ok(())
    }

    /// Freezes or unfreezes an asset.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] unless `actor` is the manager
    ///   and signed.
    /// - [`PoolError::UnknownAsset`] for an unregistered id.
    /// - [`PoolError::SymbolMismatch`] if `symbol` is not the asset's.
    pub(crate) fn set_active<H: Host>(&mut self, host: &H, params: SetActiveParams) -> Result<()> {
        self.require_manager(host, Some(&params.actor))?;
        if self.find_asset(params.asset_id)?.symbol != params.symbol {
            return Err(PoolError::SymbolMismatch("symbol differs from registered asset"));
        }
        self.assets
            .modify(&params.asset_id, |a| a.active = params.active)
            .ok_or(PoolError::UnknownAsset(params.asset_id))?;
        info!(asset_id = %params.asset_id, active = params.active, "asset activity changed");
        Ok(())
    }

    /// Reserve and weight of each requested asset, in request order.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnknownAsset`] for the first unregistered id.
    pub fn query_pool<L: BalanceLedger>(
        &self,
        ledger: &L,
        asset_ids: &[AssetId],
    ) -> Result<Vec<StatusEntry>> {
        asset_ids
            .iter()
            .map(|id| {
                let asset = self.find_asset(*id)?;
                Ok(StatusEntry {
                    asset_id: *id,
                    reserve: self.reserve(ledger, asset),
                    weight: asset.weight,
                })
            })
            .collect()
    }
}
