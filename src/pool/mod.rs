//! The pool contract.
//!
//! [`Pool`] owns the pool's on-ledger state: the configuration singleton,
//! the asset registry, the pending-intent slot, and the liquidity share
//! ledger.  The host hands it each action addressed to the pool through
//! [`Pool::apply`] and each token transfer involving the pool account
//! through [`Pool::on_transfer_notify`].
//!
//! # Intent protocol
//!
//! Value arrives by ordinary token transfers, which the pool only observes
//! after the fact.  A caller therefore submits one transaction ending in
//!
//! ```text
//! [ ..., <intent action on the pool>, <custodian>::transfer(payer -> pool) ]
//! ```
//!
//! The intent action checks that shape against the raw transaction bytes
//! and stores them.  The transfer notification re-reads the intent from
//! those bytes, cross-checks it against the observed transfer, applies
//! the swap or deposit, and clears the slot.  Any failure aborts the whole
//! transaction, inbound transfer included.

mod actions;
mod asset;
mod exchange;
mod intent;
mod liquidity;
mod registry;
mod relay;
mod shares;

#[cfg(test)]
mod proptest_properties;
#[cfg(test)]
mod test_host;

pub use actions::{
    AddLiquidityIntent, DeregisterParams, ExactInputSwapIntent, ExactOutputSwapIntent,
    InitParams, Intent, PoolAction, RegisterParams, SetActiveParams, WithdrawParams,
    ADD_LIQUIDITY, DEREGISTER_ASSET, INIT, REGISTER_ASSET, SET_ACTIVE, SWAP_EXACT_IN,
    SWAP_EXACT_OUT, WITHDRAW,
};
pub use asset::{AssetDescriptor, StatusEntry};
pub use intent::PendingIntent;

use tracing::debug;

use crate::action::{Action, TransferParams};
use crate::config::{PoolConfiguration, PoolSettings};
use crate::domain::{AssetId, Name, Quantity, Symbol, SymbolCode};
use crate::error::{PoolError, Result};
use crate::store::{Singleton, Table};
use crate::token::TokenLedger;
use crate::traits::{BalanceLedger, Host};

/// State of the pool contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    account: Name,
    settings: PoolSettings,
    config: Singleton<PoolConfiguration>,
    assets: Table<AssetId, AssetDescriptor>,
    pending: Singleton<PendingIntent>,
    shares: TokenLedger,
}

impl Pool {
    /// Creates an uninitialized pool running as `account`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidSettings`] if `settings` fail
    /// validation.
    pub fn new(account: Name, settings: PoolSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            account,
            settings,
            config: Singleton::new(),
            assets: Table::new(),
            pending: Singleton::new(),
            shares: TokenLedger::new(),
        })
    }

    /// The pool's own account.
    #[must_use]
    pub fn account(&self) -> &Name {
        &self.account
    }

    /// Deployment settings.
    #[must_use]
    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    /// The configuration record, once initialized.
    #[must_use]
    pub fn config(&self) -> Option<&PoolConfiguration> {
        self.config.get()
    }

    /// Descriptor of a registered asset.
    #[must_use]
    pub fn asset(&self, asset_id: AssetId) -> Option<&AssetDescriptor> {
        self.assets.find(&asset_id)
    }

    /// All registered assets in id order.
    pub fn assets(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.assets.iter().map(|(_, a)| a)
    }

    /// The intent awaiting its transfer, if any.
    #[must_use]
    pub fn pending_intent(&self) -> Option<&PendingIntent> {
        self.pending.get()
    }

    /// The liquidity share ledger.
    #[must_use]
    pub fn shares(&self) -> &TokenLedger {
        &self.shares
    }

    /// Symbol code of an asset's share class.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NameTooLong`] if the id does not fit a code.
    pub fn share_code(&self, asset_id: AssetId) -> Result<SymbolCode> {
        SymbolCode::for_share_class(&self.settings.share_prefix, asset_id.get())
    }

    /// Shares of `asset_id` held by `owner`; zero if none.
    #[must_use]
    pub fn share_balance(&self, owner: &Name, asset_id: AssetId) -> i64 {
        self.share_code(asset_id)
            .ok()
            .and_then(|code| self.shares.balance(owner, &code).map(Quantity::amount))
            .unwrap_or(0)
    }

    /// Executes an action addressed to the pool.
    ///
    /// # Errors
    ///
    /// Any error of the decoded action; see the individual operations.
    pub fn apply<H: Host>(&mut self, host: &mut H, action: &Action) -> Result<()> {
        match PoolAction::decode(action)? {
            PoolAction::Init(p) => self.init(&*host, p),
            PoolAction::RegisterAsset(p) => self.register_asset(&*host, p).map(|_| ()),
            PoolAction::DeregisterAsset(p) => self.deregister_asset(&*host, p),
            PoolAction::SetActive(p) => self.set_active(&*host, p),
            PoolAction::Intent(intent) => self.record_intent(host, action, &intent),
            PoolAction::Withdraw(p) => self.withdraw(host, p),
            PoolAction::Transfer(p) => self.transfer_shares(host, &p),
            PoolAction::Retire(p) => self.retire_shares(host, &p),
        }
    }

    /// Handles the notification of a token transfer involving the pool.
    ///
    /// `host.first_receiver()` is the token contract that executed it.
    ///
    /// # Errors
    ///
    /// Any error of resolving the pending intent against `transfer`; see
    /// [`PoolError::IntentTransferMismatch`].
    pub fn on_transfer_notify<H: Host>(
        &mut self,
        host: &mut H,
        transfer: &TransferParams,
    ) -> Result<()> {
        debug!(
            contract = %host.first_receiver(),
            from = %transfer.from,
            to = %transfer.to,
            quantity = %transfer.quantity,
            "transfer notification"
        );
        self.resolve_intent(host, transfer)
    }

    fn configuration(&self) -> Result<&PoolConfiguration> {
        self.config.get().ok_or(PoolError::NotConfigured)
    }

    fn configuration_mut(&mut self) -> Result<&mut PoolConfiguration> {
        self.config.get_mut().ok_or(PoolError::NotConfigured)
    }

    fn require_manager<H: Host>(&self, host: &H, actor: Option<&Name>) -> Result<()> {
        let manager = &self.configuration()?.manager;
        if let Some(actor) = actor {
            if actor != manager {
                return Err(PoolError::AuthorizationDenied(actor.to_string()));
            }
        }
        host.require_auth(manager)
    }

    fn find_asset(&self, asset_id: AssetId) -> Result<&AssetDescriptor> {
        self.assets
            .find(&asset_id)
            .ok_or(PoolError::UnknownAsset(asset_id))
    }

    fn reserve<L: BalanceLedger>(&self, ledger: &L, asset: &AssetDescriptor) -> Quantity {
        ledger
            .balance(&asset.custodian, &self.account, asset.symbol.code())
            .unwrap_or_else(|| Quantity::zero(asset.symbol.clone()))
    }

    fn share_symbol(&self, asset_id: AssetId) -> Result<Symbol> {
        let code = self.share_code(asset_id)?;
        self.shares
            .stats(&code)
            .map(|s| s.supply.symbol().clone())
            .ok_or_else(|| PoolError::UnknownToken(code.to_string()))
    }
}
