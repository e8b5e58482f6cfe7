//! The pool's action vocabulary.
//!
//! Every action addressed to the pool decodes into exactly one
//! [`PoolAction`] variant by its name; the three intent actions also
//! decode into [`Intent`], the form stored and re-read by the correlation
//! protocol.  Unknown names are errors.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::action::{Action, RetireParams, TransferParams, RETIRE, TRANSFER};
use crate::domain::{AssetId, Name, Symbol};
use crate::error::{PoolError, Result};

/// `init` action name.
pub const INIT: &str = "init";
/// `regasset` action name.
pub const REGISTER_ASSET: &str = "regasset";
/// `forgetasset` action name.
pub const DEREGISTER_ASSET: &str = "forgetasset";
/// `setactive` action name.
pub const SET_ACTIVE: &str = "setactive";
/// `addliquidity` action name.
pub const ADD_LIQUIDITY: &str = "addliquidity";
/// `swapexactin` action name.
pub const SWAP_EXACT_IN: &str = "swapexactin";
/// `swapexactout` action name.
pub const SWAP_EXACT_OUT: &str = "swapexactout";
/// `withdraw` action name.
pub const WITHDRAW: &str = "withdraw";

/// Initializes or reconfigures the pool.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct InitParams {
    /// New manager account.
    pub manager: Name,
    /// Label of the chain the pool runs on.
    pub chain: String,
}

/// Registers an asset held by an external custodian.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RegisterParams {
    /// Registering account.
    pub actor: Name,
    /// Home chain label, `"<name>"` or `"<name>;<hex id>"`.
    pub chain: String,
    /// Token contract that custodies the asset.
    pub custodian: Name,
    /// Symbol of the asset on the custodian.
    pub symbol: Symbol,
    /// Free-form description.
    pub metadata: String,
}

/// Removes an asset and its share class.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DeregisterParams {
    /// Acting manager.
    pub actor: Name,
    /// Asset to remove.
    pub asset_id: AssetId,
    /// Free-form note.
    pub memo: String,
}

/// Freezes or unfreezes an asset.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SetActiveParams {
    /// Acting manager.
    pub actor: Name,
    /// Asset to change.
    pub asset_id: AssetId,
    /// Symbol the caller expects the asset to carry.
    pub symbol: Symbol,
    /// New active flag.
    pub active: bool,
}

/// Declares a deposit of `amount` into `asset_id`.
///
/// A zero `weight` scales the asset's weight with its reserve; a non-zero
/// `weight` replaces it and freezes the asset.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct AddLiquidityIntent {
    /// Depositor; must be the payer of the transfer.
    pub account: Name,
    /// Asset deposited.
    pub asset_id: AssetId,
    /// Human-readable amount, e.g. `"1000.0000 FOO"`.
    pub amount: String,
    /// Target weight, or zero for a proportional change.
    pub weight: f64,
}

/// Declares a swap of a fixed input amount.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ExactInputSwapIntent {
    /// Payer of the input.
    pub sender: Name,
    /// Receiver of the output.
    pub recipient: Name,
    /// Asset paid in.
    pub in_asset_id: AssetId,
    /// Asset paid out.
    pub out_asset_id: AssetId,
    /// Human-readable input amount.
    pub in_amount: String,
    /// Note forwarded with the output.
    pub memo: String,
}

/// Declares a swap for a fixed output amount; excess input is refunded.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ExactOutputSwapIntent {
    /// Payer of the input.
    pub sender: Name,
    /// Receiver of the output.
    pub recipient: Name,
    /// Asset paid in.
    pub in_asset_id: AssetId,
    /// Asset paid out.
    pub out_asset_id: AssetId,
    /// Human-readable output amount.
    pub out_amount: String,
    /// Note forwarded with the output.
    pub memo: String,
}

/// Withdraws pooled assets against liquidity shares.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct WithdrawParams {
    /// Share holder receiving the underlying asset.
    pub account: Name,
    /// Asset withdrawn.
    pub asset_id: AssetId,
    /// Human-readable amount.
    pub amount: String,
    /// Target weight, or zero for a proportional change.
    pub weight: f64,
}

/// A declared intent awaiting its transfer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Deposit liquidity.
    AddLiquidity(AddLiquidityIntent),
    /// Swap a fixed input.
    ExactInput(ExactInputSwapIntent),
    /// Swap for a fixed output.
    ExactOutput(ExactOutputSwapIntent),
}

impl Intent {
    /// Decodes an intent action.
    ///
    /// # Errors
    ///
    /// - [`PoolError::MalformedIntentTransaction`] if the action is not one
    ///   of the three intent actions.
    /// - [`PoolError::Codec`] if its payload does not decode.
    pub fn decode(action: &Action) -> Result<Self> {
        match action.name().as_str() {
            ADD_LIQUIDITY => Ok(Self::AddLiquidity(action.decode()?)),
            SWAP_EXACT_IN => Ok(Self::ExactInput(action.decode()?)),
            SWAP_EXACT_OUT => Ok(Self::ExactOutput(action.decode()?)),
            _ => Err(PoolError::MalformedIntentTransaction(
                "next-to-last action is not an intent",
            )),
        }
    }

    /// The account expected to pay.
    #[must_use]
    pub fn payer(&self) -> &Name {
        match self {
            Self::AddLiquidity(i) => &i.account,
            Self::ExactInput(i) => &i.sender,
            Self::ExactOutput(i) => &i.sender,
        }
    }
}

/// Every action the pool handles, decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolAction {
    /// `init`.
    Init(InitParams),
    /// `regasset`.
    RegisterAsset(RegisterParams),
    /// `forgetasset`.
    DeregisterAsset(DeregisterParams),
    /// `setactive`.
    SetActive(SetActiveParams),
    /// `addliquidity`, `swapexactin`, or `swapexactout`.
    Intent(Intent),
    /// `withdraw`.
    Withdraw(WithdrawParams),
    /// Liquidity share `transfer`.
    Transfer(TransferParams),
    /// Liquidity share `retire`.
    Retire(RetireParams),
}

impl PoolAction {
    /// Decodes an action addressed to the pool.
    ///
    /// # Errors
    ///
    /// - [`PoolError::UnknownAction`] for names the pool does not handle.
    /// - [`PoolError::Codec`] if the payload does not decode.
    pub fn decode(action: &Action) -> Result<Self> {
        Ok(match action.name().as_str() {
            INIT => Self::Init(action.decode()?),
            REGISTER_ASSET => Self::RegisterAsset(action.decode()?),
            DEREGISTER_ASSET => Self::DeregisterAsset(action.decode()?),
            SET_ACTIVE => Self::SetActive(action.decode()?),
            ADD_LIQUIDITY | SWAP_EXACT_IN | SWAP_EXACT_OUT => Self::Intent(Intent::decode(action)?),
            WITHDRAW => Self::Withdraw(action.decode()?),
            TRANSFER => Self::Transfer(action.decode()?),
            RETIRE => Self::Retire(action.decode()?),
            other => return Err(PoolError::UnknownAction(other.to_owned())),
        })
    }

    /// Encodes the action for contract `pool` with the given authorization.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Codec`] if the payload cannot be encoded (for
    /// example a `NaN` weight).
    pub fn to_action(&self, pool: &Name, authorization: Vec<Name>) -> Result<Action> {
        let pool = pool.clone();
        match self {
            Self::Init(p) => Action::new(pool, INIT, authorization, p),
            Self::RegisterAsset(p) => Action::new(pool, REGISTER_ASSET, authorization, p),
            Self::DeregisterAsset(p) => Action::new(pool, DEREGISTER_ASSET, authorization, p),
            Self::SetActive(p) => Action::new(pool, SET_ACTIVE, authorization, p),
            Self::Intent(Intent::AddLiquidity(p)) => {
                Action::new(pool, ADD_LIQUIDITY, authorization, p)
            }
            Self::Intent(Intent::ExactInput(p)) => {
                Action::new(pool, SWAP_EXACT_IN, authorization, p)
            }
            Self::Intent(Intent::ExactOutput(p)) => {
                Action::new(pool, SWAP_EXACT_OUT, authorization, p)
            }
            Self::Withdraw(p) => Action::new(pool, WITHDRAW, authorization, p),
            Self::Transfer(p) => Action::new(pool, TRANSFER, authorization, p),
            Self::Retire(p) => Action::new(pool, RETIRE, authorization, p),
        }
    }
}
