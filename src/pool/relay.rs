//! Outbound transfers the pool sends as inline actions.
//!
//! Every relayed action is authorized by the pool account alone.

use crate::action::{Action, RetireParams, TransferParams, RETIRE, TRANSFER};
use crate::domain::{Name, Quantity};
use crate::error::Result;

/// Memo on shares minted for a deposit.
pub(crate) const LIQUIDITY_RECEIPT_MEMO: &str = "oswaps liquidity receipt";
/// Memo on the underlying asset paid out by `withdraw`.
pub(crate) const WITHDRAWAL_MEMO: &str = "oswaps withdrawal";
/// Memo on shares returned for retirement.
pub(crate) const SHARE_RETURN_MEMO: &str = "oswaps liquidity return";
/// Memo on shares retired after a withdrawal.
pub(crate) const RETIRE_MEMO: &str = "oswaps liquidity retired";

/// A `transfer` of `quantity` on `contract`, sent by `pool`.
pub(crate) fn transfer(
    contract: &Name,
    pool: &Name,
    from: &Name,
    to: &Name,
    quantity: Quantity,
    memo: String,
) -> Result<Action> {
    let params = TransferParams {
        from: from.clone(),
        to: to.clone(),
        quantity,
        memo,
    };
    Action::new(contract.clone(), TRANSFER, vec![pool.clone()], &params)
}

/// A `retire` of the pool's own shares.
pub(crate) fn retire(pool: &Name, quantity: Quantity, memo: String) -> Result<Action> {
    let params = RetireParams { quantity, memo };
    Action::new(pool.clone(), RETIRE, vec![pool.clone()], &params)
}

/// Memo forwarded with swap proceeds.
pub(crate) fn swap_memo(memo: &str, sender: &Name) -> String {
    format!("{memo} (from {sender} via oswaps)")
}

/// Memo on the refund of an exact-output swap.
pub(crate) fn refund_memo(net: &Quantity) -> String {
    format!("oswaps exchange refund overpayment, net is {net}")
}
