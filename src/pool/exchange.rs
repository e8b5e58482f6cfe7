//! Swap resolution.

use tracing::info;

use super::{relay, AssetDescriptor, ExactInputSwapIntent, ExactOutputSwapIntent, Pool};
use crate::action::TransferParams;
use crate::domain::{parse_amount, AssetId, Quantity};
use crate::error::{PoolError, Result};
use crate::math::{exact_in_output, exact_out_input};
use crate::traits::Host;

impl Pool {
    /// Pays out the output of an exact-input swap whose input transfer has
    /// just been observed.
    pub(super) fn resolve_exact_input<H: Host>(
        &mut self,
        host: &mut H,
        intent: &ExactInputSwapIntent,
        transfer: &TransferParams,
    ) -> Result<()> {
        let (input, output) = self.swap_assets(intent.in_asset_id, intent.out_asset_id)?;
        self.check_inbound(&*host, input, &intent.sender, transfer)?;
        if parse_amount(&input.symbol, &intent.in_amount)? != transfer.quantity.amount() {
            return Err(PoolError::IntentTransferMismatch("amount differs from intent"));
        }

        let in_after = self.reserve(&*host, input);
        let in_before = in_after.checked_sub(&transfer.quantity)?;
        let out_before = self.reserve(&*host, output);
        let amount = exact_in_output(
            in_before.amount(),
            in_after.amount(),
            input.weight,
            out_before.amount(),
            output.weight,
        )?;
        if amount <= 0 {
            return Err(PoolError::InsufficientPoolLiquidity("swap output rounds to zero"));
        }

        let proceeds = Quantity::new(amount, output.symbol.clone());
        info!(
            sender = %intent.sender,
            recipient = %intent.recipient,
            paid = %transfer.quantity,
            received = %proceeds,
            "exact input swap"
        );
        let payout = relay::transfer(
            &output.custodian,
            &self.account,
            &self.account,
            &intent.recipient,
            proceeds,
            relay::swap_memo(&intent.memo, &intent.sender),
        )?;
        host.send_inline(payout);
        Ok(())
    }

    /// Pays out the fixed output of an exact-output swap and refunds any
    /// input beyond what the swap requires.
    pub(super) fn resolve_exact_output<H: Host>(
        &mut self,
        host: &mut H,
        intent: &ExactOutputSwapIntent,
        transfer: &TransferParams,
    ) -> Result<()> {
        let (input, output) = self.swap_assets(intent.in_asset_id, intent.out_asset_id)?;
        self.check_inbound(&*host, input, &intent.sender, transfer)?;
        let amount = parse_amount(&output.symbol, &intent.out_amount)?;

        let in_after = self.reserve(&*host, input);
        let in_before = in_after.checked_sub(&transfer.quantity)?;
        let out_before = self.reserve(&*host, output);
        let required = exact_out_input(
            in_before.amount(),
            input.weight,
            out_before.amount(),
            amount,
            output.weight,
        )?;
        if required <= 0 {
            return Err(PoolError::InsufficientPoolLiquidity("swap input rounds to zero"));
        }
        let provided = transfer.quantity.amount();
        let surplus = provided
            .checked_sub(required)
            .ok_or(PoolError::Overflow("swap surplus"))?;
        if surplus < 0 {
            return Err(PoolError::InsufficientInput { required, provided });
        }

        let proceeds = Quantity::new(amount, output.symbol.clone());
        let net = Quantity::new(required, input.symbol.clone());
        info!(
            sender = %intent.sender,
            recipient = %intent.recipient,
            paid = %net,
            received = %proceeds,
            "exact output swap"
        );
        let mut relayed = vec![relay::transfer(
            &output.custodian,
            &self.account,
            &self.account,
            &intent.recipient,
            proceeds,
            relay::swap_memo(&intent.memo, &intent.sender),
        )?];
        if surplus > 0 {
            relayed.push(relay::transfer(
                &input.custodian,
                &self.account,
                &self.account,
                &intent.sender,
                Quantity::new(surplus, input.symbol.clone()),
                relay::refund_memo(&net),
            )?);
        }
        for action in relayed {
            host.send_inline(action);
        }
        Ok(())
    }

    fn swap_assets(
        &self,
        in_asset_id: AssetId,
        out_asset_id: AssetId,
    ) -> Result<(&AssetDescriptor, &AssetDescriptor)> {
        let input = self.find_asset(in_asset_id)?;
        if !input.active {
            return Err(PoolError::AssetFrozen(in_asset_id));
        }
        let output = self.find_asset(out_asset_id)?;
        if !output.active {
            return Err(PoolError::AssetFrozen(out_asset_id));
        }
        Ok((input, output))
    }
}
