//! Recording intents and resolving them against transfer notifications.

use tracing::{debug, warn};

use super::{AssetDescriptor, Intent, Pool};
use crate::action::{Action, Transaction, TransferParams, TRANSFER};
use crate::domain::{parse_amount, AssetId, Name, Weight};
use crate::error::{PoolError, Result};
use crate::traits::Host;

/// The raw transaction captured when an intent action ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingIntent {
    /// Borsh bytes of the whole enclosing transaction.
    pub transaction: Vec<u8>,
}

impl Pool {
    /// Validates an intent and the shape of its transaction, then stores
    /// the transaction in the pending slot.
    ///
    /// The transaction must end with `action` followed by a `transfer` to
    /// the pool on the custodian of the intent's input asset, carrying that
    /// asset's symbol code.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AuthorizationDenied`] if the payer did not sign.
    /// - [`PoolError::UnknownAsset`], [`PoolError::InvalidAmountFormat`],
    ///   [`PoolError::SymbolMismatch`], [`PoolError::InvalidWeight`] for an
    ///   invalid intent.
    /// - [`PoolError::MalformedIntentTransaction`] for any other shape.
    pub(crate) fn record_intent<H: Host>(
        &mut self,
        host: &mut H,
        action: &Action,
        intent: &Intent,
    ) -> Result<()> {
        self.configuration()?;
        let input = self.validate_intent(&*host, intent)?;
        let bytes = host.transaction_bytes();
        let tx = Transaction::unpack(bytes)?;

        let last = tx
            .last()
            .ok_or(PoolError::MalformedIntentTransaction("empty transaction"))?;
        if !last.is(&input.custodian, TRANSFER) {
            return Err(PoolError::MalformedIntentTransaction(
                "final action is not a transfer on the asset custodian",
            ));
        }
        let transfer: TransferParams = last.decode()?;
        if transfer.to != self.account {
            return Err(PoolError::MalformedIntentTransaction(
                "final transfer is not addressed to the pool",
            ));
        }
        if transfer.quantity.code() != input.symbol.code() {
            return Err(PoolError::MalformedIntentTransaction(
                "final transfer carries another symbol",
            ));
        }
        if tx.next_to_last() != Some(action) {
            return Err(PoolError::MalformedIntentTransaction(
                "intent does not immediately precede the final transfer",
            ));
        }

        let pending = PendingIntent {
            transaction: bytes.to_vec(),
        };
        if let Some(stale) = self.pending.set(pending) {
            warn!(
                stale_bytes = stale.transaction.len(),
                "overwriting pending intent that was never resolved"
            );
        }
        debug!(asset_id = %input.asset_id, payer = %intent.payer(), "intent recorded");
        Ok(())
    }

    fn validate_intent<H: Host>(&self, host: &H, intent: &Intent) -> Result<AssetDescriptor> {
        host.require_auth(intent.payer())?;
        match intent {
            Intent::AddLiquidity(i) => {
                let asset = self.find_asset(i.asset_id)?;
                parse_amount(&asset.symbol, &i.amount)?;
                Weight::new(i.weight)?;
                Ok(asset.clone())
            }
            Intent::ExactInput(i) => {
                let (input, _) =
                    self.validate_swap(host, i.in_asset_id, i.out_asset_id, &i.recipient, &i.memo)?;
                parse_amount(&input.symbol, &i.in_amount)?;
                Ok(input.clone())
            }
            Intent::ExactOutput(i) => {
                let (input, output) =
                    self.validate_swap(host, i.in_asset_id, i.out_asset_id, &i.recipient, &i.memo)?;
                parse_amount(&output.symbol, &i.out_amount)?;
                Ok(input.clone())
            }
        }
    }

    fn validate_swap<H: Host>(
        &self,
        host: &H,
        in_asset_id: AssetId,
        out_asset_id: AssetId,
        recipient: &Name,
        memo: &str,
    ) -> Result<(&AssetDescriptor, &AssetDescriptor)> {
        let input = self.find_asset(in_asset_id)?;
        let output = self.find_asset(out_asset_id)?;
        if in_asset_id == out_asset_id {
            return Err(PoolError::MalformedIntentTransaction(
                "input and output asset are the same",
            ));
        }
        if !host.is_account(recipient) {
            return Err(PoolError::UnknownAccount(recipient.to_string()));
        }
        if memo.len() > self.settings.max_memo_len {
            return Err(PoolError::InvalidTransfer("memo too long"));
        }
        Ok((input, output))
    }

    /// Resolves the pending intent against an observed transfer.
    ///
    /// | Observation | Effect |
    /// |-------------|--------|
    /// | nothing pending | none (donation) |
    /// | pool is the sender | slot cleared |
    /// | pool is not the receiver | slot cleared |
    /// | otherwise | intent applied, slot cleared |
    pub(crate) fn resolve_intent<H: Host>(
        &mut self,
        host: &mut H,
        transfer: &TransferParams,
    ) -> Result<()> {
        let Some(pending) = self.pending.remove() else {
            debug!(quantity = %transfer.quantity, "no pending intent; transfer kept as donation");
            return Ok(());
        };
        if transfer.from == self.account || transfer.to != self.account {
            debug!("pending intent abandoned by outbound transfer");
            return Ok(());
        }

        let tx = Transaction::unpack(&pending.transaction)?;
        let action = tx.next_to_last().ok_or(PoolError::MalformedIntentTransaction(
            "pending transaction holds fewer than two actions",
        ))?;
        if action.account() != &self.account {
            return Err(PoolError::MalformedIntentTransaction(
                "pending intent is not addressed to the pool",
            ));
        }
        match Intent::decode(action)? {
            Intent::AddLiquidity(i) => self.resolve_add_liquidity(host, &i, transfer),
            Intent::ExactInput(i) => self.resolve_exact_input(host, &i, transfer),
            Intent::ExactOutput(i) => self.resolve_exact_output(host, &i, transfer),
        }
    }

    /// Cross-checks an inbound transfer against the asset and payer an
    /// intent names.
    pub(super) fn check_inbound<H: Host>(
        &self,
        host: &H,
        asset: &AssetDescriptor,
        payer: &Name,
        transfer: &TransferParams,
    ) -> Result<()> {
        if host.first_receiver() != &asset.custodian {
            return Err(PoolError::IntentTransferMismatch(
                "transfer executed by another custodian",
            ));
        }
        if transfer.quantity.symbol() != &asset.symbol {
            return Err(PoolError::IntentTransferMismatch(
                "transfer symbol or precision differs from intent asset",
            ));
        }
        if &transfer.from != payer {
            return Err(PoolError::IntentTransferMismatch("payer differs from intent"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::test_host::{bar, foo, name, symbol, TestHost};
    use super::super::{
        AddLiquidityIntent, ExactInputSwapIntent, ExactOutputSwapIntent, InitParams, PoolAction,
        RegisterParams,
    };
    use super::*;
    use crate::config::PoolSettings;
    use crate::domain::Quantity;

    /// FOO (id 0) and BAR (id 1), both active with weight 1, holding
    /// 1000.0000 FOO and 2000.0000 BAR.
    fn setup() -> (Pool, TestHost) {
        let mut host = TestHost::new();
        let Ok(mut pool) = Pool::new(name("oswaps"), PoolSettings::default()) else {
            panic!("pool");
        };
        let init = InitParams {
            manager: name("manager"),
            chain: "Telos".to_owned(),
        };
        let Ok(()) = pool.init(&host.signed_by(&["oswaps"]), init) else {
            panic!("init");
        };
        for (custodian, code) in [("token.foo", "FOO"), ("token.bar", "BAR")] {
            let params = RegisterParams {
                actor: name("manager"),
                chain: "Telos".to_owned(),
                custodian: name(custodian),
                symbol: symbol(code, 4),
                metadata: String::new(),
            };
            let Ok(id) = pool.register_asset(&host.signed_by(&["manager"]), params) else {
                panic!("register {code}");
            };
            let Ok(one) = Weight::new(1.0) else {
                panic!("weight");
            };
            pool.assets.modify(&id, |a| {
                a.weight = one;
                a.active = true;
            });
        }
        host.credit("token.foo", "oswaps", foo(10_000_000));
        host.credit("token.bar", "oswaps", bar(20_000_000));
        (pool, host)
    }

    fn intent_action(intent: Intent, signer: &str) -> Action {
        let Ok(a) = PoolAction::Intent(intent).to_action(&name("oswaps"), vec![name(signer)]) else {
            panic!("encodes");
        };
        a
    }

    fn transfer(
        contract: &str,
        from: &str,
        to: &str,
        quantity: Quantity,
    ) -> (Action, TransferParams) {
        let params = TransferParams {
            from: name(from),
            to: name(to),
            quantity,
            memo: String::new(),
        };
        let Ok(a) = Action::new(name(contract), TRANSFER, vec![name(from)], &params) else {
            panic!("encodes");
        };
        (a, params)
    }

    fn swap_in(amount: &str) -> Intent {
        Intent::ExactInput(ExactInputSwapIntent {
            sender: name("alice"),
            recipient: name("alice"),
            in_asset_id: AssetId::new(0),
            out_asset_id: AssetId::new(1),
            in_amount: amount.to_owned(),
            memo: "hi".to_owned(),
        })
    }

    fn swap_out(amount: &str) -> Intent {
        Intent::ExactOutput(ExactOutputSwapIntent {
            sender: name("alice"),
            recipient: name("bob"),
            in_asset_id: AssetId::new(0),
            out_asset_id: AssetId::new(1),
            out_amount: amount.to_owned(),
            memo: "hi".to_owned(),
        })
    }

    /// Records `intent` as the next-to-last action before `transfer`.
    fn record(
        pool: &mut Pool,
        host: &TestHost,
        intent: Intent,
        transfer: &Action,
    ) -> Result<Action> {
        let action = intent_action(intent, "alice");
        let tx = Transaction::new(vec![action.clone(), transfer.clone()]);
        let mut ctx = host.signed_by(&["alice"]).executing(&tx);
        pool.apply(&mut ctx, &action)?;
        Ok(action)
    }

    /// Delivers the notification of `params` executed by `contract`.
    fn notify(
        pool: &mut Pool,
        host: &TestHost,
        contract: &str,
        params: &TransferParams,
    ) -> Result<TestHost> {
        let mut ctx = host.notified_by(contract);
        if params.to == *pool.account() {
            ctx.credit(contract, "oswaps", params.quantity.clone());
        }
        pool.on_transfer_notify(&mut ctx, params)?;
        Ok(ctx)
    }

    fn relayed(host: &TestHost) -> Vec<(Name, TransferParams)> {
        host.inline
            .iter()
            .map(|a| {
                let Ok(p) = a.decode::<TransferParams>() else {
                    panic!("relayed transfer");
                };
                (a.account().clone(), p)
            })
            .collect()
    }

    // -- exact input ----------------------------------------------------------

    #[test]
    fn exact_input_swap_pays_out_balancer_output() {
        let (mut pool, host) = setup();
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let Ok(_) = record(&mut pool, &host, swap_in("100.0000 FOO"), &t) else {
            panic!("record");
        };
        assert!(pool.pending_intent().is_some());

        let Ok(ctx) = notify(&mut pool, &host, "token.foo", &params) else {
            panic!("resolve");
        };
        assert!(pool.pending_intent().is_none());
        let out = relayed(&ctx);
        assert_eq!(out.len(), 1);
        let Some((contract, payout)) = out.first() else {
            panic!("payout");
        };
        assert_eq!(contract, &name("token.bar"));
        assert_eq!(payout.to, name("alice"));
        assert_eq!(payout.quantity, bar(1_818_182));
        assert_eq!(payout.quantity.to_string(), "181.8182 BAR");
        assert_eq!(payout.memo, "hi (from alice via oswaps)");
    }

    #[test]
    fn exact_input_amount_mismatch_rejected() {
        let (mut pool, host) = setup();
        let (t, _) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let Ok(_) = record(&mut pool, &host, swap_in("100.0000 FOO"), &t) else {
            panic!("record");
        };
        let (_, short) = transfer("token.foo", "alice", "oswaps", foo(999_999));
        assert_eq!(
            notify(&mut pool, &host, "token.foo", &short).map(|_| ()),
            Err(PoolError::IntentTransferMismatch("amount differs from intent"))
        );
    }

    #[test]
    fn forged_custodian_rejected() {
        let (mut pool, host) = setup();
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let Ok(_) = record(&mut pool, &host, swap_in("100.0000 FOO"), &t) else {
            panic!("record");
        };
        assert_eq!(
            notify(&mut pool, &host, "token.bar", &params).map(|_| ()),
            Err(PoolError::IntentTransferMismatch(
                "transfer executed by another custodian"
            ))
        );
    }

    #[test]
    fn payer_mismatch_rejected() {
        let (mut pool, host) = setup();
        let (t, _) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let Ok(_) = record(&mut pool, &host, swap_in("100.0000 FOO"), &t) else {
            panic!("record");
        };
        let (_, from_bob) = transfer("token.foo", "bob", "oswaps", foo(1_000_000));
        assert_eq!(
            notify(&mut pool, &host, "token.foo", &from_bob).map(|_| ()),
            Err(PoolError::IntentTransferMismatch("payer differs from intent"))
        );
    }

    #[test]
    fn frozen_output_asset_rejected() {
        let (mut pool, host) = setup();
        pool.assets.modify(&AssetId::new(1), |a| a.active = false);
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let Ok(_) = record(&mut pool, &host, swap_in("100.0000 FOO"), &t) else {
            panic!("record");
        };
        assert_eq!(
            notify(&mut pool, &host, "token.foo", &params).map(|_| ()),
            Err(PoolError::AssetFrozen(AssetId::new(1)))
        );
    }

    // -- exact output ---------------------------------------------------------

    #[test]
    fn exact_output_refunds_surplus() {
        let (mut pool, host) = setup();
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(600_000));
        let Ok(_) = record(&mut pool, &host, swap_out("100.0000 BAR"), &t) else {
            panic!("record");
        };
        let Ok(ctx) = notify(&mut pool, &host, "token.foo", &params) else {
            panic!("resolve");
        };
        let out = relayed(&ctx);
        assert_eq!(out.len(), 2);
        let (Some((_, payout)), Some((refund_contract, refund))) = (out.first(), out.get(1)) else {
            panic!("two transfers");
        };
        assert_eq!(payout.to, name("bob"));
        assert_eq!(payout.quantity, bar(1_000_000));
        assert_eq!(refund_contract, &name("token.foo"));
        assert_eq!(refund.to, name("alice"));
        assert_eq!(refund.quantity, foo(73_684));
        assert_eq!(
            refund.memo,
            "oswaps exchange refund overpayment, net is 52.6316 FOO"
        );
    }

    #[test]
    fn exact_output_without_surplus_sends_no_refund() {
        let (mut pool, host) = setup();
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(526_316));
        let Ok(_) = record(&mut pool, &host, swap_out("100.0000 BAR"), &t) else {
            panic!("record");
        };
        let Ok(ctx) = notify(&mut pool, &host, "token.foo", &params) else {
            panic!("resolve");
        };
        assert_eq!(relayed(&ctx).len(), 1);
    }

    #[test]
    fn exact_output_underpayment_rejected() {
        let (mut pool, host) = setup();
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(500_000));
        let Ok(_) = record(&mut pool, &host, swap_out("100.0000 BAR"), &t) else {
            panic!("record");
        };
        assert_eq!(
            notify(&mut pool, &host, "token.foo", &params).map(|_| ()),
            Err(PoolError::InsufficientInput {
                required: 526_316,
                provided: 500_000
            })
        );
    }

    #[test]
    fn exact_output_with_free_input_rejected() {
        let (mut pool, mut host) = setup();
        host.credit("token.bar", "oswaps", bar(1_000_000_000_000 - 20_000_000));
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(1));
        let Ok(_) = record(&mut pool, &host, swap_out("0.0001 BAR"), &t) else {
            panic!("record");
        };
        assert_eq!(
            notify(&mut pool, &host, "token.foo", &params).map(|_| ()),
            Err(PoolError::InsufficientPoolLiquidity("swap input rounds to zero"))
        );
    }

    // -- add liquidity --------------------------------------------------------

    fn deposit(amount: &str, weight: f64) -> Intent {
        Intent::AddLiquidity(AddLiquidityIntent {
            account: name("alice"),
            asset_id: AssetId::new(0),
            amount: amount.to_owned(),
            weight,
        })
    }

    #[test]
    fn proportional_deposit_scales_weight_and_issues_shares() {
        let (mut pool, host) = setup();
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(5_000_000));
        let Ok(_) = record(&mut pool, &host, deposit("500.0000 FOO", 0.0), &t) else {
            panic!("record");
        };
        let Ok(ctx) = notify(&mut pool, &host, "token.foo", &params) else {
            panic!("resolve");
        };
        assert_eq!(pool.asset(AssetId::new(0)).map(|a| a.weight.get()), Some(1.5));
        assert_eq!(pool.asset(AssetId::new(0)).map(|a| a.active), Some(true));
        let out = relayed(&ctx);
        let Some((contract, receipt)) = out.first() else {
            panic!("share receipt");
        };
        assert_eq!(contract, &name("oswaps"));
        assert_eq!(receipt.from, name("oswaps"));
        assert_eq!(receipt.to, name("alice"));
        assert_eq!(receipt.quantity.to_string(), "500.0000 LIQA");
        assert_eq!(pool.share_balance(&name("oswaps"), AssetId::new(0)), 5_000_000);
    }

    #[test]
    fn proportional_deposit_into_frozen_asset_rejected() {
        let (mut pool, host) = setup();
        pool.assets.modify(&AssetId::new(0), |a| a.active = false);
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(5_000_000));
        let Ok(_) = record(&mut pool, &host, deposit("500.0000 FOO", 0.0), &t) else {
            panic!("record");
        };
        assert_eq!(
            notify(&mut pool, &host, "token.foo", &params).map(|_| ()),
            Err(PoolError::AssetFrozen(AssetId::new(0)))
        );
    }

    #[test]
    fn weighted_deposit_sets_weight_and_freezes() {
        let (mut pool, host) = setup();
        let (t, params) = transfer("token.foo", "alice", "oswaps", foo(5_000_000));
        let Ok(_) = record(&mut pool, &host, deposit("500.0000 FOO", 4.0), &t) else {
            panic!("record");
        };
        let Ok(_) = notify(&mut pool, &host, "token.foo", &params) else {
            panic!("resolve");
        };
        let Some(asset) = pool.asset(AssetId::new(0)) else {
            panic!("asset");
        };
        assert_eq!(asset.weight.get(), 4.0);
        assert!(!asset.active);
    }

    // -- protocol edges -------------------------------------------------------

    #[test]
    fn transfer_without_intent_is_a_donation() {
        let (mut pool, host) = setup();
        let before = pool.clone();
        let (_, params) = transfer("token.foo", "alice", "oswaps", foo(10));
        let Ok(ctx) = notify(&mut pool, &host, "token.foo", &params) else {
            panic!("donation accepted");
        };
        assert!(ctx.inline.is_empty());
        assert_eq!(pool, before);
    }

    #[test]
    fn outbound_transfer_abandons_intent() {
        let (mut pool, host) = setup();
        let (t, _) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let Ok(_) = record(&mut pool, &host, swap_in("100.0000 FOO"), &t) else {
            panic!("record");
        };
        let (_, outbound) = transfer("token.bar", "oswaps", "bob", bar(1));
        let Ok(ctx) = notify(&mut pool, &host, "token.bar", &outbound) else {
            panic!("abandon");
        };
        assert!(ctx.inline.is_empty());
        assert!(pool.pending_intent().is_none());
    }

    #[test]
    fn second_intent_overwrites_stale_one() {
        let (mut pool, host) = setup();
        let (t, _) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let Ok(_) = record(&mut pool, &host, swap_in("100.0000 FOO"), &t) else {
            panic!("first record");
        };
        let (t2, _) = transfer("token.foo", "alice", "oswaps", foo(2_000_000));
        let Ok(second) = record(&mut pool, &host, swap_in("200.0000 FOO"), &t2) else {
            panic!("second record");
        };
        let Ok(expected) = Transaction::new(vec![second, t2]).pack() else {
            panic!("packs");
        };
        assert_eq!(pool.pending_intent().map(|p| p.transaction.clone()), Some(expected));
    }

    #[test]
    fn malformed_transaction_shapes_rejected() {
        let (mut pool, host) = setup();
        let action = intent_action(swap_in("100.0000 FOO"), "alice");
        let (good, _) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));
        let (wrong_contract, _) = transfer("token.bar", "alice", "oswaps", bar(1_000_000));
        let (wrong_recipient, _) = transfer("token.foo", "alice", "bob", foo(1_000_000));
        let other = intent_action(swap_in("1.0000 FOO"), "alice");

        let shapes = [
            vec![action.clone()],
            vec![good.clone(), action.clone()],
            vec![action.clone(), other, good.clone()],
            vec![action.clone(), wrong_contract],
            vec![action.clone(), wrong_recipient],
        ];
        for actions in shapes {
            let tx = Transaction::new(actions);
            let mut ctx = host.signed_by(&["alice"]).executing(&tx);
            assert!(
                matches!(
                    pool.apply(&mut ctx, &action),
                    Err(PoolError::MalformedIntentTransaction(_))
                ),
                "{tx:?}"
            );
        }
        assert!(pool.pending_intent().is_none());
    }

    #[test]
    fn intent_validation_errors() {
        let (mut pool, host) = setup();
        let (t, _) = transfer("token.foo", "alice", "oswaps", foo(1_000_000));

        assert!(matches!(
            record(&mut pool, &host, swap_in("100.0000 BAR"), &t),
            Err(PoolError::SymbolMismatch(_))
        ));
        assert!(matches!(
            record(&mut pool, &host, swap_in("lots"), &t),
            Err(PoolError::InvalidAmountFormat(_))
        ));
        let same = Intent::ExactInput(ExactInputSwapIntent {
            out_asset_id: AssetId::new(0),
            ..match swap_in("100.0000 FOO") {
                Intent::ExactInput(i) => i,
                _ => panic!("exact input"),
            }
        });
        assert!(matches!(
            record(&mut pool, &host, same, &t),
            Err(PoolError::MalformedIntentTransaction(_))
        ));
        assert_eq!(
            record(&mut pool, &host, deposit("1.0000 FOO", -1.0), &t).map(|_| ()),
            Err(PoolError::InvalidWeight("weight must not be negative"))
        );
        let unsigned = intent_action(swap_in("100.0000 FOO"), "alice");
        let tx = Transaction::new(vec![unsigned.clone(), t]);
        let mut ctx = host.signed_by(&["bob"]).executing(&tx);
        assert_eq!(
            pool.apply(&mut ctx, &unsigned),
            Err(PoolError::AuthorizationDenied("alice".to_owned()))
        );
    }
}
