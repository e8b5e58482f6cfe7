//! Property-based tests for the share sub-ledger.
//!
//! 1. **Peer rejection**: a share transfer between two non-pool accounts
//!    fails for every amount, zero included, whoever signs.
//! 2. **Conservation**: transfers between owners and the pool never change
//!    the total supply and never leave a negative balance.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::test_host::{name, symbol, TestHost};
use super::{InitParams, Pool, RegisterParams};
use crate::action::TransferParams;
use crate::config::PoolSettings;
use crate::domain::{AssetId, Quantity, MAX_AMOUNT};
use crate::error::PoolError;

fn pool_with_shares(host: &TestHost, alice: i64) -> Pool {
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
    let params = RegisterParams {
        actor: name("manager"),
        chain: "Telos".to_owned(),
        custodian: name("token.foo"),
        symbol: symbol("FOO", 4),
        metadata: String::new(),
    };
    let Ok(_) = pool.register_asset(&host.signed_by(&["manager"]), params) else {
        panic!("register");
    };
    if alice > 0 {
        let shares = Quantity::new(alice, symbol("LIQA", 4));
        let Ok(()) = pool.shares.mint(&shares) else {
            panic!("mint");
        };
        let Ok(()) = pool.shares.move_balance(&name("oswaps"), &name("alice"), &shares) else {
            panic!("move");
        };
    }
    pool
}

fn signer() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["alice", "bob", "oswaps", "manager"])
}

proptest! {
    #[test]
    fn peer_transfers_always_rejected(
        amount in 0i64..=MAX_AMOUNT,
        held in 0i64..1_000_000_000,
        who in signer(),
        reversed in any::<bool>(),
    ) {
        let host = TestHost::new();
        let mut pool = pool_with_shares(&host, held);
        let (from, to) = if reversed { ("bob", "alice") } else { ("alice", "bob") };
        let params = TransferParams {
            from: name(from),
            to: name(to),
            quantity: Quantity::new(amount, symbol("LIQA", 4)),
            memo: String::new(),
        };
        let before = pool.clone();
        let mut ctx = host.signed_by(&[who]);
        prop_assert_eq!(
            pool.transfer_shares(&mut ctx, &params),
            Err(PoolError::PeerTransferForbidden)
        );
        prop_assert_eq!(pool, before);
    }

    #[test]
    fn owner_pool_transfers_conserve_supply(
        held in 1i64..1_000_000,
        moves in prop::collection::vec((any::<bool>(), 0i64..2_000_000), 1..20),
    ) {
        let host = TestHost::new();
        let mut pool = pool_with_shares(&host, held);
        let code = symbol("LIQA", 4).code().clone();
        for (to_pool, amount) in moves {
            let (from, to) = if to_pool { ("alice", "oswaps") } else { ("oswaps", "alice") };
            let params = TransferParams {
                from: name(from),
                to: name(to),
                quantity: Quantity::new(amount, symbol("LIQA", 4)),
                memo: String::new(),
            };
            let mut ctx = host.signed_by(&["oswaps"]);
            let _ = pool.transfer_shares(&mut ctx, &params);
            let alice = pool.share_balance(&name("alice"), AssetId::new(0));
            let own = pool.share_balance(&name("oswaps"), AssetId::new(0));
            prop_assert!(alice >= 0 && own >= 0);
            prop_assert_eq!(alice + own, held);
            prop_assert_eq!(pool.shares().stats(&code).map(|s| s.supply.amount()), Some(held));
        }
    }
}
