//! # oswaps
//!
//! A multi-asset weighted liquidity pool (Balancer style) for ledgers
//! whose token transfers cannot call into the pool directly.
//!
//! The pool runs as an account on a ledger that offers atomic
//! multi-action transactions, per-account token balances, and
//! post-transfer notifications.  Because a transfer only *notifies* the
//! pool after the fact, callers declare what the transfer is for in an
//! intent action placed immediately before it:
//!
//! ```text
//! [ oswaps::swapexactin(...), token.foo::transfer(alice -> oswaps, 100.0000 FOO) ]
//! ```
//!
//! The intent action validates that shape against the raw transaction and
//! stores it; the transfer notification re-reads it, cross-checks it
//! against the observed transfer, and applies the swap or deposit.
//!
//! ## Quick start
//!
//! ```rust
//! use oswaps::action::{Action, CreateParams, IssueParams, TransferParams};
//! use oswaps::chain::Chain;
//! use oswaps::config::PoolSettings;
//! use oswaps::domain::{AssetId, Name, Quantity, Symbol, SymbolCode};
//! use oswaps::pool::{AddLiquidityIntent, InitParams, Intent, PoolAction, RegisterParams};
//!
//! let name = |s: &str| Name::new(s).expect("valid name");
//! let foo = Symbol::new(SymbolCode::new("FOO").expect("code"), 4).expect("symbol");
//! let pool = name("oswaps");
//!
//! let mut chain = Chain::new(pool.clone(), PoolSettings::default()).expect("settings");
//! chain.create_account(name("manager"));
//! chain.create_account(name("alice"));
//! chain.deploy_token(name("token.foo")).expect("deploy");
//!
//! // Mint 5000.0000 FOO to alice.
//! let create = CreateParams {
//!     issuer: name("alice"),
//!     max_supply: Quantity::new(1_000_000_000, foo.clone()),
//! };
//! let issue = IssueParams {
//!     to: name("alice"),
//!     quantity: Quantity::new(50_000_000, foo.clone()),
//!     memo: String::new(),
//! };
//! chain
//!     .push_actions(
//!         vec![
//!             Action::new(name("token.foo"), "create", vec![name("token.foo")], &create)
//!                 .expect("create"),
//!             Action::new(name("token.foo"), "issue", vec![name("alice")], &issue)
//!                 .expect("issue"),
//!         ],
//!         &[name("token.foo"), name("alice")],
//!     )
//!     .expect("mint");
//!
//! // Configure the pool and register FOO as asset 0.
//! let init = PoolAction::Init(InitParams {
//!     manager: name("manager"),
//!     chain: "Telos".to_owned(),
//! });
//! let register = PoolAction::RegisterAsset(RegisterParams {
//!     actor: name("manager"),
//!     chain: "Telos".to_owned(),
//!     custodian: name("token.foo"),
//!     symbol: foo.clone(),
//!     metadata: String::new(),
//! });
//! chain
//!     .push_actions(
//!         vec![
//!             init.to_action(&pool, vec![pool.clone()]).expect("init"),
//!             register.to_action(&pool, vec![name("manager")]).expect("register"),
//!         ],
//!         &[pool.clone(), name("manager")],
//!     )
//!     .expect("configure");
//!
//! // Deposit 1000.0000 FOO at weight 1: the intent, then the transfer.
//! let intent = PoolAction::Intent(Intent::AddLiquidity(AddLiquidityIntent {
//!     account: name("alice"),
//!     asset_id: AssetId::new(0),
//!     amount: "1000.0000 FOO".to_owned(),
//!     weight: 1.0,
//! }));
//! let transfer = TransferParams {
//!     from: name("alice"),
//!     to: pool.clone(),
//!     quantity: Quantity::new(10_000_000, foo),
//!     memo: String::new(),
//! };
//! chain
//!     .push_actions(
//!         vec![
//!             intent.to_action(&pool, vec![name("alice")]).expect("intent"),
//!             Action::new(name("token.foo"), "transfer", vec![name("alice")], &transfer)
//!                 .expect("transfer"),
//!         ],
//!         &[name("alice")],
//!     )
//!     .expect("deposit");
//!
//! // 1000.0000 LIQA shares were issued to alice.
//! assert_eq!(chain.pool().share_balance(&name("alice"), AssetId::new(0)), 10_000_000);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │    chain     │  accounts, token contracts, atomic transactions
//! └──────┬───────┘
//!        │ Host + BalanceLedger traits
//!        ▼
//! ┌──────────────┐
//! │     pool     │  registry, intent protocol, swaps, shares, relay
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ math / token │  balancer formulas, supply and balance bookkeeping
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    domain    │  Name, Symbol, Quantity, AssetId, Weight, …
//! └──────────────┘
//! ```
//!
//! ## Module guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Validated value types |
//! | [`action`] | Actions, transactions, and standard token payloads (borsh) |
//! | [`store`] | Keyed tables and singleton records |
//! | [`config`] | [`PoolSettings`](config::PoolSettings) and the on-ledger [`PoolConfiguration`](config::PoolConfiguration) |
//! | [`math`] | Weighted-invariant swap and weight formulas |
//! | [`token`] | Token ledgers and the standard token contract |
//! | [`traits`] | [`Host`](traits::Host) and [`BalanceLedger`](traits::BalanceLedger) |
//! | [`pool`] | The pool contract |
//! | [`chain`] | In-process ledger host |
//! | [`error`] | [`PoolError`](error::PoolError) |
//! | [`prelude`] | Common re-exports |

pub mod action;
pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod store;
pub mod token;
pub mod traits;
