//! # Exchange AMM
//!
//! A two-asset constant-product exchange between a chain's native asset and
//! one ledger-tracked token.
//!
//! The crate provides domain types, the pricing engine, the reserve and
//! share ledgers, a collaborator adapter for the external ledgers that
//! hold the traded assets, and the [`Exchange`](pools::Exchange) pool that
//! ties them together.
//!
//! # Pricing
//!
//! Swaps follow `x × y = k` with a 1% fee kept in the pool:
//!
//! ```text
//! output = floor(in × 99 × out_reserve / (in_reserve × 100 + in × 99))
//! ```
//!
//! All intermediates are computed in 256 bits, so 18-decimal amounts never
//! overflow.
//!
//! # Quick Start
//!
//! ```rust
//! use exchange_amm::prelude::*;
//!
//! let pool_account = Address::from_bytes([9u8; 32]);
//! let token_address = Address::from_bytes([7u8; 32]);
//! let alice = Address::from_bytes([1u8; 32]);
//!
//! // 1. Fund a trader on both in-memory ledgers
//! let mut token = MemoryToken::new();
//! token.mint(&alice, Amount::new(5_000));
//! token.approve(&alice, &pool_account, Amount::new(5_000));
//! let mut native = MemoryNative::new();
//! native.credit(&alice, Amount::new(5_000));
//!
//! // 2. Create the pool
//! let config = ExchangeConfig::with_defaults(pool_account, token_address)
//!     .expect("valid config");
//! let mut pool = Exchange::new(config, token, native).expect("pool created");
//!
//! // 3. Seed it; the first deposit sets the ratio and mints native-amount shares
//! let deposit = pool
//!     .provide_liquidity(&alice, Amount::new(1_000), Amount::new(2_000))
//!     .expect("seeded");
//! assert_eq!(deposit.shares_minted, Shares::new(1_000));
//!
//! // 4. Sell 100 native for tokens
//! let request = SwapRequest::new(SwapDirection::NativeToToken, Amount::new(100), Amount::ZERO)
//!     .expect("non-zero");
//! let receipt = pool.swap_in_for_out(&alice, request).expect("swap succeeded");
//! assert_eq!(receipt.amount_out(), Amount::new(180));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  provide / remove / swap
//! └──────┬──────┘
//!        │ SwapPool + LiquidityPool + ShareToken
//!        ▼
//! ┌─────────────┐
//! │  Exchange    │  validates, computes, commits
//! └──────┬──────┘
//!        │ Reserves, ShareLedger, math
//!        ▼
//! ┌─────────────┐
//! │  Settlement  │  journaled transfers, refunds on failure
//! └──────┬──────┘
//!        │ TokenLedger + NativeLedger
//!        ▼
//! ┌─────────────┐
//! │   Ledgers    │  external token contract, native environment
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Address`](domain::Address), swap request and receipt |
//! | [`math`]   | Pricing formulas, checked arithmetic, 256-bit intermediates |
//! | [`ledger`] | [`Reserves`](ledger::Reserves), the [`ShareLedger`](ledger::ShareLedger) and [`OwedBalances`](ledger::OwedBalances) |
//! | [`adapter`] | Ledger traits, [`Settlement`](adapter::Settlement), in-memory ledgers |
//! | [`traits`] | [`SwapPool`](traits::SwapPool) and [`LiquidityPool`](traits::LiquidityPool) |
//! | [`config`] | [`ExchangeConfig`](config::ExchangeConfig) |
//! | [`pools`]  | The [`Exchange`](pools::Exchange) aggregate |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
