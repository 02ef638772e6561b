//! Core trait abstractions for the exchange pool.
//!
//! [`SwapPool`] covers quoting and executing trades; [`LiquidityPool`]
//! extends it with share issuance and redemption.  Share reads and
//! transfers live on [`ShareToken`](crate::ledger::ShareToken).

mod liquidity_pool;
mod swap_pool;

pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
