//! The exchange pool aggregate.
//!
//! [`Exchange`] composes the reserve and share ledgers with the two
//! collaborator ledgers and implements [`SwapPool`](crate::traits::SwapPool),
//! [`LiquidityPool`](crate::traits::LiquidityPool) and
//! [`ShareToken`](crate::ledger::ShareToken).

pub mod exchange;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use exchange::Exchange;
