//! Liquidity share issuance and redemption, extending [`SwapPool`].
//!
//! # Share Accounting Invariant
//!
//! The share supply changes **only** through
//! [`LiquidityPool::provide_liquidity`] and
//! [`LiquidityPool::remove_liquidity`].  Swaps grow the reserves behind
//! each share but never the share count.
//!
//! ```text
//! total_shares = Σ share_balance[holder]
//! ```
//!
//! # Rounding
//!
//! Every division floors.  A depositor never receives more shares than
//! their contribution warrants and a withdrawer never receives more than
//! their exact proportional payout; sub-unit residue stays in the pool.

use super::SwapPool;
use crate::domain::{Address, Amount, Deposit, Shares, Withdrawal};
use crate::error::AmmError;

/// Trait for pools that issue and redeem proportional liquidity shares.
pub trait LiquidityPool: SwapPool {
    /// Deposits `amount_native` of attached value and up to `amount_token`
    /// tokens from `caller`.
    ///
    /// An empty pool accepts any positive pair as its seed ratio and mints
    /// `amount_native` shares.  A seeded pool pulls exactly
    /// `floor(amount_native × reserve_token / reserve_native)` tokens and
    /// mints `floor(total_shares × amount_native / reserve_native)` shares.
    ///
    /// A deposit small enough that the share formula floors to zero is
    /// rejected rather than accepted for nothing.  This is a protective
    /// addition to the plain constant-product rules, which would take the
    /// value and mint zero shares.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if either amount is zero.
    /// - [`AmmError::InsufficientTokenAmount`] if `amount_token` is below the
    ///   ratio-implied amount.
    /// - [`AmmError::InsufficientSharesMinted`] if the deposit would mint
    ///   zero shares; nothing is taken.
    /// - [`AmmError::TransferFailed`] if a ledger refuses a leg.
    fn provide_liquidity(
        &mut self,
        caller: &Address,
        amount_native: Amount,
        amount_token: Amount,
    ) -> Result<Deposit, AmmError>;

    /// Burns `shares` held by `caller` and pays out the proportional slice
    /// of both reserves.
    ///
    /// Once any leg has been paid the withdrawal stands: a leg the ledger
    /// then refuses is reported in the returned [`Withdrawal`] and kept for
    /// `caller` to claim later, never restored to the reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `shares` is zero.
    /// - [`AmmError::InsufficientShares`] if `caller` holds fewer shares.
    /// - [`AmmError::TransferFailed`] if the first payout is refused; nothing
    ///   changes.
    fn remove_liquidity(&mut self, caller: &Address, shares: Shares)
        -> Result<Withdrawal, AmmError>;

    /// Outstanding share supply.
    #[must_use]
    fn total_shares(&self) -> Shares;

    /// Shares held by `holder`.
    #[must_use]
    fn share_balance(&self, holder: &Address) -> Shares;
}
