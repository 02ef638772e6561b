//! Quoting and executing trades against a two-asset pool.
//!
//! # Fee Retention Invariant
//!
//! Every implementation prices only 99% of the input and credits the full
//! input to the input reserve, so for any accepted trade with a non-zero
//! input:
//!
//! ```text
//! reserve_native_after × reserve_token_after  >  reserve_native_before × reserve_token_before
//! ```
//!
//! # Pre-trade Pricing
//!
//! [`SwapPool::swap_in_for_out`] prices against the reserves as of the
//! previous committed operation, never against a partially updated state.

use crate::domain::{Address, Amount, SwapDirection, SwapReceipt, SwapRequest};
use crate::error::AmmError;

/// Trait for pools that quote and execute exact-input swaps.
///
/// # Errors
///
/// Common variants: [`AmmError::ZeroAmount`], [`AmmError::EmptyReserve`],
/// [`AmmError::SlippageExceeded`], [`AmmError::TransferFailed`].
pub trait SwapPool {
    /// Returns `floor(input_reserve × 1000 / output_reserve)`.
    ///
    /// A pure query: the reserves are supplied by the caller.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmptyReserve`] if `output_reserve` is zero.
    fn get_price(&self, input_reserve: Amount, output_reserve: Amount) -> Result<u128, AmmError>;

    /// Returns the fee-adjusted output for `input_amount` against the given
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `input_amount` is zero.
    /// - [`AmmError::EmptyReserve`] if either reserve is zero.
    fn get_output_amount(
        &self,
        input_amount: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount, AmmError>;

    /// Returns the current price of `direction`'s output in units of its
    /// input, scaled by 1000.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmptyReserve`] if the pool is empty.
    fn spot_price(&self, direction: SwapDirection) -> Result<u128, AmmError>;

    /// Sells `request.amount_in()` of the input asset on behalf of
    /// `caller`, paying the output to `caller`.
    ///
    /// The output is computed against pre-trade reserves.  On any error the
    /// pool and both ledgers are left exactly as before.
    ///
    /// # Errors
    ///
    /// - [`AmmError::EmptyReserve`] if the pool is not seeded.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `request.min_amount_out()`.
    /// - [`AmmError::TransferFailed`] if a ledger refuses a leg.
    fn swap_in_for_out(
        &mut self,
        caller: &Address,
        request: SwapRequest,
    ) -> Result<SwapReceipt, AmmError>;
}
