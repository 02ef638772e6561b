//! Fee-adjusted constant-product pricing.
//!
//! ```text
//! input_after_fee = input × 99
//! output          = floor(input_after_fee × reserve_out
//!                         / (reserve_in × 100 + input_after_fee))
//! ```
//!
//! The 1% fee is never paid out; it stays in the input reserve and raises
//! `reserve_in × reserve_out` for every share holder.  Because the
//! denominator always exceeds `input_after_fee` when `reserve_in > 0`, the
//! output is strictly below `reserve_out`.

use tracing::debug;

use super::wide::{mul_div, narrow, U256};
use crate::domain::Amount;
use crate::error::{AmmError, Result};

/// Fee multiplier numerator: the share of the input that is priced.
pub const FEE_NUMERATOR: u128 = 99;

/// Fee multiplier denominator.
pub const FEE_DENOMINATOR: u128 = 100;

/// Fixed-point scale of [`get_price`].
pub const PRICE_SCALE: u128 = 1_000;

/// Returns `floor(input_reserve × 1000 / output_reserve)`: units of input
/// per unit of output, scaled by [`PRICE_SCALE`].
///
/// # Errors
///
/// - [`AmmError::EmptyReserve`] if `output_reserve` is zero.
/// - [`AmmError::Overflow`] if the scaled ratio exceeds `u128`.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Amount;
/// use exchange_amm::math::get_price;
///
/// assert_eq!(get_price(Amount::new(1_000), Amount::new(2_000)), Ok(500));
/// assert_eq!(get_price(Amount::new(2_000), Amount::new(1_000)), Ok(2_000));
/// ```
pub fn get_price(input_reserve: Amount, output_reserve: Amount) -> Result<u128> {
    if output_reserve.is_zero() {
        return Err(AmmError::EmptyReserve);
    }
    mul_div(input_reserve.get(), PRICE_SCALE, output_reserve.get())
}

/// Returns the output for selling `input_amount` against the given
/// reserves, after the 1% fee.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `input_amount` is zero (checked first).
/// - [`AmmError::EmptyReserve`] if either reserve is zero.
/// - [`AmmError::Overflow`] for inputs beyond 256-bit intermediates.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Amount;
/// use exchange_amm::math::get_output_amount;
///
/// let out = get_output_amount(Amount::new(100), Amount::new(1_000), Amount::new(2_000));
/// assert_eq!(out, Ok(Amount::new(180)));
/// ```
pub fn get_output_amount(
    input_amount: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
) -> Result<Amount> {
    if input_amount.is_zero() {
        return Err(AmmError::ZeroAmount);
    }
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(AmmError::EmptyReserve);
    }

    let input_after_fee = U256::from(input_amount.get()) * U256::from(FEE_NUMERATOR);
    let numerator = input_after_fee
        .checked_mul(U256::from(output_reserve.get()))
        .ok_or(AmmError::Overflow("output numerator overflow"))?;
    let denominator = (U256::from(input_reserve.get()) * U256::from(FEE_DENOMINATOR))
        .checked_add(input_after_fee)
        .ok_or(AmmError::Overflow("output denominator overflow"))?;

    let output = narrow(numerator / denominator, "output exceeds u128")?;
    debug!(
        input = %input_amount,
        input_reserve = %input_reserve,
        output_reserve = %output_reserve,
        output,
        "computed swap output"
    );
    Ok(Amount::new(output))
}

/// Returns the part of `input_amount` retained as fee, rounded up:
/// `input − floor(input × 99 / 100)`.
///
/// # Errors
///
/// Never fails for valid `u128` inputs; the `Result` carries the
/// intermediate's overflow check.
pub fn retained_fee(input_amount: Amount) -> Result<Amount> {
    let priced = mul_div(input_amount.get(), FEE_NUMERATOR, FEE_DENOMINATOR)?;
    input_amount
        .checked_sub(&Amount::new(priced))
        .ok_or(AmmError::Overflow("fee underflow"))
}
