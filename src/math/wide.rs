//! 256-bit intermediates for `u128 × u128 / u128`.

use crate::error::{AmmError, Result};

#[allow(clippy::all, missing_docs)]
mod inner {
    uint::construct_uint! {
        /// Unsigned 256-bit integer used for intermediate products.
        pub struct U256(4);
    }
}

pub use inner::U256;

/// Narrows a 256-bit value back to `u128`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if the value needs more
/// than 128 bits.
pub(crate) fn narrow(value: U256, context: &'static str) -> Result<u128> {
    if value.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Computes `floor(a × b / d)` without intermediate overflow.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `d` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use exchange_amm::math::mul_div;
///
/// let a = 1_000u128 * 10u128.pow(18);
/// let b = 2_000u128 * 10u128.pow(18);
/// assert_eq!(mul_div(a, b, a), Ok(b));
/// ```
pub fn mul_div(a: u128, b: u128, d: u128) -> Result<u128> {
    if d == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    narrow(product / U256::from(d), "mul_div quotient exceeds u128")
}
