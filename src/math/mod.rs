//! Integer arithmetic for pricing, share issuance and payouts.
//!
//! No floating point is used anywhere.  Products of two `u128` values go
//! through a 256-bit intermediate ([`mul_div`]) so that 18-decimal amounts
//! can be multiplied without overflow, and every division floors.

mod checked;
mod pricing;
mod wide;

pub use checked::CheckedArithmetic;
pub use pricing::{
    get_output_amount, get_price, retained_fee, FEE_DENOMINATOR, FEE_NUMERATOR, PRICE_SCALE,
};
pub use wide::{mul_div, U256};
