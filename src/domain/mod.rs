//! Value types shared by every component of the exchange.
//!
//! All quantities are raw integer units wrapped in newtypes so that token
//! amounts and liquidity shares cannot be mixed up silently.

mod address;
mod amount;
mod liquidity_change;
mod shares;
mod swap;

pub use address::Address;
pub use amount::Amount;
pub use liquidity_change::{Deposit, Withdrawal};
pub use shares::Shares;
pub use swap::{SwapDirection, SwapReceipt, SwapRequest};
