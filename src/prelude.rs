//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use exchange_amm::prelude::*;
//! ```

pub use crate::adapter::{MemoryNative, MemoryToken, NativeLedger, TokenLedger, TransferError};
pub use crate::config::ExchangeConfig;
pub use crate::domain::{
    Address, Amount, Deposit, Shares, SwapDirection, SwapReceipt, SwapRequest, Withdrawal,
};
pub use crate::error::{AmmError, Result};
pub use crate::ledger::{Owed, Reserves, ShareToken};
pub use crate::math::CheckedArithmetic;
pub use crate::pools::Exchange;
pub use crate::traits::{LiquidityPool, SwapPool};
