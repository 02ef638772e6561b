//! Reserve & share ledger: the pool's holdings and its liquidity shares.
//!
//! [`Reserves`] tracks the two asset balances the pool accounts for and
//! [`ShareLedger`] tracks the outstanding share supply and each holder's
//! balance.  The pool aggregate composes the two and keeps them in step:
//!
//! ```text
//! reserve_native == 0  ⇔  reserve_token == 0  ⇔  total_supply == 0
//! total_supply == Σ balance(holder)
//! ```
//!
//! [`OwedBalances`] records payouts that were committed but refused by a
//! ledger, so the holder can claim them later.

mod owed;
mod reserves;
mod shares;

pub use owed::{Owed, OwedBalances};
pub use reserves::Reserves;
pub use shares::{ShareLedger, ShareToken};
