//! Receipts for liquidity deposits and withdrawals.

use core::fmt;

use super::{Amount, Shares};

/// Outcome of a successful liquidity deposit.
///
/// `amount_token` is the amount actually pulled from the caller, which for
/// a seeded pool is the ratio-implied amount rather than the declared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deposit {
    /// Shares credited to the depositor.
    pub shares_minted: Shares,
    /// Native amount added to the reserves.
    pub amount_native: Amount,
    /// Token amount added to the reserves.
    pub amount_token: Amount,
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deposit(native={}, token={}, minted={})",
            self.amount_native, self.amount_token, self.shares_minted
        )
    }
}

/// Outcome of a successful liquidity withdrawal.
///
/// `amount_native` and `amount_token` are the withdrawer's full claim.
/// If the native ledger refused the payout, `native_owed` equals
/// `amount_native` and the value waits in the pool to be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Withdrawal {
    /// Shares burned from the withdrawer.
    pub shares_burned: Shares,
    /// Native amount withdrawn.
    pub amount_native: Amount,
    /// Token amount withdrawn.
    pub amount_token: Amount,
    /// Part of `amount_native` credited as owed instead of paid.
    pub native_owed: Amount,
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Withdrawal(burned={}, native={}, token={}",
            self.shares_burned, self.amount_native, self.amount_token
        )?;
        if !self.native_owed.is_zero() {
            write!(f, ", owed={}", self.native_owed)?;
        }
        write!(f, ")")
    }
}
