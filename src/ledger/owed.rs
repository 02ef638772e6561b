//! Payouts the pool committed but a ledger refused to deliver.

use core::fmt;
use std::collections::BTreeMap;

use crate::domain::{Address, Amount};
use crate::error::Result;
use crate::math::CheckedArithmetic;

/// Native and token amounts owed to one holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Owed {
    /// Native amount owed.
    pub native: Amount,
    /// Token amount owed.
    pub token: Amount,
}

impl Owed {
    /// Nothing owed.
    pub const NONE: Self = Self {
        native: Amount::ZERO,
        token: Amount::ZERO,
    };

    /// An owed native amount.
    #[must_use]
    pub const fn native(amount: Amount) -> Self {
        Self {
            native: amount,
            token: Amount::ZERO,
        }
    }

    /// An owed token amount.
    #[must_use]
    pub const fn token(amount: Amount) -> Self {
        Self {
            native: Amount::ZERO,
            token: amount,
        }
    }

    /// Returns `true` if nothing is owed.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.native.is_zero() && self.token.is_zero()
    }

    fn plus(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            native: self.native.safe_add(&other.native, "owed native overflow")?,
            token: self.token.safe_add(&other.token, "owed token overflow")?,
        })
    }

    fn minus(&self, other: &Self) -> Result<Self> {
        Ok(Self {
            native: self.native.safe_sub(&other.native, "owed native underflow")?,
            token: self.token.safe_sub(&other.token, "owed token underflow")?,
        })
    }
}

impl fmt::Display for Owed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owed(native={}, token={})", self.native, self.token)
    }
}

/// Per-holder owed balances.
///
/// Owed amounts sit in the pool's ledger accounts but outside the
/// reserves, so the pool is backed when its ledger balances cover
/// `reserves + total()`.
#[derive(Debug, Clone, Default)]
pub struct OwedBalances {
    total: Owed,
    entries: BTreeMap<Address, Owed>,
}

impl OwedBalances {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum over all holders.
    #[must_use]
    pub const fn total(&self) -> Owed {
        self.total
    }

    /// Amounts owed to `holder`.
    #[must_use]
    pub fn get(&self, holder: &Address) -> Owed {
        self.entries.get(holder).copied().unwrap_or(Owed::NONE)
    }

    /// Adds `amount` to what `holder` is owed.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) on
    /// overflow; nothing changes.
    pub fn credit(&mut self, holder: &Address, amount: Owed) -> Result<()> {
        let total = self.total.plus(&amount)?;
        let entry = self.get(holder).plus(&amount)?;
        self.set(holder, entry);
        self.total = total;
        Ok(())
    }

    /// Removes `amount` from what `holder` is owed.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if
    /// `holder` is owed less; nothing changes.
    pub fn debit(&mut self, holder: &Address, amount: Owed) -> Result<()> {
        let entry = self.get(holder).minus(&amount)?;
        let total = self.total.minus(&amount)?;
        self.set(holder, entry);
        self.total = total;
        Ok(())
    }

    fn set(&mut self, holder: &Address, owed: Owed) {
        if owed.is_zero() {
            self.entries.remove(holder);
        } else {
            self.entries.insert(*holder, owed);
        }
    }
}
