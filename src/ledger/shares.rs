//! Liquidity share supply and per-holder balances.

use std::collections::BTreeMap;

use crate::domain::{Address, Shares};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Read and transfer surface of a fungible share token.
///
/// The pool implements this directly: it doubles as the ledger of its own
/// liquidity shares.
pub trait ShareToken {
    /// Human-readable share name.
    fn name(&self) -> &str;

    /// Short share symbol.
    fn symbol(&self) -> &str;

    /// Outstanding share supply.
    fn total_supply(&self) -> Shares;

    /// Shares held by `holder` (zero if unknown).
    fn balance_of(&self, holder: &Address) -> Shares;

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `amount` is zero.
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer shares.
    fn transfer(&mut self, from: &Address, to: &Address, amount: Shares) -> Result<()>;
}

/// Share supply plus holder balances.
///
/// Holders with a zero balance are removed, so an empty supply always
/// means an empty map.  Every mutating method validates before writing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShareLedger {
    total: Shares,
    balances: BTreeMap<Address, Shares>,
}

impl ShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding supply.
    pub const fn total(&self) -> Shares {
        self.total
    }

    /// Balance of `holder`.
    pub fn balance(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or(Shares::ZERO)
    }

    /// Number of holders with a non-zero balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Iterates holders and balances in address order.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Shares)> {
        self.balances.iter()
    }

    /// Credits `amount` new shares to `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the supply would overflow.
    pub fn mint(&mut self, holder: &Address, amount: Shares) -> Result<()> {
        let total = self.total.safe_add(&amount, "share supply overflow")?;
        // Every balance is bounded by the supply, so this cannot fail once
        // the supply check passed.
        let balance = self.balance(holder).safe_add(&amount, "share balance overflow")?;
        if !balance.is_zero() {
            self.balances.insert(*holder, balance);
        }
        self.total = total;
        Ok(())
    }

    /// Burns `amount` shares held by `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `holder` holds fewer
    /// than `amount` shares.
    pub fn burn(&mut self, holder: &Address, amount: Shares) -> Result<()> {
        let available = self.balance(holder);
        let balance = available
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientShares {
                requested: amount,
                available,
            })?;
        let total = self.total.safe_sub(&amount, "share supply underflow")?;
        self.set_balance(holder, balance);
        self.total = total;
        Ok(())
    }

    /// Moves `amount` shares between holders without touching the supply.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `from` holds fewer than
    /// `amount` shares.
    pub fn move_shares(&mut self, from: &Address, to: &Address, amount: Shares) -> Result<()> {
        let available = self.balance(from);
        let from_balance = available
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientShares {
                requested: amount,
                available,
            })?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance(to).safe_add(&amount, "share balance overflow")?;
        self.set_balance(from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }

    fn set_balance(&mut self, holder: &Address, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, balance);
        }
    }

    /// Returns `true` if the supply equals the sum of all balances and no
    /// balance exceeds the supply.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut sum: u128 = 0;
        for balance in self.balances.values() {
            if balance.is_zero() || *balance > self.total {
                return false;
            }
            sum = match sum.checked_add(balance.get()) {
                Some(v) => v,
                None => return false,
            };
        }
        sum == self.total.get()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::from_bytes([1u8; 32])
    }

    fn bob() -> Address {
        Address::from_bytes([2u8; 32])
    }

    #[test]
    fn mint_and_burn_keep_sum() {
        let mut ledger = ShareLedger::new();
        let Ok(()) = ledger.mint(&alice(), Shares::new(100)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.mint(&bob(), Shares::new(50)) else {
            panic!("mint");
        };
        assert_eq!(ledger.total(), Shares::new(150));
        assert!(ledger.is_consistent());

        let Ok(()) = ledger.burn(&alice(), Shares::new(100)) else {
            panic!("burn");
        };
        assert_eq!(ledger.balance(&alice()), Shares::ZERO);
        assert_eq!(ledger.holder_count(), 1);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn burn_more_than_held_leaves_ledger_untouched() {
        let mut ledger = ShareLedger::new();
        let Ok(()) = ledger.mint(&alice(), Shares::new(10)) else {
            panic!("mint");
        };
        let before = ledger.clone();
        let result = ledger.burn(&alice(), Shares::new(11));
        assert_eq!(
            result,
            Err(AmmError::InsufficientShares {
                requested: Shares::new(11),
                available: Shares::new(10),
            })
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn burning_everything_empties_the_map() {
        let mut ledger = ShareLedger::new();
        let Ok(()) = ledger.mint(&alice(), Shares::new(7)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.burn(&alice(), Shares::new(7)) else {
            panic!("burn");
        };
        assert!(ledger.total().is_zero());
        assert_eq!(ledger.holder_count(), 0);
    }

    #[test]
    fn move_shares_between_holders() {
        let mut ledger = ShareLedger::new();
        let Ok(()) = ledger.mint(&alice(), Shares::new(10)) else {
            panic!("mint");
        };
        let Ok(()) = ledger.move_shares(&alice(), &bob(), Shares::new(4)) else {
            panic!("move");
        };
        assert_eq!(ledger.balance(&alice()), Shares::new(6));
        assert_eq!(ledger.balance(&bob()), Shares::new(4));
        assert_eq!(ledger.total(), Shares::new(10));
        assert!(ledger.is_consistent());

        let Ok(()) = ledger.move_shares(&bob(), &bob(), Shares::new(4)) else {
            panic!("self move");
        };
        assert_eq!(ledger.balance(&bob()), Shares::new(4));
        assert!(ledger.move_shares(&bob(), &alice(), Shares::new(5)).is_err());
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut ledger = ShareLedger::new();
        let Ok(()) = ledger.mint(&alice(), Shares::new(u128::MAX)) else {
            panic!("mint");
        };
        let before = ledger.clone();
        assert!(ledger.mint(&bob(), Shares::new(1)).is_err());
        assert_eq!(ledger, before);
    }
}
