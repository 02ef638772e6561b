//! In-memory ledgers for tests, demos and simulations.

use std::collections::{BTreeSet, HashMap};

use super::{NativeLedger, TokenLedger, TransferError};
use crate::domain::{Address, Amount};

/// An allowance-based fungible token kept in memory.
///
/// Accounts added with [`block`](Self::block) have every transfer to or
/// from them rejected; [`block_incoming`](Self::block_incoming) rejects
/// only transfers into the account.  Tests use both to force collaborator
/// failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryToken {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    blocked: BTreeSet<Address>,
    blocked_incoming: BTreeSet<Address>,
}

impl MemoryToken {
    /// Creates a token with no balances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` new tokens to `holder`.
    ///
    /// Saturates at [`Amount::MAX`].
    pub fn mint(&mut self, holder: &Address, amount: Amount) {
        let balance = self.balance_of(holder);
        let next = balance.checked_add(&amount).unwrap_or(Amount::MAX);
        self.balances.insert(*holder, next);
    }

    /// Sets the allowance `owner` grants `spender`.
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Returns the allowance `owner` granted `spender`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Rejects all future transfers touching `account`.
    pub fn block(&mut self, account: &Address) {
        self.blocked.insert(*account);
    }

    /// Rejects all future transfers into `account`; it can still pay.
    pub fn block_incoming(&mut self, account: &Address) {
        self.blocked_incoming.insert(*account);
    }

    /// Lifts both kinds of block.
    pub fn unblock(&mut self, account: &Address) {
        self.blocked.remove(account);
        self.blocked_incoming.remove(account);
    }

    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if self.blocked.contains(from) || self.blocked.contains(to) {
            return Err(TransferError::Rejected("account blocked"));
        }
        if self.blocked_incoming.contains(to) {
            return Err(TransferError::Rejected("recipient refuses transfers"));
        }
        let from_balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(TransferError::Rejected("recipient balance overflow"))?;
        self.balances.insert(*from, from_balance);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}

impl TokenLedger for MemoryToken {
    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    fn transfer_from(
        &mut self,
        owner: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let remaining = self
            .allowance(owner, recipient)
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientAllowance)?;
        self.move_balance(owner, recipient, amount)?;
        self.allowances.insert((*owner, *recipient), remaining);
        Ok(())
    }

    fn transfer(
        &mut self,
        sender: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.move_balance(sender, recipient, amount)
    }
}

/// Native balances kept in memory, standing in for the execution
/// environment.
#[derive(Debug, Clone, Default)]
pub struct MemoryNative {
    balances: HashMap<Address, Amount>,
    blocked: BTreeSet<Address>,
    blocked_incoming: BTreeSet<Address>,
}

impl MemoryNative {
    /// Creates an environment with no balances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` to `holder` out of thin air.
    ///
    /// Saturates at [`Amount::MAX`].
    pub fn credit(&mut self, holder: &Address, amount: Amount) {
        let next = self
            .balance_of(holder)
            .checked_add(&amount)
            .unwrap_or(Amount::MAX);
        self.balances.insert(*holder, next);
    }

    /// Rejects all future sends and receipts touching `account`.
    pub fn block(&mut self, account: &Address) {
        self.blocked.insert(*account);
    }

    /// Rejects all future transfers into `account`; it can still pay.
    pub fn block_incoming(&mut self, account: &Address) {
        self.blocked_incoming.insert(*account);
    }

    /// Lifts both kinds of block.
    pub fn unblock(&mut self, account: &Address) {
        self.blocked.remove(account);
        self.blocked_incoming.remove(account);
    }

    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if self.blocked.contains(from) || self.blocked.contains(to) {
            return Err(TransferError::Rejected("account blocked"));
        }
        if self.blocked_incoming.contains(to) {
            return Err(TransferError::Rejected("recipient refuses transfers"));
        }
        let from_balance = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(TransferError::Rejected("recipient balance overflow"))?;
        self.balances.insert(*from, from_balance);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}

impl NativeLedger for MemoryNative {
    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    fn receive(
        &mut self,
        payer: &Address,
        pool: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.move_balance(payer, pool, amount)
    }

    fn send(
        &mut self,
        pool: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.move_balance(pool, recipient, amount)
    }
}
