//! Collaborator adapter: the boundary to the ledgers that actually hold
//! the traded assets.
//!
//! The pool never moves value itself.  It calls a [`TokenLedger`] for the
//! ledger-tracked token and a [`NativeLedger`] for the native asset, via a
//! [`Settlement`] that journals inbound legs so they can be refunded if a
//! later step fails.
//!
//! # Refused Payouts
//!
//! A ledger may refuse to pay out even when the pool's balance covers the
//! amount (a recipient that rejects value, a frozen account).  The pool
//! checks its own balances before committing, and any committed payout or
//! refund a ledger still refuses is credited to the recipient in
//! [`OwedBalances`](crate::ledger::OwedBalances) and claimed later.

mod memory;
mod settlement;

use thiserror::Error;

use crate::domain::{Address, Amount};

pub use memory::{MemoryNative, MemoryToken};
pub use settlement::{Inbound, Settlement};

/// Why a collaborator ledger refused a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TransferError {
    /// The sender's balance does not cover the amount.
    #[error("insufficient balance")]
    InsufficientBalance,
    /// The owner has not authorised the spender for the amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,
    /// The ledger refused for a reason of its own.
    #[error("rejected: {0}")]
    Rejected(&'static str),
}

/// The external ledger of the non-native token.
pub trait TokenLedger {
    /// Token balance of `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Moves `amount` from `owner` to `recipient` using an allowance the
    /// owner granted to `recipient` beforehand.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if the balance or allowance is short, or
    /// the ledger refuses.  A failed call moves nothing.
    fn transfer_from(
        &mut self,
        owner: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Moves `amount` from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if the balance is short or the ledger
    /// refuses.  A failed call moves nothing.
    fn transfer(
        &mut self,
        sender: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

/// The execution environment's native value.
pub trait NativeLedger {
    /// Native balance of `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Takes `amount` attached by `payer` into `pool`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if the payer cannot cover the amount.
    fn receive(&mut self, payer: &Address, pool: &Address, amount: Amount)
        -> Result<(), TransferError>;

    /// Sends `amount` from `pool` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] if the pool cannot cover the amount or
    /// the environment refuses.
    fn send(&mut self, pool: &Address, recipient: &Address, amount: Amount)
        -> Result<(), TransferError>;
}
