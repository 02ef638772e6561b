//! Journaled execution of the transfers belonging to one pool operation.

use tracing::{debug, warn};

use super::{NativeLedger, TokenLedger, TransferError};
use crate::domain::{Address, Amount};
use crate::error::Result;

/// An inbound transfer recorded for refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// Tokens pulled from `owner`.
    Token {
        /// The account the tokens came from.
        owner: Address,
        /// Amount pulled.
        amount: Amount,
    },
    /// Native value received from `payer`.
    Native {
        /// The account the value came from.
        payer: Address,
        /// Amount received.
        amount: Amount,
    },
}

/// Runs the transfers of a single operation against both ledgers.
///
/// Inbound legs (pulls and attached value) are recorded; [`unwind`]
/// refunds them in reverse order.  Zero-amount legs are skipped.
///
/// [`unwind`]: Settlement::unwind
pub struct Settlement<'a, T, N> {
    token: &'a mut T,
    native: &'a mut N,
    pool: Address,
    journal: Vec<Inbound>,
}

impl<'a, T: TokenLedger, N: NativeLedger> Settlement<'a, T, N> {
    /// Starts a settlement for the pool account `pool`.
    pub fn new(token: &'a mut T, native: &'a mut N, pool: Address) -> Self {
        Self {
            token,
            native,
            pool,
            journal: Vec::new(),
        }
    }

    /// Pulls `amount` tokens from `owner` into the pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`](crate::error::AmmError::TransferFailed)
    /// if the token ledger refuses.
    pub fn pull_token(&mut self, owner: &Address, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        self.token.transfer_from(owner, &self.pool, amount)?;
        self.journal.push(Inbound::Token {
            owner: *owner,
            amount,
        });
        debug!(owner = %owner, %amount, "pulled tokens");
        Ok(())
    }

    /// Takes `amount` of attached native value from `payer`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`](crate::error::AmmError::TransferFailed)
    /// if the payer cannot cover it.
    pub fn receive_native(&mut self, payer: &Address, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        self.native.receive(payer, &self.pool, amount)?;
        self.journal.push(Inbound::Native {
            payer: *payer,
            amount,
        });
        debug!(payer = %payer, %amount, "received native value");
        Ok(())
    }

    /// Checks that the pool's ledger balances cover the given payouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InsufficientBalance`] wrapped in
    /// [`AmmError::TransferFailed`](crate::error::AmmError::TransferFailed).
    pub fn ensure_outbound(&self, native: Amount, token: Amount) -> Result<()> {
        if self.native.balance_of(&self.pool) < native || self.token.balance_of(&self.pool) < token
        {
            return Err(TransferError::InsufficientBalance.into());
        }
        Ok(())
    }

    /// Pays `amount` tokens from the pool to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`](crate::error::AmmError::TransferFailed)
    /// if the token ledger refuses.
    pub fn push_token(&mut self, recipient: &Address, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        self.token.transfer(&self.pool, recipient, amount)?;
        debug!(recipient = %recipient, %amount, "paid tokens");
        Ok(())
    }

    /// Sends `amount` of native value from the pool to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TransferFailed`](crate::error::AmmError::TransferFailed)
    /// if the environment refuses.
    pub fn send_native(&mut self, recipient: &Address, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        self.native.send(&self.pool, recipient, amount)?;
        debug!(recipient = %recipient, %amount, "paid native value");
        Ok(())
    }

    /// Refunds every recorded inbound leg, newest first.
    ///
    /// Returns the legs the ledgers refused to refund; the caller is
    /// responsible for crediting them to their owners.
    #[must_use = "unrefunded legs must be credited to their owners"]
    pub fn unwind(&mut self) -> Vec<Inbound> {
        let mut unrefunded = Vec::new();
        while let Some(leg) = self.journal.pop() {
            let refunded = match leg {
                Inbound::Token { owner, amount } => self.token.transfer(&self.pool, &owner, amount),
                Inbound::Native { payer, amount } => self.native.send(&self.pool, &payer, amount),
            };
            if let Err(err) = refunded {
                warn!(?leg, %err, "refund of inbound leg refused");
                unrefunded.push(leg);
            }
        }
        unrefunded
    }
}
