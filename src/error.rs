//! Unified error types for the exchange.
//!
//! Every fallible operation in the crate returns [`AmmError`].  A returned
//! error always means the pool and the collaborating ledgers are exactly
//! as they were before the call.

use thiserror::Error;

use crate::adapter::TransferError;
use crate::domain::{Amount, Shares};

/// Errors raised by the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// An input amount (deposit, share count or swap input) is zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// A reserve used as a divisor or as the output side of a trade is zero.
    #[error("reserve is empty")]
    EmptyReserve,

    /// The declared token amount does not cover the amount implied by the
    /// current reserve ratio.
    #[error("insufficient token amount: required {required}, provided {provided}")]
    InsufficientTokenAmount {
        /// Token amount implied by the deposit's native amount.
        required: Amount,
        /// Token amount declared by the caller.
        provided: Amount,
    },

    /// The caller tried to burn or move more shares than they hold.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller asked to burn or transfer.
        requested: Shares,
        /// Shares the caller holds.
        available: Shares,
    },

    /// A deposit into a seeded pool was too small to mint a single share.
    #[error("deposit too small to mint shares")]
    InsufficientSharesMinted,

    /// The computed trade output is below the caller's minimum.
    #[error("slippage exceeded: output {amount_out} below minimum {min_amount_out}")]
    SlippageExceeded {
        /// Output the pool would pay.
        amount_out: Amount,
        /// Minimum output the caller accepts.
        min_amount_out: Amount,
    },

    /// A collaborator ledger refused a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// Checked arithmetic overflowed or underflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in an internal computation.
    #[error("division by zero")]
    DivisionByZero,

    /// The exchange configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
