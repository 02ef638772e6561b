//! Swap direction, request and receipt.

use core::fmt;

use super::Amount;
use crate::error::AmmError;

/// Which asset the caller sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SwapDirection {
    /// Sell the native asset, receive tokens.
    NativeToToken = 0,
    /// Sell tokens, receive the native asset.
    TokenToNative = 1,
}

impl SwapDirection {
    /// Returns `true` if the input leg is the native asset.
    #[must_use]
    pub const fn input_is_native(&self) -> bool {
        matches!(self, Self::NativeToToken)
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::NativeToToken => Self::TokenToNative,
            Self::TokenToNative => Self::NativeToToken,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeToToken => write!(f, "NativeToToken"),
            Self::TokenToNative => write!(f, "TokenToNative"),
        }
    }
}

/// An exact-input swap order: sell `amount_in`, accept no less than
/// `min_amount_out`.
///
/// # Invariants
///
/// `amount_in` is never zero.  `min_amount_out` may be zero, in which case
/// the caller accepts any output including zero.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{Amount, SwapDirection, SwapRequest};
///
/// let req = SwapRequest::new(SwapDirection::NativeToToken, Amount::new(1_000), Amount::new(1_900));
/// assert!(req.is_ok());
/// assert!(SwapRequest::new(SwapDirection::NativeToToken, Amount::ZERO, Amount::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapRequest {
    direction: SwapDirection,
    amount_in: Amount,
    min_amount_out: Amount,
}

impl SwapRequest {
    /// Creates a swap request.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroAmount`] if `amount_in` is zero.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        Ok(Self {
            direction,
            amount_in,
            min_amount_out,
        })
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the exact input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the minimum acceptable output.
    pub const fn min_amount_out(&self) -> Amount {
        self.min_amount_out
    }
}

impl fmt::Display for SwapRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(in={}, min_out={})",
            self.direction, self.amount_in, self.min_amount_out
        )
    }
}

/// Outcome of an executed swap.
///
/// `amount_out` may be zero: a pathologically small input against large
/// reserves is still accepted when `min_amount_out` allows it.  `fee` is
/// the part of the input retained in the pool for share holders, rounded
/// up to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapReceipt {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapReceipt {
    pub(crate) const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Self {
        Self {
            direction,
            amount_in,
            amount_out,
            fee,
        }
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the input amount pulled from the caller.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount paid to the caller.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the retained fee, in input units.
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapReceipt({}, in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}
