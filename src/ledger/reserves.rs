//! The pool's two asset reserves.

use core::fmt;

use crate::domain::{Amount, SwapDirection};
use crate::error::Result;
use crate::math::CheckedArithmetic;

/// Native and token reserves held by the pool.
///
/// `Reserves` is `Copy`: pool operations compute the next value, check
/// every step, and only then assign it, so a failure never leaves a
/// half-updated pair behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reserves {
    native: Amount,
    token: Amount,
}

impl Reserves {
    /// Both reserves empty.
    pub const EMPTY: Self = Self {
        native: Amount::ZERO,
        token: Amount::ZERO,
    };

    /// Creates a reserve pair.
    #[must_use]
    pub const fn new(native: Amount, token: Amount) -> Self {
        Self { native, token }
    }

    /// Returns the native reserve.
    pub const fn native(&self) -> Amount {
        self.native
    }

    /// Returns the token reserve.
    pub const fn token(&self) -> Amount {
        self.token
    }

    /// Returns `true` if both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.native.is_zero() && self.token.is_zero()
    }

    /// Returns `(input_reserve, output_reserve)` for a swap direction.
    #[must_use]
    pub const fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::NativeToToken => (self.native, self.token),
            SwapDirection::TokenToNative => (self.token, self.native),
        }
    }

    /// Returns the reserves after depositing both legs.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if
    /// either reserve overflows.
    pub fn deposited(&self, native: Amount, token: Amount) -> Result<Self> {
        Ok(Self {
            native: self.native.safe_add(&native, "native reserve overflow")?,
            token: self.token.safe_add(&token, "token reserve overflow")?,
        })
    }

    /// Returns the reserves after paying out both legs.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if
    /// a payout exceeds its reserve.
    pub fn withdrawn(&self, native: Amount, token: Amount) -> Result<Self> {
        Ok(Self {
            native: self.native.safe_sub(&native, "native reserve underflow")?,
            token: self.token.safe_sub(&token, "token reserve underflow")?,
        })
    }

    /// Returns the reserves after a swap: `amount_in` credited to the input
    /// side, `amount_out` debited from the output side.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) on
    /// input overflow or output underflow.
    pub fn swapped(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<Self> {
        match direction {
            SwapDirection::NativeToToken => Ok(Self {
                native: self.native.safe_add(&amount_in, "native reserve overflow")?,
                token: self.token.safe_sub(&amount_out, "token reserve underflow")?,
            }),
            SwapDirection::TokenToNative => Ok(Self {
                native: self.native.safe_sub(&amount_out, "native reserve underflow")?,
                token: self.token.safe_add(&amount_in, "token reserve overflow")?,
            }),
        }
    }

    /// Returns `native × token` as a 256-bit value, for invariant checks.
    #[must_use]
    pub fn product(&self) -> crate::math::U256 {
        crate::math::U256::from(self.native.get()) * crate::math::U256::from(self.token.get())
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reserves(native={}, token={})", self.native, self.token)
    }
}
