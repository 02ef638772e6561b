//! Checked arithmetic for the domain newtypes.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning primitives on
//! [`Amount`] and [`Shares`] into `Result`s carrying a context string, so
//! pool code can chain them with `?`.
//!
//! # Contract
//!
//! - No panics: every failure is an `Err`.
//! - No saturation: a clamped value would silently break conservation.

use super::wide::mul_div;
use crate::domain::{Amount, Shares};
use crate::error::{AmmError, Result};

/// Fallible arithmetic for domain wrapper types.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] with `context` on overflow.
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] with `context` on underflow.
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self>;

    /// Computes `floor(self × numerator / denominator)` through a 256-bit
    /// intermediate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if the result exceeds `u128`.
    fn scale(&self, numerator: u128, denominator: u128) -> Result<Self>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_add(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_sub(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn scale(&self, numerator: u128, denominator: u128) -> Result<Self> {
        mul_div(self.get(), numerator, denominator).map(Amount::new)
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_add(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self> {
        self.checked_sub(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn scale(&self, numerator: u128, denominator: u128) -> Result<Self> {
        mul_div(self.get(), numerator, denominator).map(Shares::new)
    }
}
