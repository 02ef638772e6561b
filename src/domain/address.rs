//! Account identity used for holders, the pool and the token ledger.

use core::fmt;

/// A 32-byte account identity.
///
/// Identifies share holders, the pool's own account on the collaborating
/// ledgers, and the token ledger itself.  All byte patterns are valid; the
/// all-zero address is reserved as "unset" by configuration validation.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Address;
///
/// let alice = Address::from_bytes([7u8; 32]);
/// assert!(!alice.is_zero());
/// assert!(Address::zero().is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an address from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
