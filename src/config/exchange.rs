//! Configuration for a native/token exchange pool.

use crate::domain::Address;
use crate::error::AmmError;

/// Default name of the liquidity share token.
pub const DEFAULT_SHARE_NAME: &str = "Exchange Liquidity Share";

/// Default symbol of the liquidity share token.
pub const DEFAULT_SHARE_SYMBOL: &str = "XLS";

/// Immutable parameters of an exchange pool.
///
/// # Validation
///
/// - The token address must not be the zero address.
/// - The pool account must not be the zero address.
/// - The pool account and the token address must differ.
/// - Share name and symbol must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    pool_account: Address,
    token: Address,
    share_name: String,
    share_symbol: String,
}

impl ExchangeConfig {
    /// Creates and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any rule above fails.
    pub fn new(
        pool_account: Address,
        token: Address,
        share_name: impl Into<String>,
        share_symbol: impl Into<String>,
    ) -> Result<Self, AmmError> {
        let config = Self {
            pool_account,
            token,
            share_name: share_name.into(),
            share_symbol: share_symbol.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration with the default share metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] for invalid addresses.
    pub fn with_defaults(pool_account: Address, token: Address) -> Result<Self, AmmError> {
        Self::new(
            pool_account,
            token,
            DEFAULT_SHARE_NAME,
            DEFAULT_SHARE_SYMBOL,
        )
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first failed
    /// rule.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.token.is_zero() {
            return Err(AmmError::InvalidConfiguration("invalid token address"));
        }
        if self.pool_account.is_zero() {
            return Err(AmmError::InvalidConfiguration("invalid pool account"));
        }
        if self.pool_account == self.token {
            return Err(AmmError::InvalidConfiguration(
                "pool account must differ from token address",
            ));
        }
        if self.share_name.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("share name is empty"));
        }
        if self.share_symbol.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("share symbol is empty"));
        }
        Ok(())
    }

    /// The pool's own account on both ledgers.
    #[must_use]
    pub const fn pool_account(&self) -> Address {
        self.pool_account
    }

    /// Address of the traded token.
    #[must_use]
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Name of the liquidity share token.
    #[must_use]
    pub fn share_name(&self) -> &str {
        &self.share_name
    }

    /// Symbol of the liquidity share token.
    #[must_use]
    pub fn share_symbol(&self) -> &str {
        &self.share_symbol
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn pool() -> Address {
        Address::from_bytes([9u8; 32])
    }

    fn token() -> Address {
        Address::from_bytes([7u8; 32])
    }

    #[test]
    fn valid_config() {
        let Ok(cfg) = ExchangeConfig::with_defaults(pool(), token()) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.pool_account(), pool());
        assert_eq!(cfg.token(), token());
        assert_eq!(cfg.share_name(), DEFAULT_SHARE_NAME);
        assert_eq!(cfg.share_symbol(), DEFAULT_SHARE_SYMBOL);
    }

    #[test]
    fn zero_token_rejected() {
        let result = ExchangeConfig::with_defaults(pool(), Address::zero());
        assert_eq!(
            result,
            Err(AmmError::InvalidConfiguration("invalid token address"))
        );
    }

    #[test]
    fn zero_pool_rejected() {
        let result = ExchangeConfig::with_defaults(Address::zero(), token());
        assert!(matches!(result, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn pool_equal_to_token_rejected() {
        let result = ExchangeConfig::with_defaults(token(), token());
        assert!(matches!(result, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn blank_metadata_rejected() {
        assert!(ExchangeConfig::new(pool(), token(), " ", "X").is_err());
        assert!(ExchangeConfig::new(pool(), token(), "Share", "").is_err());
    }
}
