//! Declarative, validated exchange configuration.

mod exchange;

pub use exchange::ExchangeConfig;
