//! Logical instruments and their asset classes.

use serde::{Deserialize, Serialize};

/// Asset class of a logical instrument.
///
/// The class steers provider ordering and cache TTL selection; it never
/// leaks into vendor requests (the mapper decides vendor identifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AssetClass {
    /// A broad equity index such as the Dow Jones or the S&P 500.
    EquityIndex,
    /// A single listed equity, including exchange-traded funds.
    Equity,
    /// A commodity future or its ETF proxy (gold, crude oil, ...).
    Commodity,
    /// A crypto asset priced in USD.
    Crypto,
    /// A fiat-pegged token (stablecoins).
    FiatPegged,
}

/// A logical tradable entity identified by a stable canonical symbol.
///
/// The canonical symbol is the display key: it is unique within its asset
/// class and stays the same across provider failover. Callers never see
/// vendor-specific identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    symbol: String,
    name: String,
    class: AssetClass,
}

impl Instrument {
    /// Construct an instrument from its canonical symbol, display name and class.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, class: AssetClass) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            class,
        }
    }

    /// Convenience constructor for an equity index.
    pub fn index(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(symbol, name, AssetClass::EquityIndex)
    }

    /// Convenience constructor for a single equity.
    pub fn equity(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(symbol, name, AssetClass::Equity)
    }

    /// Convenience constructor for a commodity.
    pub fn commodity(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(symbol, name, AssetClass::Commodity)
    }

    /// Convenience constructor for a crypto asset.
    pub fn crypto(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(symbol, name, AssetClass::Crypto)
    }

    /// The canonical display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The asset class.
    #[must_use]
    pub const fn class(&self) -> AssetClass {
        self.class
    }
}
