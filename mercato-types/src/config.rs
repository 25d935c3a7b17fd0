//! Configuration types shared between the orchestrator and middleware.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::instrument::AssetClass;
use crate::provider::ProviderKey;

/// Logical cache class, selecting a freshness window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CacheClass {
    /// Live market quotes; short TTL.
    MarketQuote,
    /// Slow-moving reference data and fetched documents; longer TTL.
    Reference,
}

/// Freshness windows per cache class.
///
/// A TTL governs only whether an entry is served without revalidation;
/// entries are never evicted, so the last known-good result is always
/// available as a stale fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for [`CacheClass::MarketQuote`].
    pub market_quote_ttl: Duration,
    /// TTL for [`CacheClass::Reference`].
    pub reference_ttl: Duration,
}

impl CacheConfig {
    /// The freshness window for the given class.
    #[must_use]
    pub const fn ttl_for(&self, class: CacheClass) -> Duration {
        match class {
            CacheClass::MarketQuote => self.market_quote_ttl,
            CacheClass::Reference => self.reference_ttl,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            market_quote_ttl: Duration::from_secs(60),
            reference_ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Cooldown applied to a provider after it signals rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// How long a rate-limited provider is skipped by the cascade.
    pub duration: Duration,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(60),
        }
    }
}

/// Ordered provider preferences at class and symbol scope.
///
/// Symbol scope wins over class scope; providers not listed remain
/// eligible after the listed ones, preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct ProviderPriority {
    /// Preferred provider order per asset class.
    pub per_class: HashMap<AssetClass, Vec<ProviderKey>>,
    /// Preferred provider order per canonical symbol.
    pub per_symbol: HashMap<String, Vec<ProviderKey>>,
}

impl ProviderPriority {
    /// Resolve the highest-precedence list for `(symbol, class)`, or `None`
    /// when nothing is configured.
    #[must_use]
    pub fn resolve(&self, symbol: &str, class: AssetClass) -> Option<&[ProviderKey]> {
        if let Some(list) = self.per_symbol.get(symbol) {
            return Some(list.as_slice());
        }
        self.per_class.get(&class).map(Vec::as_slice)
    }
}

/// Global configuration for the `Mercato` orchestrator.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Provider ordering preferences.
    pub priority: ProviderPriority,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional inter-item launch delay inside a batch, to stay polite with
    /// a shared-rate-limited provider. Scheduling nicety, not correctness.
    pub courtesy_delay: Option<Duration>,
    /// Cache freshness windows.
    pub cache: CacheConfig,
    /// Rate-limit cooldown behavior.
    pub cooldown: CooldownConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            priority: ProviderPriority::default(),
            provider_timeout: Duration::from_secs(5),
            courtesy_delay: None,
            cache: CacheConfig::default(),
            cooldown: CooldownConfig::default(),
        }
    }
}
