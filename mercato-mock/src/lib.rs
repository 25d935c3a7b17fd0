//! Mock connector for CI-safe tests. Serves deterministic fixture quotes
//! and can be configured to fail in specific shapes, so orchestrator
//! behavior can be exercised without a network.
#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use mercato_core::mapping::ProviderRules;
use mercato_core::{Connector, QuoteSource};
use mercato_types::{AssetClass, MercatoError, ProviderKey, ProviderQuote, TransportMode};

mod fixtures;

/// Deterministic in-memory connector.
///
/// Failure shapes can be forced two ways: per-connector via the builder
/// methods (`rate_limited`, `delay`, `fail_after`), or per-symbol via
/// magic symbols: `FAIL` forces a transport failure, `LIMIT` an HTTP
/// 429, and `ZERO` a semantic miss. A fixture whose price is zero is
/// also reported as a semantic miss, mirroring how real connectors
/// classify a vendor's all-zero payload.
pub struct MockConnector {
    key: ProviderKey,
    quotes: HashMap<String, ProviderQuote>,
    rules: ProviderRules,
    delay: Option<Duration>,
    rate_limited: bool,
    fail_after: Option<usize>,
    calls: AtomicUsize,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Build a mock named `mercato-mock` with the default fixture set.
    #[must_use]
    pub fn new() -> Self {
        Self::named("mercato-mock")
    }

    /// Build a mock under a custom provider key, for multi-provider
    /// cascade tests.
    #[must_use]
    pub fn named(key: &'static str) -> Self {
        Self {
            key: ProviderKey::new(key),
            quotes: fixtures::defaults(),
            rules: ProviderRules::passthrough(),
            delay: None,
            rate_limited: false,
            fail_after: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Add or replace a fixture quote.
    #[must_use]
    pub fn with_quote(
        mut self,
        symbol: impl Into<String>,
        price: f64,
        change: f64,
        change_percent: f64,
    ) -> Self {
        self.quotes.insert(
            symbol.into(),
            ProviderQuote {
                price,
                change,
                change_percent,
            },
        );
        self
    }

    /// Remove every fixture, so any non-magic symbol is a miss.
    #[must_use]
    pub fn without_fixtures(mut self) -> Self {
        self.quotes.clear();
        self
    }

    /// Add a symbol-mapping override, like a real connector's ETF-proxy
    /// or coin-id table.
    #[must_use]
    pub fn with_mapping_override(
        mut self,
        canonical: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Self {
        self.rules = self.rules.with_override(canonical, vendor);
        self
    }

    /// Decline instruments with no mapping override, like a provider
    /// that only understands its own identifier space.
    #[must_use]
    pub fn decline_unmapped(mut self) -> Self {
        self.rules.passthrough = false;
        self
    }

    /// Answer every call with HTTP 429.
    #[must_use]
    pub const fn rate_limited(mut self) -> Self {
        self.rate_limited = true;
        self
    }

    /// Sleep this long before answering any call.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Succeed for the first `n` calls, then fail with a transport error.
    #[must_use]
    pub const fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Number of quote calls that reached this connector.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn forced_outcome(symbol: &str) -> Result<(), MercatoError> {
        match symbol {
            "FAIL" => Err(MercatoError::transport("forced failure")),
            "LIMIT" => Err(MercatoError::http(429)),
            "ZERO" => Err(MercatoError::semantic_miss("vendor zero-price sentinel")),
            _ => Ok(()),
        }
    }
}

impl Connector for MockConnector {
    fn key(&self) -> ProviderKey {
        self.key
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_class(&self, _class: AssetClass) -> bool {
        true
    }

    fn transport_mode(&self) -> TransportMode {
        TransportMode::Direct
    }

    fn mapping_rules(&self) -> ProviderRules {
        self.rules.clone()
    }

    fn as_quote_source(&self) -> Option<&dyn QuoteSource> {
        Some(self)
    }
}

#[async_trait]
impl QuoteSource for MockConnector {
    async fn quote(&self, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError> {
        let call_index = self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        if self.rate_limited {
            return Err(MercatoError::http(429));
        }
        if let Some(limit) = self.fail_after
            && call_index >= limit
        {
            return Err(MercatoError::transport("forced failure"));
        }
        Self::forced_outcome(vendor_symbol)?;

        let payload = self.quotes.get(vendor_symbol).copied().ok_or_else(|| {
            MercatoError::semantic_miss(format!("no fixture quote for {vendor_symbol}"))
        })?;
        if payload.price == 0.0 {
            return Err(MercatoError::semantic_miss(format!(
                "zero-price payload for {vendor_symbol}"
            )));
        }
        Ok(payload)
    }
}
