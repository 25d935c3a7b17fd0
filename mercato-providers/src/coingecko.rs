//! CoinGecko simple-price connector.
//!
//! Wire contract: `GET {base}/simple/price?ids={id}&vs_currencies=usd&include_24hr_change=true`
//! returns `{"<id>": {"usd": <price>, "usd_24h_change": <percent>}}`.
//! Identifiers are CoinGecko coin ids, not tickers; the mapping rules
//! translate (`BTC` → `bitcoin`). An id absent from the response map is
//! the vendor's "no such coin" signal. CoinGecko permits cross-origin
//! access on this endpoint, so requests try the origin first and only
//! fall back to the relay chain.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use mercato_core::mapping::ProviderRules;
use mercato_core::proxy::ProxyRouter;
use mercato_core::transport::TransportRequest;
use mercato_core::{Connector, QuoteSource};
use mercato_types::{AssetClass, MercatoError, ProviderKey, ProviderQuote, TransportMode};

use crate::util::urlencode;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Canonical ticker → CoinGecko coin id.
const COIN_IDS: [(&str, &str); 16] = [
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("SOL", "solana"),
    ("LINK", "chainlink"),
    ("USDT", "tether"),
    ("BNB", "binancecoin"),
    ("XRP", "ripple"),
    ("USDC", "usd-coin"),
    ("ADA", "cardano"),
    ("DOGE", "dogecoin"),
    ("AVAX", "avalanche-2"),
    ("TRX", "tron"),
    ("DOT", "polkadot"),
    ("LTC", "litecoin"),
    ("ATOM", "cosmos"),
    ("UNI", "uniswap"),
];

/// Connector for CoinGecko's simple-price endpoint.
pub struct CoinGeckoConnector {
    router: Arc<ProxyRouter>,
    base_url: String,
    mode: TransportMode,
}

impl CoinGeckoConnector {
    /// Stable identity for priority configuration.
    pub const KEY: ProviderKey = ProviderKey::new("coingecko");

    /// Build a connector against the production endpoint. No API key is
    /// required for simple-price.
    #[must_use]
    pub fn new(router: Arc<ProxyRouter>) -> Self {
        Self {
            router,
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: TransportMode::PreferDirect,
        }
    }

    /// Point at a different base URL and speak to it directly (tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.mode = TransportMode::Direct;
        self
    }
}

impl Connector for CoinGeckoConnector {
    fn key(&self) -> ProviderKey {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "CoinGecko"
    }

    fn supports_class(&self, class: AssetClass) -> bool {
        matches!(class, AssetClass::Crypto | AssetClass::FiatPegged)
    }

    fn transport_mode(&self) -> TransportMode {
        self.mode
    }

    fn mapping_rules(&self) -> ProviderRules {
        let mut rules = ProviderRules::default();
        for (ticker, id) in COIN_IDS {
            rules = rules.with_override(ticker, id);
        }
        rules
    }

    fn as_quote_source(&self) -> Option<&dyn QuoteSource> {
        Some(self)
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoConnector {
    async fn quote(&self, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url,
            urlencode(vendor_symbol)
        );
        debug!(coin_id = vendor_symbol, "fetching coingecko price");
        let body = self
            .router
            .routed_send(TransportRequest::get(url), self.mode)
            .await
            .into_body()?;
        parse_price(&body, vendor_symbol)
    }
}

#[derive(Debug, Deserialize)]
struct CoinGeckoPrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

fn parse_price(body: &str, coin_id: &str) -> Result<ProviderQuote, MercatoError> {
    let map: HashMap<String, CoinGeckoPrice> = serde_json::from_str(body)
        .map_err(|e| MercatoError::validation(format!("coingecko price: {e}")))?;

    let Some(entry) = map.get(coin_id) else {
        return Err(MercatoError::semantic_miss(format!(
            "coingecko has no coin {coin_id}"
        )));
    };
    let Some(price) = entry.usd else {
        return Err(MercatoError::semantic_miss(format!(
            "coingecko has no usd price for {coin_id}"
        )));
    };

    let change_percent = entry.usd_24h_change.unwrap_or(0.0);
    // Vendor reports the 24h percent move; recover the absolute change
    // from it and the current price.
    let change = if (100.0 + change_percent).abs() > f64::EPSILON {
        price - price * 100.0 / (100.0 + change_percent)
    } else {
        0.0
    };

    Ok(ProviderQuote {
        price,
        change,
        change_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_id_is_a_semantic_miss() {
        let body = r#"{"bitcoin":{"usd":97000.0,"usd_24h_change":1.2}}"#;
        assert!(matches!(
            parse_price(body, "ethereum"),
            Err(MercatoError::SemanticMiss { .. })
        ));
    }

    #[test]
    fn absolute_change_is_recovered_from_percent() {
        let body = r#"{"bitcoin":{"usd":105.0,"usd_24h_change":5.0}}"#;
        let q = parse_price(body, "bitcoin").unwrap();
        assert_eq!(q.price, 105.0);
        assert!((q.change - 5.0).abs() < 1e-9);
        assert_eq!(q.change_percent, 5.0);
    }

    #[test]
    fn missing_change_defaults_to_flat() {
        let body = r#"{"tether":{"usd":1.0}}"#;
        let q = parse_price(body, "tether").unwrap();
        assert_eq!(q.price, 1.0);
        assert_eq!(q.change, 0.0);
        assert_eq!(q.change_percent, 0.0);
    }
}
