//! Yahoo chart connector, the generalist fallback.
//!
//! Wire contract: `GET {base}/v8/finance/chart/{symbol}` returns
//! `{"chart": {"result": [{"meta": {...}}], "error": null}}` with the
//! price in `meta.regularMarketPrice` and the previous close in
//! `meta.previousClose` (or `chartPreviousClose`). Change and percent
//! are derived from the two. Yahoo serves indices (`^DJI`) and
//! suffix-qualified A-shares (`600519.SS`) directly; unknown symbols
//! come back as a `chart.error` object. The origin blocks cross-origin
//! access, so production requests go through the relay chain.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use mercato_core::mapping::{ProviderRules, VenueStyle};
use mercato_core::proxy::ProxyRouter;
use mercato_core::transport::TransportRequest;
use mercato_core::{Connector, QuoteSource};
use mercato_types::{AssetClass, MercatoError, ProviderKey, ProviderQuote, TransportMode};

use crate::util::urlencode;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Connector for Yahoo's v8 chart endpoint.
pub struct YahooChartConnector {
    router: Arc<ProxyRouter>,
    base_url: String,
    mode: TransportMode,
}

impl YahooChartConnector {
    /// Stable identity for priority configuration.
    pub const KEY: ProviderKey = ProviderKey::new("yahoo-chart");

    /// Build a connector against the production endpoint.
    #[must_use]
    pub fn new(router: Arc<ProxyRouter>) -> Self {
        Self {
            router,
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: TransportMode::Proxied,
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

impl Connector for YahooChartConnector {
    fn key(&self) -> ProviderKey {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn supports_class(&self, class: AssetClass) -> bool {
        matches!(
            class,
            AssetClass::EquityIndex | AssetClass::Equity | AssetClass::Commodity
        )
    }

    fn transport_mode(&self) -> TransportMode {
        self.mode
    }

    fn mapping_rules(&self) -> ProviderRules {
        ProviderRules {
            venue_style: VenueStyle::DotSuffix,
            passthrough: true,
            ..ProviderRules::default()
        }
    }

    fn as_quote_source(&self) -> Option<&dyn QuoteSource> {
        Some(self)
    }
}

#[async_trait]
impl QuoteSource for YahooChartConnector {
    async fn quote(&self, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError> {
        let url = format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            urlencode(vendor_symbol)
        );
        debug!(symbol = vendor_symbol, "fetching yahoo chart meta");
        let body = self
            .router
            .routed_send(TransportRequest::get(url), self.mode)
            .await
            .into_body()?;
        parse_chart(&body, vendor_symbol)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartItem>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartItem {
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "previousClose", alias = "chartPreviousClose")]
    previous_close: Option<f64>,
}

fn parse_chart(body: &str, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| MercatoError::validation(format!("yahoo chart: {e}")))?;

    if envelope.chart.error.as_ref().is_some_and(|e| !e.is_null()) {
        return Err(MercatoError::semantic_miss(format!(
            "yahoo has no chart for {vendor_symbol}"
        )));
    }
    let item = envelope
        .chart
        .result
        .as_ref()
        .and_then(|r| r.first())
        .ok_or_else(|| {
            MercatoError::semantic_miss(format!("yahoo returned no result for {vendor_symbol}"))
        })?;

    let price = item.meta.regular_market_price.ok_or_else(|| {
        MercatoError::validation(format!("yahoo meta missing price for {vendor_symbol}"))
    })?;
    let previous = item
        .meta
        .previous_close
        .filter(|p| *p > 0.0)
        .ok_or_else(|| {
            MercatoError::validation(format!(
                "yahoo meta missing previous close for {vendor_symbol}"
            ))
        })?;

    let change = price - previous;
    Ok(ProviderQuote {
        price,
        change,
        change_percent: change / previous * 100.0,
    })
}
