//! Finnhub quote connector.
//!
//! Wire contract: `GET {base}/quote?symbol={symbol}&token={key}` returns
//! `{"c": <price>, "d": <change>, "dp": <percent>, "pc": <prev close>}`
//! in the listing currency (USD for the symbols routed here). The free
//! tier cannot serve indices or commodity futures directly, so the
//! mapping rules substitute ETF proxies (`^DJI` → `DIA`, `GC=F` → `GLD`,
//! ...). An all-zero payload (`c == 0 && pc == 0`) is the vendor's
//! "symbol not found" signal, never a valid price.

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

const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Connector for Finnhub's quote endpoint.
pub struct FinnhubConnector {
    router: Arc<ProxyRouter>,
    token: String,
    base_url: String,
    mode: TransportMode,
}

impl std::fmt::Debug for FinnhubConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinnhubConnector")
            .field("token", &self.token)
            .field("base_url", &self.base_url)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl FinnhubConnector {
    /// Stable identity for priority configuration.
    pub const KEY: ProviderKey = ProviderKey::new("finnhub");

    /// Build a connector against the production endpoint.
    ///
    /// Finnhub blocks cross-origin access, so production requests go
    /// through the relay chain.
    ///
    /// # Errors
    /// `InvalidConfig` when the API key is blank; a missing key is a
    /// configuration defect, not a runtime condition to discover per
    /// request.
    pub fn new(router: Arc<ProxyRouter>, token: impl Into<String>) -> Result<Self, MercatoError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(MercatoError::invalid_config("finnhub api key is empty"));
        }
        Ok(Self {
            router,
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            mode: TransportMode::Proxied,
        })
    }

    /// Point at a different base URL and speak to it directly (tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.mode = TransportMode::Direct;
        self
    }
}

impl Connector for FinnhubConnector {
    fn key(&self) -> ProviderKey {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Finnhub"
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
        ProviderRules::passthrough()
            // Indices: the free tier rejects them, ETF proxies stand in.
            .with_override("^DJI", "DIA")
            .with_override("^GSPC", "SPY")
            .with_override("^IXIC", "QQQ")
            .with_override("^RUT", "IWM")
            // Commodities and volatility, same story.
            .with_override("^VIX", "VIXY")
            .with_override("GC=F", "GLD")
            .with_override("CL=F", "USO")
            .with_override("NG=F", "UNG")
            .with_override("SI=F", "SLV")
            .with_override("HG=F", "CPER")
            .with_override("PL=F", "PPLT")
            .with_override("PA=F", "PALL")
            .with_override("ZW=F", "WEAT")
            .with_override("ZC=F", "CORN")
            .with_override("SB=F", "CANE")
    }

    fn as_quote_source(&self) -> Option<&dyn QuoteSource> {
        Some(self)
    }
}

#[async_trait]
impl QuoteSource for FinnhubConnector {
    async fn quote(&self, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError> {
        let url = format!(
            "{}/quote?symbol={}&token={}",
            self.base_url,
            urlencode(vendor_symbol),
            self.token
        );
        debug!(symbol = vendor_symbol, "fetching finnhub quote");
        let body = self
            .router
            .routed_send(TransportRequest::get(url), self.mode)
            .await
            .into_body()?;
        parse_quote(&body, vendor_symbol)
    }
}

#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    /// Current price.
    c: f64,
    /// Absolute change.
    d: Option<f64>,
    /// Percent change.
    dp: Option<f64>,
    /// Previous close.
    pc: f64,
}

fn parse_quote(body: &str, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError> {
    let q: FinnhubQuote = serde_json::from_str(body)
        .map_err(|e| MercatoError::validation(format!("finnhub quote: {e}")))?;

    if q.c == 0.0 && q.pc == 0.0 {
        return Err(MercatoError::semantic_miss(format!(
            "finnhub has no quote for {vendor_symbol}"
        )));
    }

    let change = q.d.unwrap_or(q.c - q.pc);
    let change_percent = q.dp.unwrap_or(if q.pc == 0.0 {
        0.0
    } else {
        (q.c - q.pc) / q.pc * 100.0
    });

    Ok(ProviderQuote {
        price: q.c,
        change,
        change_percent,
    })
}
