//! Eastmoney push2 connector for China A-shares.
//!
//! Wire contract: `GET {base}/api/qt/stock/get?secid={secid}&fields=f43,f169,f170,f58,f60`
//! where the secid is the venue-qualified code (`1.600519` Shanghai,
//! `0.000001` Shenzhen) produced by the mapper. Prices are fixed-point
//! integers in CNY scaled by 100: `f43` price, `f169` absolute change,
//! `f170` percent change. Halted fields arrive as the string `"-"`.
//! `"data": null` (or a zero price) is the vendor's "no such security"
//! signal. The origin rejects relay traffic, so requests go direct with
//! a desktop UA and an eastmoney Referer.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use mercato_core::mapping::{ProviderRules, VenueStyle};
use mercato_core::proxy::ProxyRouter;
use mercato_core::transport::TransportRequest;
use mercato_core::{Connector, QuoteSource};
use mercato_types::{AssetClass, MercatoError, ProviderKey, ProviderQuote, TransportMode};

const DEFAULT_BASE_URL: &str = "https://push2.eastmoney.com";
const REFERER: &str = "https://www.eastmoney.com/";

/// Fixed-point scale of push2 price fields.
const PRICE_SCALE: f64 = 100.0;

/// Connector for Eastmoney's push2 stock endpoint.
pub struct EastmoneyConnector {
    router: Arc<ProxyRouter>,
    base_url: String,
}

impl EastmoneyConnector {
    /// Stable identity for priority configuration.
    pub const KEY: ProviderKey = ProviderKey::new("eastmoney");

    /// Build a connector against the production endpoint.
    #[must_use]
    pub fn new(router: Arc<ProxyRouter>) -> Self {
        Self {
            router,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different base URL (tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Connector for EastmoneyConnector {
    fn key(&self) -> ProviderKey {
        Self::KEY
    }

    fn vendor(&self) -> &'static str {
        "Eastmoney"
    }

    fn supports_class(&self, class: AssetClass) -> bool {
        matches!(class, AssetClass::Equity)
    }

    fn transport_mode(&self) -> TransportMode {
        TransportMode::Direct
    }

    fn mapping_rules(&self) -> ProviderRules {
        ProviderRules {
            venue_style: VenueStyle::SecidPrefix,
            passthrough: false,
            ..ProviderRules::default()
        }
    }

    fn as_quote_source(&self) -> Option<&dyn QuoteSource> {
        Some(self)
    }
}

#[async_trait]
impl QuoteSource for EastmoneyConnector {
    async fn quote(&self, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError> {
        let url = format!(
            "{}/api/qt/stock/get?secid={}&fields=f43,f169,f170,f58,f60",
            self.base_url, vendor_symbol
        );
        debug!(secid = vendor_symbol, "fetching eastmoney quote");
        let body = self
            .router
            .routed_send(
                TransportRequest::get(url).header("Referer", REFERER),
                TransportMode::Direct,
            )
            .await
            .into_body()?;
        parse_quote(&body, vendor_symbol)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Fields>,
}

#[derive(Debug, Deserialize)]
struct Fields {
    f43: Option<serde_json::Value>,
    f169: Option<serde_json::Value>,
    f170: Option<serde_json::Value>,
}

/// Push2 numeric fields may arrive as `"-"` when the security is halted.
fn scaled(v: Option<&serde_json::Value>) -> Option<f64> {
    v.and_then(serde_json::Value::as_f64).map(|n| n / PRICE_SCALE)
}

fn parse_quote(body: &str, secid: &str) -> Result<ProviderQuote, MercatoError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| MercatoError::validation(format!("eastmoney quote: {e}")))?;

    let Some(fields) = envelope.data else {
        return Err(MercatoError::semantic_miss(format!(
            "eastmoney has no security {secid}"
        )));
    };

    let price = scaled(fields.f43.as_ref()).filter(|p| *p > 0.0).ok_or_else(|| {
        MercatoError::semantic_miss(format!("eastmoney reports no price for {secid}"))
    })?;

    Ok(ProviderQuote {
        price,
        change: scaled(fields.f169.as_ref()).unwrap_or(0.0),
        change_percent: scaled(fields.f170.as_ref()).unwrap_or(0.0),
    })
}
