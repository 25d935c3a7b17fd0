//! Mercato resolves logical market data requests across multiple
//! providers.
//!
//! Overview
//! - Routes each request through an ordered cascade of provider
//!   candidates built at request time by the symbol mapper.
//! - Applies per-symbol and per-class priorities to influence provider
//!   order; registration order breaks ties.
//! - Serves fresh cache hits without touching the network, and falls
//!   back to the last known-good result (marked stale) when every live
//!   source fails.
//! - Never surfaces provider failures to callers: the only externally
//!   visible "error" state is a quote's `Unknown` status, which is data.
//!
//! Key behaviors and trade-offs
//! - Cascade: deterministic priority order with per-provider timeouts;
//!   any classified failure (transport, HTTP, semantic miss, malformed
//!   body) advances to the next candidate.
//! - Rate limiting: a provider answering 429 is put on cooldown so
//!   sibling resolutions skip it instead of piling on.
//! - Batches: one concurrent resolution per instrument, positional
//!   results, no cross-item failure propagation. An optional courtesy
//!   delay staggers launches against shared-rate-limited providers.
//!
//! Building an orchestrator:
//! ```rust,ignore
//! use std::sync::Arc;
//! use mercato::{Mercato, AssetClass};
//! use mercato_core::{proxy::ProxyRouter, transport::ReqwestTransport};
//! use mercato_providers::{CoinGeckoConnector, FinnhubConnector, YahooChartConnector};
//!
//! let router = Arc::new(ProxyRouter::with_default_relays(Arc::new(ReqwestTransport::new())));
//! let finnhub = Arc::new(FinnhubConnector::new(router.clone(), api_key)?);
//! let yahoo = Arc::new(YahooChartConnector::new(router.clone()));
//! let gecko = Arc::new(CoinGeckoConnector::new(router.clone()));
//!
//! let mercato = Mercato::builder()
//!     .with_connector(finnhub.clone())
//!     .with_connector(yahoo.clone())
//!     .with_connector(gecko)
//!     .router(router)
//!     .prefer_for_class(AssetClass::EquityIndex, &[FinnhubConnector::KEY, YahooChartConnector::KEY])
//!     .build()?;
//!
//! let quotes = mercato.resolve_batch(&instruments).await;
//! ```
#![warn(missing_docs)]

mod batch;
mod core;
mod documents;
mod resolver;

pub use core::{Mercato, MercatoBuilder};

pub use mercato_core::{Connector, QuoteSource};

// Re-export the domain types callers interact with.
pub use mercato_types::{
    AssetClass, CacheClass, CacheConfig, CooldownConfig, Instrument, MercatoError,
    ProviderCandidate, ProviderKey, Quote, ResolutionStatus, ResolverConfig, TransportMode,
};
