//! Connector and capability traits implemented by provider integrations.

use async_trait::async_trait;

use mercato_types::{AssetClass, MercatoError, ProviderKey, ProviderQuote, TransportMode};

use crate::mapping::ProviderRules;

/// Capability trait for connectors that can serve point-in-time quotes.
///
/// The symbol has already been translated by the mapper; implementations
/// parse their vendor's response shape and either return a normalized
/// payload or classify the failure (`SemanticMiss` for a documented
/// "no such instrument" signal, `Validation` for an unexpected body).
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch and normalize a quote for an already-mapped vendor symbol.
    async fn quote(&self, vendor_symbol: &str) -> Result<ProviderQuote, MercatoError>;
}

/// A provider integration registered with the orchestrator.
pub trait Connector: Send + Sync {
    /// Stable identity used in priority configuration and logs.
    fn key(&self) -> ProviderKey;

    /// Human-readable vendor name.
    fn vendor(&self) -> &'static str;

    /// Whether this provider can serve instruments of the given class.
    fn supports_class(&self, class: AssetClass) -> bool;

    /// How requests to this provider reach the network.
    fn transport_mode(&self) -> TransportMode {
        TransportMode::Proxied
    }

    /// Symbol mapping rules for this provider. Defaults to passthrough.
    fn mapping_rules(&self) -> ProviderRules {
        ProviderRules::passthrough()
    }

    /// Access the quote capability, when implemented.
    fn as_quote_source(&self) -> Option<&dyn QuoteSource> {
        None
    }
}
