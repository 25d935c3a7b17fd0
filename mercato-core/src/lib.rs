//! mercato-core
//!
//! Leaf components of the resolver, shared by connectors and the
//! orchestrator:
//!
//! - `transport`: single-request HTTP layer that classifies outcomes as
//!   values and never fails the caller.
//! - `proxy`: relay-chain routing for origins that block direct access.
//! - `mapping`: pure translation of logical instruments into vendor
//!   identifiers.
//! - `connector`: the `Connector` trait and the `QuoteSource` capability
//!   trait implemented by provider integrations.
#![warn(missing_docs)]

/// Connector and capability traits implemented by provider integrations.
pub mod connector;
/// Pure instrument-to-vendor-identifier mapping.
pub mod mapping;
/// Relay-chain routing over the transport layer.
pub mod proxy;
/// Single-request HTTP transport with classified outcomes.
pub mod transport;

pub use connector::{Connector, QuoteSource};
pub use mapping::{ProviderRules, SymbolMapper, VenueStyle};
pub use proxy::ProxyRouter;
pub use transport::{HttpTransport, ReqwestTransport, TransportOutcome, TransportRequest};

pub use mercato_types::{
    AssetClass, Instrument, MercatoError, ProviderCandidate, ProviderKey, ProviderQuote, Quote,
    ResolutionStatus, TransportMode,
};
