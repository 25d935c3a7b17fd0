//! Mercato-specific data transfer objects and configuration primitives.
//!
//! Everything callers and connectors exchange is defined here: logical
//! instruments, normalized quotes with an explicit resolution status,
//! typed provider identities, and the configuration structs consumed by
//! the orchestrator.
#![warn(missing_docs)]

mod config;
mod error;
mod instrument;
mod provider;
mod quote;

pub use config::{CacheClass, CacheConfig, CooldownConfig, ProviderPriority, ResolverConfig};
pub use error::MercatoError;
pub use instrument::{AssetClass, Instrument};
pub use provider::{ProviderCandidate, ProviderKey, TransportMode};
pub use quote::{ProviderQuote, Quote, ResolutionStatus};
