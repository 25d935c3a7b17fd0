//! Caching and rate-limit cooldown layers for the mercato resolver.
//!
//! The cache here deliberately never evicts: a TTL only decides whether
//! an entry may be served without revalidation. Expired entries stay put
//! as the cascade's fallback of last resort, so a total provider outage
//! degrades to stale data instead of no data.
#![warn(missing_docs)]

/// Never-evicting keyed stores with read-side freshness.
pub mod cache;
/// Per-provider rate-limit cooldown tracking.
pub mod cooldown;

pub use cache::{CacheKey, DocumentCache, Entry, QuoteCache, TtlStore};
pub use cooldown::CooldownTracker;
