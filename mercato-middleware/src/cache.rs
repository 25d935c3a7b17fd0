//! Never-evicting keyed stores with read-side freshness.

use std::hash::Hash;
use std::time::{Duration, Instant};

use mercato_types::{CacheClass, CacheConfig, Quote};

/// A cached value together with its capture instant.
///
/// Freshness is judged by the reader against a TTL; the entry itself
/// carries no expiry.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The cached value.
    pub value: V,
    /// When the value was stored.
    pub captured_at: Instant,
}

impl<V> Entry<V> {
    /// Age of this entry.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.captured_at.elapsed()
    }

    /// Whether this entry is still within the given freshness window.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() <= ttl
    }
}

/// A keyed store where writes are single-key overwrites and nothing is
/// ever removed by the library.
///
/// Last-write-wins: concurrent writers to the same key never merge, only
/// overwrite. There are no cross-key invariants, so the store is safe
/// for concurrent readers and writers without external locking.
pub struct TtlStore<K, V> {
    inner: moka::future::Cache<K, Entry<V>>,
}

impl<K, V> TtlStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Build an empty store. No TTL or capacity policy is installed on
    /// the backing cache; entries only disappear by being overwritten.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: moka::future::Cache::builder().build(),
        }
    }

    /// Look up the entry for `key`, fresh or not.
    pub async fn get(&self, key: &K) -> Option<Entry<V>> {
        self.inner.get(key).await
    }

    /// Store `value` under `key`, stamping the capture instant now.
    pub async fn put(&self, key: K, value: V) {
        self.inner
            .insert(
                key,
                Entry {
                    value,
                    captured_at: Instant::now(),
                },
            )
            .await;
    }
}

impl<K, V> Default for TtlStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of a cached quote: the logical quantity class plus the
/// instrument's canonical symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Logical quantity class, selecting the freshness window.
    pub class: CacheClass,
    /// Canonical instrument symbol.
    pub symbol: String,
}

impl CacheKey {
    /// Key for a live market quote of `symbol`.
    pub fn market_quote(symbol: impl Into<String>) -> Self {
        Self {
            class: CacheClass::MarketQuote,
            symbol: symbol.into(),
        }
    }
}

/// Cache of last successful quotes, one entry per (class, symbol).
pub struct QuoteCache {
    store: TtlStore<CacheKey, Quote>,
    cfg: CacheConfig,
}

impl QuoteCache {
    /// Build a quote cache with the given freshness windows.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        Self {
            store: TtlStore::new(),
            cfg,
        }
    }

    /// Look up the last successful quote for `key`, fresh or not.
    pub async fn get(&self, key: &CacheKey) -> Option<Entry<Quote>> {
        self.store.get(key).await
    }

    /// Record a successful quote, overwriting any previous entry.
    pub async fn put(&self, key: CacheKey, quote: Quote) {
        self.store.put(key, quote).await;
    }

    /// Whether `entry` is within the freshness window of its class.
    #[must_use]
    pub fn is_fresh(&self, key: &CacheKey, entry: &Entry<Quote>) -> bool {
        entry.is_fresh(self.cfg.ttl_for(key.class))
    }
}

/// Cache of fetched remote documents, keyed by URL.
pub struct DocumentCache {
    store: TtlStore<String, String>,
    ttl: Duration,
}

impl DocumentCache {
    /// Build a document cache using the reference-data freshness window.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        Self {
            store: TtlStore::new(),
            ttl: cfg.ttl_for(CacheClass::Reference),
        }
    }

    /// Look up the last fetched body for `url`, fresh or not.
    pub async fn get(&self, url: &str) -> Option<Entry<String>> {
        self.store.get(&url.to_string()).await
    }

    /// Record a fetched body, overwriting any previous entry.
    pub async fn put(&self, url: impl Into<String>, body: String) {
        self.store.put(url.into(), body).await;
    }

    /// Whether `entry` is within the reference freshness window.
    #[must_use]
    pub fn is_fresh(&self, entry: &Entry<String>) -> bool {
        entry.is_fresh(self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_types::{ProviderQuote, ResolutionStatus};

    fn quote(symbol: &str, price: f64) -> Quote {
        Quote::fresh(
            symbol,
            ProviderQuote {
                price,
                change: 0.5,
                change_percent: 0.1,
            },
        )
    }

    #[tokio::test]
    async fn last_write_wins() {
        let cache = QuoteCache::new(CacheConfig::default());
        let key = CacheKey::market_quote("AAPL");
        cache.put(key.clone(), quote("AAPL", 180.0)).await;
        cache.put(key.clone(), quote("AAPL", 181.5)).await;
        let entry = cache.get(&key).await.unwrap();
        assert_eq!(entry.value.price, 181.5);
    }

    #[tokio::test]
    async fn expired_entries_are_still_readable() {
        let cfg = CacheConfig {
            market_quote_ttl: Duration::ZERO,
            ..CacheConfig::default()
        };
        let cache = QuoteCache::new(cfg);
        let key = CacheKey::market_quote("GC=F");
        cache.put(key.clone(), quote("GC=F", 2400.0)).await;

        tokio::time::sleep(Duration::from_millis(5)).await;
        let entry = cache.get(&key).await.expect("entry must survive TTL expiry");
        assert!(!cache.is_fresh(&key, &entry));
        assert_eq!(entry.value.price, 2400.0);
        assert_eq!(entry.value.status, ResolutionStatus::Fresh);
    }

    #[tokio::test]
    async fn classes_have_independent_windows() {
        let cfg = CacheConfig {
            market_quote_ttl: Duration::ZERO,
            reference_ttl: Duration::from_secs(3600),
        };
        let cache = QuoteCache::new(cfg);
        let market = CacheKey::market_quote("^GSPC");
        let reference = CacheKey {
            class: CacheClass::Reference,
            symbol: "^GSPC".into(),
        };
        cache.put(market.clone(), quote("^GSPC", 5000.0)).await;
        cache.put(reference.clone(), quote("^GSPC", 5000.0)).await;

        tokio::time::sleep(Duration::from_millis(5)).await;
        let m = cache.get(&market).await.unwrap();
        let r = cache.get(&reference).await.unwrap();
        assert!(!cache.is_fresh(&market, &m));
        assert!(cache.is_fresh(&reference, &r));
    }

    #[tokio::test]
    async fn document_cache_roundtrip() {
        let docs = DocumentCache::new(CacheConfig::default());
        assert!(docs.get("https://feeds.example/rss").await.is_none());
        docs.put("https://feeds.example/rss", "<rss/>".into()).await;
        let entry = docs.get("https://feeds.example/rss").await.unwrap();
        assert!(docs.is_fresh(&entry));
        assert_eq!(entry.value, "<rss/>");
    }
}
