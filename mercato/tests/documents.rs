use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mercato::{CacheConfig, Mercato, MercatoError, TransportMode};
use mercato_core::proxy::ProxyRouter;
use mercato_core::transport::{HttpTransport, TransportOutcome, TransportRequest};
use mercato_mock::MockConnector;

/// Succeeds for the first `good` sends, then reports transport failures.
struct FlakyTransport {
    good: usize,
    calls: AtomicUsize,
}

impl FlakyTransport {
    fn new(good: usize) -> Arc<Self> {
        Arc::new(Self {
            good,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpTransport for FlakyTransport {
    async fn send(&self, _req: TransportRequest) -> TransportOutcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.good {
            TransportOutcome::Success {
                body: format!("body-{n}"),
            }
        } else {
            TransportOutcome::Failure {
                cause: "connection reset".into(),
            }
        }
    }
}

fn build(transport: Arc<FlakyTransport>, cache: CacheConfig) -> Mercato {
    let router = Arc::new(
        ProxyRouter::new(transport, vec!["https://relay/?url=".into()]).unwrap(),
    );
    Mercato::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .router(router)
        .cache_config(cache)
        .build()
        .unwrap()
}

#[tokio::test]
async fn fresh_document_is_served_from_cache() {
    let transport = FlakyTransport::new(usize::MAX);
    let mercato = build(transport.clone(), CacheConfig::default());

    let a = mercato
        .fetch_document("https://feeds.example/rss", TransportMode::Direct)
        .await
        .unwrap();
    let b = mercato
        .fetch_document("https://feeds.example/rss", TransportMode::Direct)
        .await
        .unwrap();

    assert_eq!(a, "body-0");
    assert_eq!(b, "body-0");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn stale_document_is_served_on_upstream_failure() {
    let cache = CacheConfig {
        reference_ttl: Duration::ZERO,
        ..CacheConfig::default()
    };
    let transport = FlakyTransport::new(1);
    let mercato = build(transport.clone(), cache);

    let first = mercato
        .fetch_document("https://feeds.example/rss", TransportMode::Direct)
        .await
        .unwrap();
    assert_eq!(first, "body-0");

    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = mercato
        .fetch_document("https://feeds.example/rss", TransportMode::Direct)
        .await
        .unwrap();
    assert_eq!(second, "body-0", "last known-good body must be served");
}

#[tokio::test]
async fn failure_with_no_prior_body_surfaces_the_error() {
    let transport = FlakyTransport::new(0);
    let mercato = build(transport, CacheConfig::default());

    let err = mercato
        .fetch_document("https://feeds.example/rss", TransportMode::Direct)
        .await
        .unwrap_err();
    assert!(matches!(err, MercatoError::Transport { .. }));
}
