//! Relay-chain routing over the transport layer.
//!
//! Some quote origins refuse direct browser-style access; requests to
//! them are re-issued through public relay endpoints that accept a
//! URL-encoded target and return its raw response verbatim. Relays are
//! tried in priority order, each attempt independent of the others.

use std::sync::Arc;

use tracing::{debug, warn};

use mercato_types::{MercatoError, TransportMode};

use crate::transport::{HttpTransport, TransportOutcome, TransportRequest};

/// Default relay endpoints, in priority order.
pub const DEFAULT_RELAYS: [&str; 2] = [
    "https://corsproxy.io/?url=",
    "https://api.allorigins.win/raw?url=",
];

/// Routes requests directly or through an ordered relay chain.
pub struct ProxyRouter {
    transport: Arc<dyn HttpTransport>,
    relays: Vec<String>,
}

impl std::fmt::Debug for ProxyRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyRouter")
            .field("relays", &self.relays)
            .finish_non_exhaustive()
    }
}

impl ProxyRouter {
    /// Build a router over `transport` with the given relay prefixes.
    ///
    /// A relay prefix is concatenated with the URL-encoded target, e.g.
    /// `https://corsproxy.io/?url=` + `https%3A%2F%2F...`.
    ///
    /// # Errors
    /// `InvalidConfig` when the relay list is empty or contains a blank
    /// prefix; a router without relays cannot honor `Proxied` candidates.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        relays: Vec<String>,
    ) -> Result<Self, MercatoError> {
        if relays.is_empty() {
            return Err(MercatoError::invalid_config(
                "proxy router requires at least one relay endpoint",
            ));
        }
        if relays.iter().any(|r| r.trim().is_empty()) {
            return Err(MercatoError::invalid_config(
                "relay endpoint prefixes must not be blank",
            ));
        }
        Ok(Self { transport, relays })
    }

    /// Build a router with the production default relay chain.
    ///
    /// # Panics
    /// Never panics; the default relay list is non-empty by construction.
    #[must_use]
    pub fn with_default_relays(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(
            transport,
            DEFAULT_RELAYS.iter().map(ToString::to_string).collect(),
        )
        .expect("default relay list is valid")
    }

    /// Send a request according to the candidate's transport mode.
    ///
    /// `Direct` goes straight to the origin. `PreferDirect` tries the
    /// origin first and falls back to the relay chain on any failure.
    /// `Proxied` only uses the relay chain. When every attempt fails the
    /// outcome is a `Failure` carrying the last relay's cause.
    pub async fn routed_send(
        &self,
        req: TransportRequest,
        mode: TransportMode,
    ) -> TransportOutcome {
        match mode {
            TransportMode::Direct => self.transport.send(req).await,
            TransportMode::PreferDirect => {
                let direct = self.transport.send(req.clone()).await;
                if direct.is_success() {
                    return direct;
                }
                warn!(url = req.url(), "direct request failed, trying relays");
                self.relay_send(req).await
            }
            // `Proxied` (the default) and any future transport modes go
            // straight through the relay chain.
            _ => self.relay_send(req).await,
        }
    }

    /// Fetch a remote document's raw body, serving the first successful
    /// attempt under the given transport mode.
    ///
    /// # Errors
    /// `Http` or `Transport` when no attempt produced a 2xx response.
    pub async fn fetch_document(
        &self,
        url: &str,
        mode: TransportMode,
    ) -> Result<String, MercatoError> {
        self.routed_send(TransportRequest::get(url), mode)
            .await
            .into_body()
    }

    async fn relay_send(&self, req: TransportRequest) -> TransportOutcome {
        let target = req.url().to_string();
        let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();

        let mut last_cause = String::from("no relay attempted");
        for (idx, relay) in self.relays.iter().enumerate() {
            let wrapped = req.clone().with_url(format!("{relay}{encoded}"));
            match self.transport.send(wrapped).await {
                out @ TransportOutcome::Success { .. } => {
                    debug!(relay = %relay, relay_index = idx, target = %target, "relay served request");
                    return out;
                }
                TransportOutcome::HttpError { status } => {
                    warn!(relay = %relay, status, "relay returned error status, trying next");
                    last_cause = format!("relay {relay} returned status {status}");
                }
                TransportOutcome::Failure { cause } => {
                    warn!(relay = %relay, %cause, "relay unreachable, trying next");
                    last_cause = format!("relay {relay} failed: {cause}");
                }
            }
        }

        TransportOutcome::Failure {
            cause: format!("all {} relays failed; last: {last_cause}", self.relays.len()),
        }
    }
}
