//! Single-request HTTP transport.
//!
//! The transport issues exactly one HTTP exchange and classifies the
//! result. Retries, relay fallback, and body validation all live above
//! this layer.

use async_trait::async_trait;

use mercato_types::MercatoError;

/// Browser-like user agent; some quote origins reject default client UAs.
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A single HTTP exchange, fully described.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    url: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl TransportRequest {
    /// A GET request for the given URL.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A POST request carrying a JSON body.
    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// Attach a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the target URL, keeping headers and body.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// The target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Classified outcome of a single HTTP exchange.
///
/// All failure shapes are values; the transport never returns `Err`.
#[derive(Debug, Clone)]
pub enum TransportOutcome {
    /// 2xx response with its raw body. Structural validation of the body
    /// is the caller's job (provider-specific semantic misses are not
    /// transport successes).
    Success {
        /// The raw response body.
        body: String,
    },
    /// The origin answered with a non-2xx status.
    HttpError {
        /// The HTTP status code.
        status: u16,
    },
    /// No HTTP response was obtained (DNS, connect, read failure).
    Failure {
        /// Human-readable cause.
        cause: String,
    },
}

impl TransportOutcome {
    /// True for a 2xx outcome.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Convert into the response body, mapping failures to [`MercatoError`].
    ///
    /// # Errors
    /// `Http` for non-2xx outcomes, `Transport` when no response was
    /// obtained.
    pub fn into_body(self) -> Result<String, MercatoError> {
        match self {
            Self::Success { body } => Ok(body),
            Self::HttpError { status } => Err(MercatoError::http(status)),
            Self::Failure { cause } => Err(MercatoError::Transport { cause }),
        }
    }
}

/// The transport seam: one request in, one classified outcome out.
///
/// Implemented by [`ReqwestTransport`] in production and by in-memory
/// fakes in tests, so everything above it can be exercised without a
/// network.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue the request and classify what happened.
    async fn send(&self, req: TransportRequest) -> TransportOutcome;
}

/// Production transport backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the shared client with a desktop user agent.
    ///
    /// # Panics
    /// Panics if building the underlying client fails, which is unexpected
    /// in normal environments (invalid TLS backend configuration).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(DESKTOP_USER_AGENT)
            .build()
            .expect("Failed to build reqwest client");
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, req: TransportRequest) -> TransportOutcome {
        let mut builder = match req.body {
            None => self.client.get(&req.url),
            Some(body) => self
                .client
                .post(&req.url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body),
        };
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match builder.send().await {
            Ok(resp) => {
                let status = resp.status();
                if !status.is_success() {
                    return TransportOutcome::HttpError {
                        status: status.as_u16(),
                    };
                }
                match resp.text().await {
                    Ok(body) => TransportOutcome::Success { body },
                    Err(e) => TransportOutcome::Failure {
                        cause: e.to_string(),
                    },
                }
            }
            Err(e) => TransportOutcome::Failure {
                cause: e.to_string(),
            },
        }
    }
}
