use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the mercato workspace.
///
/// Every variant except `InvalidConfig` is recovered inside the provider
/// cascade by advancing to the next candidate; callers of the resolver
/// only ever observe a quote's resolution status. `InvalidConfig` marks a
/// configuration defect and is raised at build time, never at request time.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MercatoError {
    /// The request never produced an HTTP response (DNS, connect, timeout
    /// at the socket level, body read failure).
    #[error("transport failure: {cause}")]
    Transport {
        /// Human-readable cause from the HTTP stack.
        cause: String,
    },

    /// The origin answered with a non-2xx status.
    #[error("http status {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// A structurally valid response that means "no such instrument"
    /// (e.g. a provider's documented all-zero payload).
    #[error("semantic miss: {what}")]
    SemanticMiss {
        /// Description of what the provider could not serve.
        what: String,
    },

    /// The response body did not match the provider's documented shape.
    #[error("malformed response: {0}")]
    Validation(String),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
    },

    /// The provider is skipped while its rate-limit cooldown elapses.
    #[error("provider cooling down: {provider}")]
    Cooldown {
        /// Provider name under cooldown.
        provider: String,
    },

    /// The requested operation is not supported by the target provider.
    #[error("unsupported: {what}")]
    Unsupported {
        /// Description of what was requested.
        what: String,
    },

    /// Configuration defect detected at build/initialization time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// All candidates for a request failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<MercatoError>),
}

impl MercatoError {
    /// Helper: build a `Transport` error from any displayable cause.
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::Transport {
            cause: cause.into(),
        }
    }

    /// Helper: build an `Http` error for a status code.
    #[must_use]
    pub const fn http(status: u16) -> Self {
        Self::Http { status }
    }

    /// Helper: build a `SemanticMiss` for a description of the missing data.
    pub fn semantic_miss(what: impl Into<String>) -> Self {
        Self::SemanticMiss { what: what.into() }
    }

    /// Helper: build a `Validation` error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
        }
    }

    /// Helper: build a `Cooldown` error.
    pub fn cooldown(provider: impl Into<String>) -> Self {
        Self::Cooldown {
            provider: provider.into(),
        }
    }

    /// Helper: build an `Unsupported` error.
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported { what: what.into() }
    }

    /// Helper: build an `InvalidConfig` error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True when the failure indicates the provider is rate limiting us
    /// and should be put on cooldown.
    #[must_use]
    pub const fn is_rate_limit(&self) -> bool {
        matches!(self, Self::Http { status: 429 })
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
