//! Normalized quotes and the resolution status attached to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a quote was obtained, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// Produced by a live provider call during this resolution.
    Fresh,
    /// A previously successful result served because every live source
    /// currently fails; `captured_at` reflects its original capture time.
    Stale,
    /// No live source succeeded and no prior result exists. Numeric fields
    /// hold the NaN sentinel.
    Unknown,
}

/// A display-ready, provider-agnostic quote.
///
/// Invariant: `Unknown` status implies `price`, `change` and
/// `change_percent` are `f64::NAN`, never a silent zero, so consumers can
/// distinguish "no market movement" from "no data available".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Canonical display symbol of the instrument this quote belongs to.
    pub symbol: String,
    /// Last price in the vendor's quote currency (USD for all built-in
    /// providers except Eastmoney, which quotes in CNY).
    #[serde(with = "nan_as_null")]
    pub price: f64,
    /// Absolute change versus the previous close.
    #[serde(with = "nan_as_null")]
    pub change: f64,
    /// Percent change versus the previous close.
    #[serde(with = "nan_as_null")]
    pub change_percent: f64,
    /// When the underlying data was captured from a provider.
    pub captured_at: DateTime<Utc>,
    /// Freshness of this result.
    pub status: ResolutionStatus,
}

impl Quote {
    /// Build a fresh quote from a normalized provider payload, captured now.
    #[must_use]
    pub fn fresh(symbol: impl Into<String>, payload: ProviderQuote) -> Self {
        Self {
            symbol: symbol.into(),
            price: payload.price,
            change: payload.change,
            change_percent: payload.change_percent,
            captured_at: Utc::now(),
            status: ResolutionStatus::Fresh,
        }
    }

    /// Build the "no data available" sentinel for a symbol.
    #[must_use]
    pub fn unknown(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: f64::NAN,
            change: f64::NAN,
            change_percent: f64::NAN,
            captured_at: Utc::now(),
            status: ResolutionStatus::Unknown,
        }
    }

    /// Re-tag this quote as stale, keeping its values and capture time.
    #[must_use]
    pub fn into_stale(mut self) -> Self {
        self.status = ResolutionStatus::Stale;
        self
    }

    /// True when the quote carries usable numbers (fresh or stale).
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.status != ResolutionStatus::Unknown
    }
}

/// The NaN sentinel has no JSON representation; encode it as `null` on the
/// wire and restore it on the way back in.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        if v.is_finite() {
            s.serialize_some(v)
        } else {
            s.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
    }
}

/// Normalized numeric payload produced by a provider's response parser.
///
/// Parsers return this (or an error); the orchestrator stamps symbol,
/// capture time and status when it promotes the payload to a [`Quote`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderQuote {
    /// Last price.
    pub price: f64,
    /// Absolute change versus the previous close.
    pub change: f64,
    /// Percent change versus the previous close.
    pub change_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_quote_carries_nan_sentinels() {
        let q = Quote::unknown("^DJI");
        assert_eq!(q.status, ResolutionStatus::Unknown);
        assert!(q.price.is_nan());
        assert!(q.change.is_nan());
        assert!(q.change_percent.is_nan());
        assert!(!q.has_data());
    }

    #[test]
    fn stale_retags_without_touching_values() {
        let fresh = Quote::fresh(
            "GLD",
            ProviderQuote {
                price: 212.5,
                change: -1.2,
                change_percent: -0.56,
            },
        );
        let captured = fresh.captured_at;
        let stale = fresh.into_stale();
        assert_eq!(stale.status, ResolutionStatus::Stale);
        assert_eq!(stale.price, 212.5);
        assert_eq!(stale.captured_at, captured);
        assert!(stale.has_data());
    }
}
