//! Per-provider rate-limit cooldown tracking.
//!
//! When a provider signals rate limiting (HTTP 429), the cascade puts it
//! on cooldown so sibling resolutions in the same window skip it instead
//! of piling further requests onto an already throttled origin.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use mercato_types::{CooldownConfig, ProviderKey};

/// Tracks cooldown deadlines per provider.
pub struct CooldownTracker {
    state: Mutex<HashMap<ProviderKey, Instant>>, // skip-until; absent means active
    duration: Duration,
}

impl CooldownTracker {
    /// Build a tracker with the configured default cooldown window.
    #[must_use]
    pub fn new(cfg: CooldownConfig) -> Self {
        Self {
            state: Mutex::new(HashMap::new()),
            duration: cfg.duration,
        }
    }

    /// Whether `provider` is currently on cooldown. Expired deadlines are
    /// cleared on read.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_cooling(&self, provider: ProviderKey) -> bool {
        let mut guard = self.state.lock().expect("mutex poisoned");
        let now = Instant::now();
        if let Some(until) = guard.get(&provider) {
            if now < *until {
                return true;
            }
            guard.remove(&provider);
        }
        false
    }

    /// Put `provider` on cooldown for the default window.
    pub fn trip(&self, provider: ProviderKey) {
        self.trip_for(provider, self.duration);
    }

    /// Put `provider` on cooldown for a specific window (e.g. from a
    /// `Retry-After` hint).
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn trip_for(&self, provider: ProviderKey, duration: Duration) {
        let mut guard = self.state.lock().expect("mutex poisoned");
        guard.insert(provider, Instant::now() + duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ProviderKey = ProviderKey::new("a");
    const B: ProviderKey = ProviderKey::new("b");

    #[test]
    fn trip_and_expiry() {
        let tracker = CooldownTracker::new(CooldownConfig {
            duration: Duration::from_secs(60),
        });
        assert!(!tracker.is_cooling(A));

        tracker.trip(A);
        assert!(tracker.is_cooling(A));
        assert!(!tracker.is_cooling(B));

        // Zero-length cooldown expires immediately.
        tracker.trip_for(B, Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(!tracker.is_cooling(B));
        assert!(tracker.is_cooling(A));
    }
}
