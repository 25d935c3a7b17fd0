//! The provider cascade: Try(i) over the candidate list, then the cache.

use tracing::{debug, error, warn};

use mercato_middleware::CacheKey;
use mercato_types::{Instrument, MercatoError, ProviderQuote, Quote};

use crate::core::Mercato;

impl Mercato {
    /// Resolve a quote for one instrument.
    ///
    /// State machine per call:
    /// - a fresh cache hit returns immediately, issuing zero network
    ///   calls;
    /// - otherwise each candidate is tried in order, any classified
    ///   failure advancing to the next; the first structurally valid,
    ///   semantically present response wins and is cached;
    /// - when every candidate has failed, the last known-good quote is
    ///   served marked stale; with no prior success the `Unknown`
    ///   sentinel is returned.
    ///
    /// This method never fails: every provider error is recovered here,
    /// and the caller observes only the quote's resolution status.
    pub async fn resolve_quote(&self, inst: &Instrument) -> Quote {
        let key = CacheKey::market_quote(inst.symbol());

        if let Some(entry) = self.cache.get(&key).await
            && self.cache.is_fresh(&key, &entry)
        {
            debug!(symbol = inst.symbol(), "serving fresh cached quote");
            return entry.value;
        }

        let candidates = self.candidates(inst);
        if candidates.is_empty() {
            // A request no registered provider can serve. The connector
            // set is validated at build time, so this depends only on
            // the instrument mix; degrade to the sentinel.
            error!(
                symbol = inst.symbol(),
                class = ?inst.class(),
                "no provider candidates for instrument"
            );
            return self.exhausted(&key, inst).await;
        }

        let mut failures: Vec<MercatoError> = Vec::new();
        for (connector, candidate) in candidates {
            if self.cooldown.is_cooling(candidate.provider) {
                debug!(provider = %candidate.provider, "provider on cooldown, skipping");
                failures.push(MercatoError::cooldown(candidate.provider.as_str()));
                continue;
            }
            let Some(source) = connector.as_quote_source() else {
                failures.push(MercatoError::unsupported(format!(
                    "quote via {}",
                    candidate.provider
                )));
                continue;
            };

            match self
                .provider_call_with_timeout(
                    candidate.provider.as_str(),
                    source.quote(&candidate.vendor_symbol),
                )
                .await
            {
                Ok(payload) => {
                    let quote = Quote::fresh(inst.symbol(), payload);
                    self.cache.put(key.clone(), quote.clone()).await;
                    debug!(
                        symbol = inst.symbol(),
                        provider = %candidate.provider,
                        price = payload.price,
                        "quote resolved"
                    );
                    return quote;
                }
                Err(e) => {
                    if e.is_rate_limit() {
                        warn!(provider = %candidate.provider, "provider rate limited, cooling down");
                        self.cooldown.trip(candidate.provider);
                    } else {
                        warn!(
                            symbol = inst.symbol(),
                            provider = %candidate.provider,
                            error = %e,
                            "candidate failed, advancing"
                        );
                    }
                    failures.push(e);
                }
            }
        }

        debug!(
            symbol = inst.symbol(),
            failures = failures.len(),
            "cascade exhausted"
        );
        self.exhausted(&key, inst).await
    }

    /// All candidates failed: last known-good as stale, else the sentinel.
    async fn exhausted(&self, key: &CacheKey, inst: &Instrument) -> Quote {
        if let Some(entry) = self.cache.get(key).await {
            warn!(
                symbol = inst.symbol(),
                age_secs = entry.age().as_secs(),
                "serving stale quote after cascade exhaustion"
            );
            return entry.value.into_stale();
        }
        Quote::unknown(inst.symbol())
    }

    /// Wrap a provider future with the configured timeout, mapping the
    /// elapsed case to a `ProviderTimeout` the cascade can classify.
    async fn provider_call_with_timeout<Fut>(
        &self,
        provider: &str,
        fut: Fut,
    ) -> Result<ProviderQuote, MercatoError>
    where
        Fut: core::future::Future<Output = Result<ProviderQuote, MercatoError>>,
    {
        (tokio::time::timeout(self.cfg.provider_timeout, fut).await)
            .unwrap_or_else(|_| Err(MercatoError::provider_timeout(provider)))
    }
}
