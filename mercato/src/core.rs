use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use mercato_core::Connector;
use mercato_core::mapping::SymbolMapper;
use mercato_core::proxy::ProxyRouter;
use mercato_core::transport::ReqwestTransport;
use mercato_middleware::{CooldownTracker, DocumentCache, QuoteCache};
use mercato_types::{
    AssetClass, CacheConfig, CooldownConfig, Instrument, MercatoError, ProviderCandidate,
    ProviderKey, ResolverConfig,
};

/// Orchestrator that resolves logical requests across registered providers.
pub struct Mercato {
    pub(crate) connectors: Vec<Arc<dyn Connector>>,
    pub(crate) mapper: SymbolMapper,
    pub(crate) cache: QuoteCache,
    pub(crate) documents: DocumentCache,
    pub(crate) cooldown: CooldownTracker,
    pub(crate) router: Arc<ProxyRouter>,
    pub(crate) cfg: ResolverConfig,
}

impl std::fmt::Debug for Mercato {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mercato")
            .field("connectors", &self.connectors.len())
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a `Mercato` orchestrator.
pub struct MercatoBuilder {
    connectors: Vec<Arc<dyn Connector>>,
    router: Option<Arc<ProxyRouter>>,
    cfg: ResolverConfig,
}

impl Default for MercatoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MercatoBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults are conservative: no priorities (registration order
    /// rules), 5 s provider timeout, no courtesy delay, 60 s market
    /// quote TTL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            router: None,
            cfg: ResolverConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the ordering of last resort when no
    /// priority rule matches a request.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn Connector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Use the given proxy router for document fetches. When omitted, a
    /// router over the default relay chain is built at `build` time.
    #[must_use]
    pub fn router(mut self, router: Arc<ProxyRouter>) -> Self {
        self.router = Some(router);
        self
    }

    /// Set preferred provider order for an asset class.
    ///
    /// Unlisted but capable providers remain eligible after the listed
    /// ones, preserving registration order.
    #[must_use]
    pub fn prefer_for_class(mut self, class: AssetClass, providers: &[ProviderKey]) -> Self {
        self.cfg.priority.per_class.insert(class, providers.to_vec());
        self
    }

    /// Set preferred provider order for a single canonical symbol.
    ///
    /// Symbol scope overrides any class-level preference.
    #[must_use]
    pub fn prefer_symbol(mut self, symbol: &str, providers: &[ProviderKey]) -> Self {
        self.cfg
            .priority
            .per_symbol
            .insert(symbol.to_string(), providers.to_vec());
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Stagger batch item launches by this delay, to stay polite with a
    /// shared-rate-limited provider. Scheduling nicety, not correctness.
    #[must_use]
    pub const fn courtesy_delay(mut self, delay: Duration) -> Self {
        self.cfg.courtesy_delay = Some(delay);
        self
    }

    /// Replace the cache freshness windows.
    #[must_use]
    pub const fn cache_config(mut self, cache: CacheConfig) -> Self {
        self.cfg.cache = cache;
        self
    }

    /// Replace the rate-limit cooldown configuration.
    #[must_use]
    pub const fn cooldown_config(mut self, cooldown: CooldownConfig) -> Self {
        self.cfg.cooldown = cooldown;
        self
    }

    /// Build the orchestrator, validating the configuration.
    ///
    /// # Errors
    /// `InvalidConfig` when no connectors are registered, when two
    /// connectors share a key, when a priority list references an
    /// unknown provider, or when a connector ships a malformed mapping
    /// table. Configuration defects fail here, never at request time.
    pub fn build(self) -> Result<Mercato, MercatoError> {
        if self.connectors.is_empty() {
            return Err(MercatoError::invalid_config(
                "no connectors registered; add at least one via with_connector(...)",
            ));
        }

        let mut known: HashSet<&'static str> = HashSet::new();
        for c in &self.connectors {
            if !known.insert(c.key().as_str()) {
                return Err(MercatoError::invalid_config(format!(
                    "duplicate connector key: {}",
                    c.key()
                )));
            }
        }

        let check_keys = |list: &[ProviderKey]| -> Result<(), MercatoError> {
            for key in list {
                if !known.contains(key.as_str()) {
                    return Err(MercatoError::invalid_config(format!(
                        "priority list references unknown provider: {key}"
                    )));
                }
            }
            Ok(())
        };
        for list in self.cfg.priority.per_class.values() {
            check_keys(list)?;
        }
        for list in self.cfg.priority.per_symbol.values() {
            check_keys(list)?;
        }

        let rules: HashMap<ProviderKey, _> = self
            .connectors
            .iter()
            .map(|c| (c.key(), c.mapping_rules()))
            .collect();
        let mapper = SymbolMapper::validated(rules)?;

        let router = self.router.unwrap_or_else(|| {
            Arc::new(ProxyRouter::with_default_relays(Arc::new(
                ReqwestTransport::new(),
            )))
        });

        Ok(Mercato {
            connectors: self.connectors,
            mapper,
            cache: QuoteCache::new(self.cfg.cache),
            documents: DocumentCache::new(self.cfg.cache),
            cooldown: CooldownTracker::new(self.cfg.cooldown),
            router,
            cfg: self.cfg,
        })
    }
}

impl Mercato {
    /// Start building a new `Mercato` instance.
    #[must_use]
    pub fn builder() -> MercatoBuilder {
        MercatoBuilder::new()
    }

    /// Registered connectors ordered for this instrument: priority rank
    /// first (symbol scope beats class scope), registration order as the
    /// stable tie-breaker.
    pub(crate) fn ordered(&self, inst: &Instrument) -> Vec<Arc<dyn Connector>> {
        let mut out: Vec<(usize, Arc<dyn Connector>)> =
            self.connectors.iter().cloned().enumerate().collect();

        if let Some(pref) = self.cfg.priority.resolve(inst.symbol(), inst.class()) {
            let pos: HashMap<&'static str, usize> = pref
                .iter()
                .enumerate()
                .map(|(i, k)| (k.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.key().as_str()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }

        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Build the candidate list for an instrument: capable providers in
    /// policy order, each with its mapped vendor identifier. Providers
    /// whose mapper declines the instrument are skipped entirely.
    pub(crate) fn candidates(
        &self,
        inst: &Instrument,
    ) -> Vec<(Arc<dyn Connector>, ProviderCandidate)> {
        self.ordered(inst)
            .into_iter()
            .filter(|c| c.supports_class(inst.class()))
            .filter_map(|c| {
                let vendor_symbol = self.mapper.map(inst, c.key())?;
                let candidate = ProviderCandidate {
                    provider: c.key(),
                    vendor_symbol,
                    mode: c.transport_mode(),
                };
                Some((c, candidate))
            })
            .collect()
    }
}
