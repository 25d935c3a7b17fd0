//! Provider identity and per-candidate transport metadata.

/// Typed key for identifying providers in priority configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderKey(pub &'static str);

impl ProviderKey {
    /// Construct a new typed provider key from a static name.
    ///
    /// This is useful when configuring per-class or per-symbol priorities.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<ProviderKey> for &'static str {
    fn from(k: ProviderKey) -> Self {
        k.0
    }
}

impl std::fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// How a request to a provider reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum TransportMode {
    /// Issue the request straight at the target origin.
    Direct,
    /// Try a direct request first; fall back to the relay chain on failure.
    /// Used for origins that usually permit cross-origin access.
    PreferDirect,
    /// Always go through the relay chain. Used for origins that block
    /// direct browser-style access.
    #[default]
    Proxied,
}

/// One concrete way to resolve an instrument: a provider, the vendor
/// identifier that provider expects, and the transport mode to reach it.
///
/// Candidate lists are built by the symbol mapper at request time and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCandidate {
    /// Identity of the provider to call.
    pub provider: ProviderKey,
    /// The identifier this provider expects for the instrument.
    pub vendor_symbol: String,
    /// How the request reaches the network.
    pub mode: TransportMode,
}
