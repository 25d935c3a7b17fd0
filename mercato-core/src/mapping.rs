//! Pure translation of logical instruments into vendor identifiers.
//!
//! Mapping is deterministic and performs no I/O, so candidate lists can
//! be asserted in tests without a network. Precedence, per provider:
//!
//! 1. the provider's static override table (index/commodity → ETF proxy,
//!    crypto ticker → vendor coin id);
//! 2. venue qualification of 6-digit mainland China codes by leading
//!    digit (`6` → Shanghai, `0`/`3` → Shenzhen);
//! 3. passthrough of the canonical symbol, when the provider accepts it.

use std::collections::HashMap;

use mercato_types::{Instrument, MercatoError, ProviderKey};

/// How a provider wants 6-digit mainland China codes qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenueStyle {
    /// No qualification; the bare code (or canonical symbol) is sent.
    #[default]
    Bare,
    /// Eastmoney-style secid prefix: `1.600519` (Shanghai) / `0.000001`
    /// (Shenzhen).
    SecidPrefix,
    /// Suffix style: `600519.SS` / `000001.SZ`.
    DotSuffix,
}

/// Mapping rules for one provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderRules {
    /// Canonical symbol → vendor identifier overrides.
    pub overrides: HashMap<String, String>,
    /// How 6-digit mainland codes are venue-qualified.
    pub venue_style: VenueStyle,
    /// Whether symbols with no applicable rule pass through unchanged.
    /// When false, such instruments are unsupported by this provider.
    pub passthrough: bool,
}

impl ProviderRules {
    /// Rules that pass every canonical symbol through unchanged.
    #[must_use]
    pub fn passthrough() -> Self {
        Self {
            overrides: HashMap::new(),
            venue_style: VenueStyle::Bare,
            passthrough: true,
        }
    }

    /// Add a static override entry.
    #[must_use]
    pub fn with_override(mut self, canonical: impl Into<String>, vendor: impl Into<String>) -> Self {
        self.overrides.insert(canonical.into(), vendor.into());
        self
    }
}

/// Maps `(instrument, provider)` pairs to vendor identifiers.
pub struct SymbolMapper {
    rules: HashMap<ProviderKey, ProviderRules>,
}

impl SymbolMapper {
    /// Build a validated mapper from per-provider rules.
    ///
    /// # Errors
    /// `InvalidConfig` when an override table contains a blank key or
    /// value; a malformed mapping table is a defect and fails at
    /// initialization, not at request time.
    pub fn validated(rules: HashMap<ProviderKey, ProviderRules>) -> Result<Self, MercatoError> {
        for (provider, r) in &rules {
            for (canonical, vendor) in &r.overrides {
                if canonical.trim().is_empty() || vendor.trim().is_empty() {
                    return Err(MercatoError::invalid_config(format!(
                        "blank entry in override table for provider {provider}"
                    )));
                }
            }
        }
        Ok(Self { rules })
    }

    /// Translate an instrument into the identifier `provider` expects.
    ///
    /// Returns `None` when the provider cannot serve the instrument at
    /// all; the cascade then skips this provider for the request.
    #[must_use]
    pub fn map(&self, instrument: &Instrument, provider: ProviderKey) -> Option<String> {
        let symbol = instrument.symbol();
        let Some(rules) = self.rules.get(&provider) else {
            // Unregistered providers accept canonical symbols as-is.
            return Some(symbol.to_string());
        };

        if let Some(vendor) = rules.overrides.get(symbol) {
            return Some(vendor.clone());
        }

        if is_mainland_code(symbol) {
            return qualify_mainland(symbol, rules.venue_style, rules.passthrough);
        }

        rules.passthrough.then(|| symbol.to_string())
    }
}

/// True for a 6-digit numeric mainland China equity code.
fn is_mainland_code(symbol: &str) -> bool {
    symbol.len() == 6 && symbol.bytes().all(|b| b.is_ascii_digit())
}

fn qualify_mainland(code: &str, style: VenueStyle, passthrough: bool) -> Option<String> {
    let leading = code.as_bytes()[0];
    match style {
        VenueStyle::Bare => passthrough.then(|| code.to_string()),
        VenueStyle::SecidPrefix => match leading {
            b'6' => Some(format!("1.{code}")),
            b'0' | b'3' => Some(format!("0.{code}")),
            _ => None,
        },
        VenueStyle::DotSuffix => match leading {
            b'6' => Some(format!("{code}.SS")),
            b'0' | b'3' => Some(format!("{code}.SZ")),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_types::Instrument;

    const VENUE_AWARE: ProviderKey = ProviderKey::new("venue-aware");
    const BARE: ProviderKey = ProviderKey::new("bare");
    const SUFFIXED: ProviderKey = ProviderKey::new("suffixed");

    fn mapper() -> SymbolMapper {
        let mut rules = HashMap::new();
        rules.insert(
            VENUE_AWARE,
            ProviderRules {
                venue_style: VenueStyle::SecidPrefix,
                passthrough: false,
                ..ProviderRules::default()
            },
        );
        rules.insert(BARE, ProviderRules::passthrough());
        rules.insert(
            SUFFIXED,
            ProviderRules {
                venue_style: VenueStyle::DotSuffix,
                passthrough: true,
                ..ProviderRules::default()
            },
        );
        SymbolMapper::validated(rules).unwrap()
    }

    #[test]
    fn override_takes_precedence() {
        let mut rules = HashMap::new();
        rules.insert(
            BARE,
            ProviderRules::passthrough().with_override("^DJI", "DIA"),
        );
        let m = SymbolMapper::validated(rules).unwrap();
        let dji = Instrument::index("^DJI", "Dow Jones");
        assert_eq!(m.map(&dji, BARE).as_deref(), Some("DIA"));
    }

    #[test]
    fn shanghai_code_gets_primary_venue() {
        let m = mapper();
        let moutai = Instrument::equity("600519", "Kweichow Moutai");
        assert_eq!(m.map(&moutai, VENUE_AWARE).as_deref(), Some("1.600519"));
        assert_eq!(m.map(&moutai, SUFFIXED).as_deref(), Some("600519.SS"));
        // A bare-code provider receives the unqualified code.
        assert_eq!(m.map(&moutai, BARE).as_deref(), Some("600519"));
    }

    #[test]
    fn shenzhen_codes_get_secondary_venue() {
        let m = mapper();
        for code in ["000001", "300750"] {
            let inst = Instrument::equity(code, "test");
            assert_eq!(
                m.map(&inst, VENUE_AWARE),
                Some(format!("0.{code}")),
                "code {code}"
            );
            assert_eq!(m.map(&inst, SUFFIXED), Some(format!("{code}.SZ")));
        }
    }

    #[test]
    fn unknown_leading_digit_is_unsupported_for_venue_aware() {
        let m = mapper();
        let inst = Instrument::equity("900001", "B-share");
        assert_eq!(m.map(&inst, VENUE_AWARE), None);
        assert_eq!(m.map(&inst, SUFFIXED), None);
    }

    #[test]
    fn non_passthrough_provider_rejects_foreign_symbols() {
        let m = mapper();
        let aapl = Instrument::equity("AAPL", "Apple");
        assert_eq!(m.map(&aapl, VENUE_AWARE), None);
        assert_eq!(m.map(&aapl, BARE).as_deref(), Some("AAPL"));
    }

    #[test]
    fn blank_override_is_a_config_defect() {
        let mut rules = HashMap::new();
        rules.insert(BARE, ProviderRules::passthrough().with_override("GC=F", "  "));
        assert!(matches!(
            SymbolMapper::validated(rules),
            Err(MercatoError::InvalidConfig(_))
        ));
    }
}
