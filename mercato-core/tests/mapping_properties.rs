use std::collections::HashMap;

use mercato_core::mapping::{ProviderRules, SymbolMapper, VenueStyle};
use mercato_core::{Instrument, ProviderKey};
use proptest::prelude::*;

const VENUE_AWARE: ProviderKey = ProviderKey::new("venue-aware");
const GENERALIST: ProviderKey = ProviderKey::new("generalist");

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
    rules.insert(
        GENERALIST,
        ProviderRules::passthrough()
            .with_override("^DJI", "DIA")
            .with_override("GC=F", "GLD"),
    );
    SymbolMapper::validated(rules).unwrap()
}

proptest! {
    /// Same (instrument, provider) always yields the same identifier,
    /// with no I/O involved.
    #[test]
    fn mapping_is_deterministic(symbol in "[A-Z0-9^=.]{1,8}") {
        let m = mapper();
        let inst = Instrument::equity(symbol, "prop");
        for provider in [VENUE_AWARE, GENERALIST] {
            prop_assert_eq!(m.map(&inst, provider), m.map(&inst, provider));
        }
    }

    /// Every 6-digit code is either venue-qualified by its leading digit
    /// or rejected; nothing passes through unqualified on a venue-aware
    /// provider.
    #[test]
    fn mainland_codes_are_qualified_by_leading_digit(code in "[0-9]{6}") {
        let m = mapper();
        let inst = Instrument::equity(code.clone(), "prop");
        let mapped = m.map(&inst, VENUE_AWARE);
        match code.as_bytes()[0] {
            b'6' => prop_assert_eq!(mapped, Some(format!("1.{code}"))),
            b'0' | b'3' => prop_assert_eq!(mapped, Some(format!("0.{code}"))),
            _ => prop_assert_eq!(mapped, None),
        }
        // A generalist provider accepts the bare code unchanged.
        prop_assert_eq!(m.map(&inst, GENERALIST), Some(code));
    }

    /// Symbols with no applicable rule pass through verbatim on
    /// passthrough providers.
    #[test]
    fn passthrough_preserves_canonical_symbols(symbol in "[A-Z]{1,5}") {
        let m = mapper();
        let inst = Instrument::equity(symbol.clone(), "prop");
        prop_assert_eq!(m.map(&inst, GENERALIST), Some(symbol));
    }
}
