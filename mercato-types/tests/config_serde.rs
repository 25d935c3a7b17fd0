use std::time::Duration;

use mercato_types::{AssetClass, CacheClass, CacheConfig, CooldownConfig, Instrument, Quote};

#[test]
fn cache_config_roundtrips_through_json() {
    let cfg = CacheConfig {
        market_quote_ttl: Duration::from_secs(45),
        reference_ttl: Duration::from_secs(600),
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back: CacheConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
    assert_eq!(back.ttl_for(CacheClass::MarketQuote), Duration::from_secs(45));
    assert_eq!(back.ttl_for(CacheClass::Reference), Duration::from_secs(600));
}

#[test]
fn cooldown_config_roundtrips_through_json() {
    let cfg = CooldownConfig {
        duration: Duration::from_secs(90),
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back: CooldownConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn instrument_serializes_with_class_tag() {
    let inst = Instrument::index("^GSPC", "S&P 500");
    let json = serde_json::to_string(&inst).unwrap();
    assert!(json.contains("\"EquityIndex\""));
    let back: Instrument = serde_json::from_str(&json).unwrap();
    assert_eq!(back.symbol(), "^GSPC");
    assert_eq!(back.class(), AssetClass::EquityIndex);
}

#[test]
fn unknown_quote_survives_serde_with_nan() {
    // serde_json encodes NaN as null for f64; deserializing it back must
    // preserve the sentinel rather than turning it into zero.
    let q = Quote::unknown("CL=F");
    let json = serde_json::to_string(&q).unwrap();
    assert!(json.contains("null"));
    let back: Quote = serde_json::from_str(&json).unwrap();
    assert!(back.price.is_nan());
}
