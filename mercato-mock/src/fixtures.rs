//! Static fixture quotes, loosely modeled on real levels so test output
//! reads plausibly.

use std::collections::HashMap;

use mercato_types::ProviderQuote;

pub(crate) fn defaults() -> HashMap<String, ProviderQuote> {
    let rows: &[(&str, f64, f64, f64)] = &[
        ("AAPL", 227.52, 1.13, 0.50),
        ("MSFT", 425.27, -2.11, -0.49),
        ("NVDA", 117.02, 3.05, 2.68),
        ("^DJI", 39512.84, 125.08, 0.32),
        ("^GSPC", 5346.99, 4.89, 0.09),
        ("DIA", 395.11, 1.24, 0.31),
        ("SPY", 534.66, 0.51, 0.10),
        ("GLD", 215.30, -0.84, -0.39),
        ("bitcoin", 97123.50, -2153.80, -2.17),
        ("ethereum", 3611.20, 44.95, 1.26),
        ("solana", 151.37, -0.92, -0.60),
        ("1.600519", 1712.80, -15.20, -0.88),
        ("600519", 1712.80, -15.20, -0.88),
    ];
    rows.iter()
        .map(|&(symbol, price, change, change_percent)| {
            (
                symbol.to_string(),
                ProviderQuote {
                    price,
                    change,
                    change_percent,
                },
            )
        })
        .collect()
}
