//! Built-in USD rates used when no upstream endpoint answers at startup.

use crate::currency::CurrencyCode;
use crate::types::RateTable;

const FALLBACK_USD_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.85),
    ("GBP", 0.73),
    ("JPY", 110.0),
    ("AUD", 1.35),
    ("CAD", 1.25),
    ("CHF", 0.92),
    ("CNY", 6.45),
    ("INR", 74.5),
    ("TRY", 8.5),
];

pub fn fallback_usd_table() -> RateTable {
    RateTable::from_pairs(
        CurrencyCode::USD,
        FALLBACK_USD_RATES
            .iter()
            .filter_map(|(code, rate)| CurrencyCode::parse(code).ok().map(|c| (c, *rate))),
    )
}
