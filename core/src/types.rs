//! Rate tables and the values the resolver hands back.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyCode;

/// "1 unit of `base` = `rates[code]` units of `code`".
///
/// Every stored rate is finite and strictly positive; `insert` drops anything
/// else so lookups never hand back NaN or a zero divisor. Deserialization
/// goes through `insert` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRateTable")]
pub struct RateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
}

#[derive(Deserialize)]
struct RawRateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
}

impl From<RawRateTable> for RateTable {
    fn from(raw: RawRateTable) -> Self {
        RateTable::from_pairs(raw.base, raw.rates)
    }
}

impl RateTable {
    pub fn new(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: BTreeMap::new(),
        }
    }

    pub fn from_pairs(base: CurrencyCode, pairs: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        let mut table = Self::new(base);
        for (code, rate) in pairs {
            table.insert(code, rate);
        }
        table
    }

    /// Insert a rate, returning `false` if it was rejected as unusable.
    pub fn insert(&mut self, code: CurrencyCode, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        self.rates.insert(code, rate);
        true
    }

    pub fn base(&self) -> CurrencyCode {
        self.base
    }

    /// Rate to `code`. The base itself is always 1 even if upstream omitted it.
    pub fn get(&self, code: CurrencyCode) -> Option<f64> {
        match self.rates.get(&code) {
            Some(rate) => Some(*rate),
            None if code == self.base => Some(1.0),
            None => None,
        }
    }

    pub fn contains(&self, code: CurrencyCode) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, f64)> + '_ {
        self.rates.iter().map(|(code, rate)| (*code, *rate))
    }
}

/// Where a cached table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateOrigin {
    Primary,
    Secondary,
    Fallback,
}

impl fmt::Display for RateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RateOrigin::Primary => "primary",
            RateOrigin::Secondary => "secondary",
            RateOrigin::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// How a rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// Same currency on both sides.
    Identity,
    /// `table[from][to]`.
    Direct,
    /// `1 / table[to][from]`. Real quotes are not exactly reciprocal, so this
    /// is an approximation.
    Inverse,
    /// `table[USD][to] / table[USD][from]`.
    CrossUsd,
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Derivation::Identity => "identity",
            Derivation::Direct => "direct",
            Derivation::Inverse => "inverse",
            Derivation::CrossUsd => "cross via USD",
        };
        f.write_str(s)
    }
}

/// A resolved multiplier: `amount_in_from * rate = amount_in_to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub rate: f64,
    pub derivation: Derivation,
}

impl RateQuote {
    pub fn identity() -> Self {
        Self {
            rate: 1.0,
            derivation: Derivation::Identity,
        }
    }
}
