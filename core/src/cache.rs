//! Per-base rate table cache.
//!
//! Entries live for the whole session and are never invalidated; a later
//! fetch for the same base replaces the earlier table.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::currency::CurrencyCode;
use crate::types::{RateOrigin, RateTable};

#[derive(Debug, Clone, PartialEq)]
pub struct CachedTable {
    pub table: RateTable,
    pub origin: RateOrigin,
    /// When this table entered the cache.
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct RateCache {
    tables: HashMap<CurrencyCode, CachedTable>,
}

impl RateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `table` under its own base, returning whatever it replaced.
    pub fn insert(&mut self, table: RateTable, origin: RateOrigin) -> Option<CachedTable> {
        let base = table.base();
        debug!(base = %base, origin = %origin, entries = table.len(), "Caching rate table");
        let entry = CachedTable {
            table,
            origin,
            fetched_at: Utc::now(),
        };
        self.tables.insert(base, entry)
    }

    pub fn get(&self, base: CurrencyCode) -> Option<&RateTable> {
        self.tables.get(&base).map(|entry| &entry.table)
    }

    pub fn entry(&self, base: CurrencyCode) -> Option<&CachedTable> {
        self.tables.get(&base)
    }

    pub fn origin(&self, base: CurrencyCode) -> Option<RateOrigin> {
        self.tables.get(&base).map(|entry| entry.origin)
    }

    pub fn contains(&self, base: CurrencyCode) -> bool {
        self.tables.contains_key(&base)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_insert_wins() {
        let mut cache = RateCache::new();
        cache.insert(
            RateTable::from_pairs(CurrencyCode::USD, [(CurrencyCode::EUR, 0.85)]),
            RateOrigin::Fallback,
        );
        let previous = cache
            .insert(
                RateTable::from_pairs(CurrencyCode::USD, [(CurrencyCode::EUR, 0.92)]),
                RateOrigin::Primary,
            )
            .unwrap();

        assert_eq!(previous.origin, RateOrigin::Fallback);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.origin(CurrencyCode::USD), Some(RateOrigin::Primary));
        assert_eq!(cache.get(CurrencyCode::USD).unwrap().get(CurrencyCode::EUR), Some(0.92));
    }

    #[test]
    fn miss_on_unknown_base() {
        let cache = RateCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(CurrencyCode::JPY).is_none());
        assert!(!cache.contains(CurrencyCode::JPY));
    }

    #[test]
    fn entry_records_fetch_time() {
        let before = Utc::now();
        let mut cache = RateCache::new();
        cache.insert(RateTable::new(CurrencyCode::EUR), RateOrigin::Secondary);
        let entry = cache.entry(CurrencyCode::EUR).unwrap();

        assert_eq!(entry.origin, RateOrigin::Secondary);
        assert!(entry.fetched_at >= before);
        assert!(entry.fetched_at <= Utc::now());
        assert!(cache.entry(CurrencyCode::USD).is_none());
    }
}
