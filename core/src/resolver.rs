//! The rate resolver: startup loading, lazy per-base fetching, and the
//! direct / reciprocal / USD-pivot lookup chain.
//!
//! # Design
//! All state lives in `ConverterState`, which callers own and pass in by
//! `&mut`. The functions here never touch the network themselves; they go
//! through the host's `Transport`. Because the state is borrowed mutably for
//! the whole operation, two resolutions can never interleave and a slow
//! response cannot overwrite a newer one.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CachedTable, RateCache};
use crate::client::RatesClient;
use crate::currency::CurrencyCode;
use crate::error::{ApiError, RateError};
use crate::fallback::fallback_usd_table;
use crate::http::{HttpRequest, Transport};
use crate::types::{Derivation, RateOrigin, RateQuote, RateTable};

/// Everything the converter remembers between user actions.
#[derive(Debug, Clone, Default)]
pub struct ConverterState {
    pub cache: RateCache,
    pub startup: Option<StartupReport>,
}

impl ConverterState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of `load_initial_rates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupReport {
    pub usd_origin: RateOrigin,
    pub eur_loaded: bool,
    /// Set when live rates could not be loaded and built-in rates are in use.
    pub warning: Option<String>,
}

/// Warm the cache with USD (and, opportunistically, EUR) rates.
///
/// USD is tried on the primary endpoint, then the secondary; if both fail the
/// built-in table is cached and a warning is reported. A failed EUR fetch is
/// only logged. This never fails.
pub fn load_initial_rates<T: Transport + ?Sized>(
    state: &mut ConverterState,
    client: &RatesClient,
    transport: &mut T,
) -> StartupReport {
    let usd = CurrencyCode::USD;
    let mut warning = None;

    let usd_origin = match fetch(client, transport, client.build_primary(usd), usd) {
        Ok(table) => {
            state.cache.insert(table, RateOrigin::Primary);
            RateOrigin::Primary
        }
        Err(primary_err) => {
            warn!(base = %usd, error = %primary_err, "Primary endpoint failed, trying secondary");
            match fetch(client, transport, client.build_secondary(usd), usd) {
                Ok(table) => {
                    state.cache.insert(table, RateOrigin::Secondary);
                    RateOrigin::Secondary
                }
                Err(secondary_err) => {
                    warn!(base = %usd, error = %secondary_err, "Secondary endpoint failed");
                    info!("Using built-in USD rates");
                    state.cache.insert(fallback_usd_table(), RateOrigin::Fallback);
                    warning = Some(format!(
                        "Live exchange rates are unavailable, using built-in rates ({secondary_err})"
                    ));
                    RateOrigin::Fallback
                }
            }
        }
    };

    let eur = CurrencyCode::EUR;
    let eur_loaded = match fetch(client, transport, client.build_primary(eur), eur) {
        Ok(table) => {
            state.cache.insert(table, RateOrigin::Primary);
            true
        }
        Err(e) => {
            warn!(base = %eur, error = %e, "Could not preload rates");
            false
        }
    };

    let report = StartupReport {
        usd_origin,
        eur_loaded,
        warning,
    };
    state.startup = Some(report.clone());
    report
}

/// Multiplier such that `amount_in_from * rate = amount_in_to`.
pub fn resolve_rate<T: Transport + ?Sized>(
    state: &mut ConverterState,
    client: &RatesClient,
    transport: &mut T,
    from: CurrencyCode,
    to: CurrencyCode,
) -> Result<f64, RateError> {
    resolve_quote(state, client, transport, from, to).map(|quote| quote.rate)
}

/// Like `resolve_rate`, but also reports how the rate was derived.
///
/// A table for `from` is fetched from the primary endpoint on a cache miss.
/// If that fails the rate is pivoted through the cached USD table.
pub fn resolve_quote<T: Transport + ?Sized>(
    state: &mut ConverterState,
    client: &RatesClient,
    transport: &mut T,
    from: CurrencyCode,
    to: CurrencyCode,
) -> Result<RateQuote, RateError> {
    if from == to {
        return Ok(RateQuote::identity());
    }

    if state.cache.contains(from) {
        debug!(base = %from, "Cache hit");
    } else {
        debug!(base = %from, "Cache miss");
        match fetch(client, transport, client.build_primary(from), from) {
            Ok(table) => {
                state.cache.insert(table, RateOrigin::Primary);
            }
            Err(e) => {
                warn!(base = %from, error = %e, "Fetch failed, pivoting through USD");
                let Some(usd) = state.cache.get(CurrencyCode::USD) else {
                    return Err(RateError::NoPivotTable { from, source: e });
                };
                return cross_rate(usd, from, to)
                    .map(|rate| RateQuote {
                        rate,
                        derivation: Derivation::CrossUsd,
                    })
                    .ok_or(RateError::MissingRate { from, to });
            }
        }
    }

    lookup_cached(&state.cache, from, to).ok_or(RateError::MissingRate { from, to })
}

/// Direct lookup in `from`'s table, falling back to the reciprocal of
/// `to`'s table entry for `from`.
pub fn lookup_cached(cache: &RateCache, from: CurrencyCode, to: CurrencyCode) -> Option<RateQuote> {
    if from == to {
        return Some(RateQuote::identity());
    }
    if let Some(rate) = cache.get(from).and_then(|table| table.get(to)) {
        return Some(RateQuote {
            rate,
            derivation: Derivation::Direct,
        });
    }
    let reverse = cache.get(to).and_then(|table| table.get(from))?;
    // Upstream quotes are not exactly reciprocal.
    debug!(from = %from, to = %to, "Deriving rate from reciprocal");
    Some(RateQuote {
        rate: 1.0 / reverse,
        derivation: Derivation::Inverse,
    })
}

/// The cached table a quote for `from -> to` was read from. `None` for
/// identity quotes.
pub fn source_entry<'a>(
    cache: &'a RateCache,
    quote: &RateQuote,
    from: CurrencyCode,
    to: CurrencyCode,
) -> Option<&'a CachedTable> {
    match quote.derivation {
        Derivation::Identity => None,
        Derivation::Direct => cache.entry(from),
        Derivation::Inverse => cache.entry(to),
        Derivation::CrossUsd => cache.entry(CurrencyCode::USD),
    }
}

/// `usd[to] / usd[from]`.
pub fn cross_rate(usd: &RateTable, from: CurrencyCode, to: CurrencyCode) -> Option<f64> {
    Some(usd.get(to)? / usd.get(from)?)
}

fn fetch<T: Transport + ?Sized>(
    client: &RatesClient,
    transport: &mut T,
    request: HttpRequest,
    base: CurrencyCode,
) -> Result<RateTable, ApiError> {
    debug!(url = %request.url, "Fetching rates");
    let response = transport.execute(&request)?;
    client.parse_latest(base, response)
}
