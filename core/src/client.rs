//! Stateless request builder and response parser for the "latest rates"
//! endpoints.
//!
//! # Design
//! `RatesClient` holds only the two base URLs. Each endpoint has a `build_*`
//! method producing an `HttpRequest`; both share `parse_latest`, which
//! accepts every response shape the upstreams are known to send:
//! `{"rates": {..}}`, `{"conversion_rates": {..}}`, or a bare code-to-number
//! object.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Endpoints;
use crate::currency::CurrencyCode;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::RateTable;

#[derive(Debug, Clone)]
pub struct RatesClient {
    primary_url: String,
    secondary_url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatestPayload {
    Wrapped { rates: Map<String, Value> },
    ConversionRates { conversion_rates: Map<String, Value> },
    Bare(Map<String, Value>),
}

impl LatestPayload {
    fn into_entries(self) -> Map<String, Value> {
        match self {
            LatestPayload::Wrapped { rates } => rates,
            LatestPayload::ConversionRates { conversion_rates } => conversion_rates,
            LatestPayload::Bare(map) => map,
        }
    }
}

impl RatesClient {
    pub fn new(endpoints: &Endpoints) -> Self {
        Self {
            primary_url: endpoints.primary.trim_end_matches('/').to_string(),
            secondary_url: endpoints.secondary.trim_end_matches('/').to_string(),
        }
    }

    /// `GET {primary}/{BASE}`
    pub fn build_primary(&self, base: CurrencyCode) -> HttpRequest {
        HttpRequest {
            url: format!("{}/{base}", self.primary_url),
            headers: accept_json(),
        }
    }

    /// `GET {secondary}?base={BASE}`
    pub fn build_secondary(&self, base: CurrencyCode) -> HttpRequest {
        HttpRequest {
            url: format!("{}?base={base}", self.secondary_url),
            headers: accept_json(),
        }
    }

    /// Turn a response from either endpoint into a table for `base`.
    ///
    /// Entries with malformed codes or non-numeric, non-positive values are
    /// skipped. A body left with no usable entries is an error.
    pub fn parse_latest(&self, base: CurrencyCode, response: HttpResponse) -> Result<RateTable, ApiError> {
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }

        let payload: LatestPayload = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;

        let mut table = RateTable::new(base);
        let mut skipped = 0usize;
        for (key, value) in payload.into_entries() {
            let accepted = match (CurrencyCode::parse(&key), value.as_f64()) {
                (Ok(code), Some(rate)) => table.insert(code, rate),
                _ => false,
            };
            if !accepted {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!(base = %base, skipped, "Ignored unusable rate entries");
        }
        if table.is_empty() {
            return Err(ApiError::EmptyRates { base });
        }
        Ok(table)
    }
}

fn accept_json() -> Vec<(String, String)> {
    vec![("accept".to_string(), "application/json".to_string())]
}
