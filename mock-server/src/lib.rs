use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tracing::debug;

/// base code -> (target code -> rate)
pub type Tables = BTreeMap<String, BTreeMap<String, f64>>;

/// What one simulated upstream serves.
#[derive(Clone, Debug, Default)]
pub struct EndpointConfig {
    pub tables: Tables,
    /// When set, every request is answered with this status.
    pub fail_with: Option<u16>,
}

impl EndpointConfig {
    pub fn failing(status: u16) -> Self {
        Self {
            tables: Tables::new(),
            fail_with: Some(status),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub primary: EndpointConfig,
    pub secondary: EndpointConfig,
}

impl Default for MockConfig {
    /// Primary serves USD, EUR and GBP; secondary serves USD only, with
    /// slightly different numbers so callers can tell the two apart.
    fn default() -> Self {
        let primary_usd = usd_rates(&[
            ("EUR", 0.92),
            ("GBP", 0.79),
            ("JPY", 149.5),
            ("AUD", 1.52),
            ("CAD", 1.36),
            ("CHF", 0.88),
            ("CNY", 7.24),
            ("INR", 83.1),
            ("TRY", 32.2),
        ]);
        let secondary_usd = usd_rates(&[("EUR", 0.95), ("GBP", 0.81), ("JPY", 151.0)]);
        Self {
            primary: EndpointConfig {
                tables: tables_from_usd(&primary_usd, &["USD", "EUR", "GBP"]),
                fail_with: None,
            },
            secondary: EndpointConfig {
                tables: tables_from_usd(&secondary_usd, &["USD"]),
                fail_with: None,
            },
        }
    }
}

/// A USD table from `(code, rate)` pairs, with USD itself at 1.
pub fn usd_rates(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    let mut rates: BTreeMap<String, f64> = pairs.iter().map(|(c, r)| (c.to_string(), *r)).collect();
    rates.insert("USD".to_string(), 1.0);
    rates
}

/// Derive one table per requested base from a USD table, so every served
/// table is mutually consistent.
pub fn tables_from_usd(usd: &BTreeMap<String, f64>, bases: &[&str]) -> Tables {
    bases
        .iter()
        .filter_map(|base| {
            let pivot = *usd.get(*base)?;
            let table = usd
                .iter()
                .map(|(code, rate)| (code.clone(), rate / pivot))
                .collect();
            Some((base.to_string(), table))
        })
        .collect()
}

type SharedConfig = Arc<MockConfig>;

#[derive(Deserialize)]
pub struct LatestQuery {
    pub base: Option<String>,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    Router::new()
        .route("/v4/latest/{base}", get(primary_latest))
        .route("/latest", get(secondary_latest))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

async fn primary_latest(State(config): State<SharedConfig>, Path(base): Path<String>) -> Response {
    let base = base.to_ascii_uppercase();
    debug!(base = %base, "primary latest");
    match lookup(&config.primary, &base) {
        Ok(rates) => Json(json!({
            "base": base,
            "date": "2024-01-01",
            "time_last_updated": 1704067200,
            "rates": rates,
        }))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn secondary_latest(State(config): State<SharedConfig>, Query(query): Query<LatestQuery>) -> Response {
    let base = query.base.unwrap_or_else(|| "USD".to_string()).to_ascii_uppercase();
    debug!(base = %base, "secondary latest");
    match lookup(&config.secondary, &base) {
        Ok(rates) => Json(json!({
            "success": true,
            "base": base,
            "timestamp": 1704067200,
            "rates": rates,
        }))
        .into_response(),
        Err(resp) => resp,
    }
}

fn lookup<'a>(endpoint: &'a EndpointConfig, base: &str) -> Result<&'a BTreeMap<String, f64>, Response> {
    if let Some(status) = endpoint.fail_with {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Err((status, Json(json!({ "error": "simulated failure" }))).into_response());
    }
    endpoint.tables.get(base).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unsupported base {base}") })),
        )
            .into_response()
    })
}
