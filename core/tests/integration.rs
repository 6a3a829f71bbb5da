//! Startup and conversion flows against the live mock server.
//!
//! Each test starts its own mock server on a random port with the failure
//! mode it needs, then drives the core over real HTTP using ureq.

use fxconv_core::{
    convert, load_initial_rates, resolve_quote, ConversionRequest, ConverterState, CurrencyCode, Derivation,
    Endpoints, HttpRequest, HttpResponse, RateOrigin, RatesClient, Transport, TransportError,
};
use mock_server::{EndpointConfig, MockConfig};

/// Executes requests with ureq, returning 4xx/5xx statuses as data.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        let mut response = builder.call().map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start a mock server and return its base URL.
fn spawn(config: MockConfig) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, config).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn client_for(base_url: &str) -> RatesClient {
    RatesClient::new(&Endpoints::new(
        format!("{base_url}/v4/latest"),
        format!("{base_url}/latest"),
    ))
}

#[test]
fn healthy_primary() {
    let base_url = spawn(MockConfig::default());
    let client = client_for(&base_url);
    let mut transport = UreqTransport::new();
    let mut state = ConverterState::new();

    let report = load_initial_rates(&mut state, &client, &mut transport);
    assert_eq!(report.usd_origin, RateOrigin::Primary);
    assert!(report.eur_loaded);
    assert!(report.warning.is_none());

    let request = ConversionRequest::parse("100", "USD", "EUR").unwrap();
    let conversion = convert(&mut state, &client, &mut transport, &request).unwrap();
    assert!((conversion.converted - 92.0).abs() < 1e-9);

    // GBP is not cached yet but the primary serves it.
    let quote = resolve_quote(&mut state, &client, &mut transport, CurrencyCode::GBP, CurrencyCode::USD).unwrap();
    assert_eq!(quote.derivation, Derivation::Direct);
    assert_eq!(state.cache.origin(CurrencyCode::GBP), Some(RateOrigin::Primary));
}

#[test]
fn primary_down_secondary_up() {
    let base_url = spawn(MockConfig {
        primary: EndpointConfig::failing(503),
        ..MockConfig::default()
    });
    let client = client_for(&base_url);
    let mut transport = UreqTransport::new();
    let mut state = ConverterState::new();

    let report = load_initial_rates(&mut state, &client, &mut transport);
    assert_eq!(report.usd_origin, RateOrigin::Secondary);
    assert!(!report.eur_loaded);
    assert!(report.warning.is_none());

    let usd = state.cache.get(CurrencyCode::USD).unwrap();
    assert_eq!(usd.get(CurrencyCode::EUR), Some(0.95));
}

#[test]
fn both_endpoints_down_uses_builtin_rates() {
    let base_url = spawn(MockConfig {
        primary: EndpointConfig::failing(500),
        secondary: EndpointConfig::failing(500),
    });
    let client = client_for(&base_url);
    let mut transport = UreqTransport::new();
    let mut state = ConverterState::new();

    let report = load_initial_rates(&mut state, &client, &mut transport);
    assert_eq!(report.usd_origin, RateOrigin::Fallback);
    assert!(report.warning.is_some());

    let quote = resolve_quote(&mut state, &client, &mut transport, CurrencyCode::USD, CurrencyCode::EUR).unwrap();
    assert_eq!(quote.rate, 0.85);
}

#[test]
fn unserved_base_pivots_through_usd() {
    let base_url = spawn(MockConfig::default());
    let client = client_for(&base_url);
    let mut transport = UreqTransport::new();
    let mut state = ConverterState::new();
    load_initial_rates(&mut state, &client, &mut transport);

    // The primary has no JPY table and answers 404.
    let quote = resolve_quote(&mut state, &client, &mut transport, CurrencyCode::JPY, CurrencyCode::EUR).unwrap();

    assert_eq!(quote.derivation, Derivation::CrossUsd);
    assert!((quote.rate - 0.92 / 149.5).abs() < 1e-12);
    assert!(!state.cache.contains(CurrencyCode::JPY));
}

#[test]
fn unreachable_host_falls_back() {
    // Bind and drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = client_for(&format!("http://{addr}"));
    let mut transport = UreqTransport::new();
    let mut state = ConverterState::new();

    let report = load_initial_rates(&mut state, &client, &mut transport);

    assert_eq!(report.usd_origin, RateOrigin::Fallback);
    assert!(!report.eur_loaded);
}
