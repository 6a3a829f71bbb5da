//! Verify request building and response parsing against the JSON test
//! vectors in `test-vectors/`.
//!
//! Each case names an endpoint and base, the expected request, a simulated
//! response, and either the expected table or the expected error variant.

use std::collections::BTreeMap;

use fxconv_core::{ApiError, CurrencyCode, Endpoints, HttpResponse, RatesClient};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> RatesClient {
    RatesClient::new(&Endpoints::new(
        format!("{BASE_URL}/v4/latest"),
        format!("{BASE_URL}/latest"),
    ))
}

fn error_name(err: &ApiError) -> &'static str {
    match err {
        ApiError::Transport(_) => "Transport",
        ApiError::HttpError { .. } => "HttpError",
        ApiError::DeserializationError(_) => "DeserializationError",
        ApiError::EmptyRates { .. } => "EmptyRates",
    }
}

#[test]
fn latest_test_vectors() {
    let raw = include_str!("../../test-vectors/latest.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let base = CurrencyCode::parse(case["base"].as_str().unwrap()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = match case["endpoint"].as_str().unwrap() {
            "primary" => c.build_primary(base),
            "secondary" => c.build_secondary(base),
            other => panic!("{name}: unknown endpoint {other}"),
        };
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["url"].as_str().unwrap()), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_latest(base, response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(error_name(&err), expected_error.as_str().unwrap(), "{name}: error variant");
        } else {
            let table = result.unwrap();
            assert_eq!(table.base(), base, "{name}: base");
            let expected: BTreeMap<String, f64> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            let actual: BTreeMap<String, f64> = table.iter().map(|(code, rate)| (code.to_string(), rate)).collect();
            assert_eq!(actual, expected, "{name}: parsed rates");
        }
    }
}
