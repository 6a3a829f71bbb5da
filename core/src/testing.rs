//! In-memory transport for unit tests.

use std::collections::HashMap;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Answers requests from a fixed URL → response table and records every URL
/// it was asked for. Unknown URLs fail as if the connection was refused.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    routes: HashMap<String, (u16, String)>,
    requests: Vec<String>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, url: impl Into<String>, status: u16, body: &str) -> Self {
        self.routes.insert(url.into(), (status, body.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.push(request.url.clone());
        let (status, body) = self
            .routes
            .get(&request.url)
            .cloned()
            .ok_or_else(|| TransportError::new("connection refused"))?;
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
