//! Stateless request builder for the learning service.
//!
//! # Design
//! `WaniKaniClient` holds only configuration. It turns an endpoint kind into
//! an `HttpRequest` carrying the static credential; executing the request is
//! the host's job. Response handling lives in `Session`, which owns the
//! mutable state a refresh needs.

use crate::config::ClientConfig;
use crate::http::{HttpRequest, AUTHORIZATION};
use crate::schema::Kind;

/// Stateless request builder for the WaniKani v2 API.
#[derive(Debug, Clone)]
pub struct WaniKaniClient {
    base_url: String,
    api_key: String,
    endpoints: Vec<Kind>,
}

impl WaniKaniClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            endpoints: config.endpoints,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoints a refresh fetches, in issue order.
    pub fn endpoints(&self) -> &[Kind] {
        &self.endpoints
    }

    pub fn url_for(&self, kind: Kind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    pub fn build_request(&self, kind: Kind) -> HttpRequest {
        HttpRequest {
            url: self.url_for(kind),
            headers: vec![(
                AUTHORIZATION.to_string(),
                format!("Token token={}", self.api_key),
            )],
        }
    }

    /// One request per configured endpoint.
    pub fn build_refresh_requests(&self) -> Vec<HttpRequest> {
        self.endpoints.iter().map(|kind| self.build_request(*kind)).collect()
    }
}
