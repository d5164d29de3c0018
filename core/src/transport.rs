//! Async transport boundary.
//!
//! The core never opens sockets itself. A `Transport` executes one
//! `HttpRequest` and reports either a response (any status) or a
//! `TransportError`. Connection pooling, TLS and retries are its business.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use reqwest::Client;

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    /// `Transport` backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new(client: Client) -> Self {
            Self { client }
        }
    }

    #[async_trait::async_trait]
    impl Transport for ReqwestTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = self.client.get(&request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::new(&request.url, e.to_string()))?;

            let url = response.url().to_string();
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
                .collect();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::new(&request.url, e.to_string()))?;

            Ok(HttpResponse {
                url,
                status,
                headers,
                body: body.to_vec(),
            })
        }
    }
}
