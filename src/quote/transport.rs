use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::quote::QuoteError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// A single blocking GET. Implementations report connection-level failures
/// as `QuoteError::Network` and leave status handling to the caller.
pub trait Transport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, QuoteError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, QuoteError> {
        (**self).get(url, timeout)
    }
}

/// Production transport backed by `reqwest::blocking`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, QuoteError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuoteError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, QuoteError> {
        debug!("GET {} (timeout={:?})", url, timeout);

        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| QuoteError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
