use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::quote::transport::Transport;
use crate::quote::{QuoteError, API_URL, TIMEOUT};

/// One-shot client for the random quote endpoint.
pub struct QuoteClient<T: Transport> {
    transport: T,
    url: String,
    timeout: Duration,
}

impl<T: Transport> QuoteClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            url: API_URL.to_string(),
            timeout: TIMEOUT,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch a single quote. No retry: the first failure is returned.
    pub fn fetch(&self) -> Result<String, QuoteError> {
        let start = Instant::now();
        let resp = self.transport.get(&self.url, self.timeout)?;

        if !(200..300).contains(&resp.status) {
            debug!("quote request failed - status={}", resp.status);
            return Err(QuoteError::Http(resp.status));
        }

        let quote = extract_message(&resp.body)?;
        info!(
            "Quote fetch completed - duration={:.2}s, chars={}",
            start.elapsed().as_secs_f32(),
            quote.chars().count()
        );
        Ok(quote)
    }
}

/// Pull the `message` string out of a JSON body.
pub fn extract_message(body: &str) -> Result<String, QuoteError> {
    let data: Value = serde_json::from_str(body).map_err(|e| {
        debug!("quote body is not JSON: {}", e);
        QuoteError::InvalidJson
    })?;

    match data.get("message") {
        Some(Value::String(message)) => Ok(message.clone()),
        _ => Err(QuoteError::UnexpectedFormat),
    }
}
