//! Quote fetcher: one GET against the random quote API, no retry.

pub mod client;
pub mod transport;

use std::io::{self, Write};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub use client::QuoteClient;
pub use transport::{HttpResponse, ReqwestTransport, Transport};

/// Fixed endpoint returning `{"message": "..."}`.
pub const API_URL: &str = "https://api.whatdoestrumpthink.com/api/v1/quotes/random";

/// Upper bound on the whole request.
pub const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP error {0}")]
    Http(u16),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid JSON response")]
    InvalidJson,
    #[error("Unexpected API response format")]
    UnexpectedFormat,
}

/// Coarse failure classes callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteErrorKind {
    Network,
    Parse,
    Format,
}

impl QuoteError {
    pub fn kind(&self) -> QuoteErrorKind {
        match self {
            QuoteError::Http(_) | QuoteError::Network(_) => QuoteErrorKind::Network,
            QuoteError::InvalidJson => QuoteErrorKind::Parse,
            QuoteError::UnexpectedFormat => QuoteErrorKind::Format,
        }
    }
}

/// Fetch from the fixed endpoint with the production transport.
pub fn fetch() -> Result<String, QuoteError> {
    QuoteClient::new(ReqwestTransport::new()?).fetch()
}

/// Command body: quote on `out` and 0, or one `Error: ...` line on `err` and 1.
pub fn run<F, O, E>(fetch: F, out: &mut O, err: &mut E) -> io::Result<i32>
where
    F: FnOnce() -> Result<String, QuoteError>,
    O: Write,
    E: Write,
{
    match fetch() {
        Ok(quote) => {
            writeln!(out, "{}", quote)?;
            out.flush()?;
            Ok(0)
        }
        Err(e) => {
            debug!("quote fetch failed - kind={:?}", e.kind());
            writeln!(err, "Error: {}", e)?;
            err.flush()?;
            Ok(1)
        }
    }
}
