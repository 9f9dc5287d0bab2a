//! Micro utopia: a random micro-utopia text generator, plus a one-shot
//! quote fetcher.
//!
//! The generator draws one entry from each of a set of fixed French string
//! pools, asks three pointed questions about one of the drawn ideas, and
//! renders the result as wrapped text.

pub mod core;
pub mod logging;
pub mod quote;
pub mod schema;
