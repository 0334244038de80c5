//! Error types

use std::time::Duration;
use thiserror::Error;

/// Reason a single probe trial failed.
///
/// Trials only report success or failure to their callers; this type
/// exists so the failure reason can be logged.
#[derive(Error, Debug)]
pub enum TrialError {
    /// The variant has no sub-protocol to bind
    #[error("no sub-protocol to probe with")]
    NoSubProtocol,

    /// The proxy URL was rejected or the client could not be built
    #[error("failed to build client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connect, TLS, DNS or proxy handshake failure
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
