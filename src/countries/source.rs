use std::fmt;

use async_trait::async_trait;

use super::types::Country;

/// Errors that can occur while talking to the country data source.
/// None of them are retried; each ends the current load.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// The named country does not exist upstream.
    NotFound(String),
    /// Failed to decode the response body.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::NotFound(name) => write!(f, "country not found: {name}"),
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Read-only access to country records.
///
/// The REST implementation lives in [`super::rest`]; tests substitute an
/// in-memory source.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source (for logging).
    fn name(&self) -> &str;

    /// Every country, in upstream order.
    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError>;

    /// Countries whose full name matches `name` exactly (case-insensitive).
    /// A non-success status is reported as [`SourceError::NotFound`].
    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>, SourceError>;

    /// Countries for the given cca3 codes.
    async fn fetch_by_codes(&self, codes: &[String]) -> Result<Vec<Country>, SourceError>;
}
