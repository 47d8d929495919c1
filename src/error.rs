//! Unified error types for the contribution proxy.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Upstream GraphQL error.
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to the GitHub GraphQL API.
///
/// The `Display` text is what clients see in the `error` field of a 500
/// response, so it stays close to what GitHub reported.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No bearer token configured.
    #[error("Missing GITHUB_TOKEN secret")]
    MissingCredential,

    /// Upstream answered with a non-success status.
    #[error("GitHub API error: {} {body}", status.as_u16())]
    Http {
        /// Status returned by GitHub.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// Upstream answered 2xx but the body carried GraphQL `errors`.
    #[error("GitHub API errors: {0}")]
    GraphQl(String),

    /// Connection, TLS or body decoding failure.
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose `data` did not have the expected shape.
    #[error("unexpected GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Year outside the representable calendar range.
    #[error("invalid year: {0}")]
    InvalidYear(i32),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ProxyError>;
