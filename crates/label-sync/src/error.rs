//! Error types for the reconciliation engine.

use thiserror::Error;

/// Errors raised by the fetch, inference, and mutation layers.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP transport failure (connection, timeout, malformed body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Linear API returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, when readable
        body: String,
    },

    /// The API answered 2xx but reported GraphQL-level errors.
    #[error("GraphQL errors: {0}")]
    Graphql(String),

    /// The API answered 2xx with neither data nor errors.
    #[error("no data in GraphQL response")]
    MissingData,

    /// A project identifier that is empty or has a non-numeric
    /// leading segment.
    #[error("invalid project identifier: {0:?}")]
    InvalidIdentifier(String),
}
