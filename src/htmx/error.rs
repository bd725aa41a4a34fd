//! Error definitions for the response mutators.

use axum::http::{header::InvalidHeaderValue, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while recording an HX response directive.
///
/// Every variant is raised before the pending response is touched.
#[derive(Debug, Error)]
pub enum HtmxError {
    /// Caller input violates the protocol, e.g. a location without `path`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Value cannot be carried in an HTTP header (control characters).
    #[error("Invalid value for header {header}")]
    InvalidHeaderValue {
        header: HeaderName,
        #[source]
        source: InvalidHeaderValue,
    },

    /// Directive payload failed to serialize as JSON.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for response mutators.
pub type HtmxResult<T> = Result<T, HtmxError>;

impl IntoResponse for HtmxError {
    fn into_response(self) -> Response {
        let status = match &self {
            HtmxError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(error = %self, status = %status, "HX directive rejected");
        (status, self.to_string()).into_response()
    }
}
