//! Gateway error types

use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Failures of the gateway itself.
///
/// Non-2xx responses are not errors at this level; a 401 is handled inside
/// the gateway and the response is still returned.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The persisted token cannot be carried in a header
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}
