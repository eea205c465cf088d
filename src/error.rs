//! Error types for the prediction client.

use thiserror::Error;

/// Errors raised while resolving client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The backend base URL could not be parsed or is not http(s)
    #[error("Invalid backend URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// A raw form value that is not one of an enum's accepted options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown option `{0}`")]
pub struct UnknownOption(pub String);

/// Errors produced by a [`crate::gateway::PredictionGateway`] call.
///
/// None of these escape the controller; each one is folded into the state
/// axis owned by the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientSetup(String),
    /// Transport-level failure (DNS, refused connection, TLS, timeout)
    #[error("Could not reach backend at {url}: {reason}")]
    Unreachable { url: String, reason: String },
    /// The backend answered with a non-2xx status
    #[error("Backend returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    /// The response body was not the expected JSON shape
    #[error("Malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl GatewayError {
    /// True when the backend answered, just not with a success status.
    pub fn is_status(&self) -> bool {
        matches!(self, GatewayError::Status { .. })
    }
}
