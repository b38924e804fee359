//! Error types for the gated cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::backend::StoreError;
use crate::key::KeyKind;
use crate::models::ErrorResponse;

// == Gate Error Enum ==
/// Error returned by [`GatedCache`](crate::gate::GatedCache) operations.
///
/// `E` is the error type of the wrapped backend. Backend errors are carried
/// as-is and displayed transparently.
#[derive(Error, Debug, PartialEq)]
pub enum GateError<E> {
    /// The key's type has no canonical form; raised before the filter or
    /// the backend is touched.
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(KeyKind),

    /// Error reported by the backend, passed through unchanged.
    #[error(transparent)]
    Backend(E),
}

impl<E> GateError<E> {
    /// Returns true if the key was rejected before reaching the backend.
    pub fn is_unsupported_key(&self) -> bool {
        matches!(self, GateError::UnsupportedKeyType(_))
    }

    /// Returns the backend error, if this is one.
    pub fn into_backend(self) -> Option<E> {
        match self {
            GateError::Backend(err) => Some(err),
            GateError::UnsupportedKeyType(_) => None,
        }
    }
}

// == Config Error ==
/// Invalid membership filter parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Filter capacity must be greater than zero")]
    ZeroCapacity,

    #[error("False-positive rate must be in (0, 1), got {0}")]
    InvalidFalsePositiveRate(f64),

    #[error("Filter for {capacity} elements needs {required_bits} bits, above the maximum of {max_bits}")]
    FilterTooLarge {
        capacity: usize,
        required_bits: f64,
        max_bits: usize,
    },
}

// == API Error Enum ==
/// Error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not present (or filtered out by the membership gate)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GateError<StoreError>> for ApiError {
    fn from(err: GateError<StoreError>) -> Self {
        match err {
            GateError::UnsupportedKeyType(kind) => {
                ApiError::InvalidRequest(format!("Unsupported key type: {}", kind))
            }
            GateError::Backend(
                err @ (StoreError::ValueTooLarge { .. } | StoreError::UnsupportedKey(_)),
            ) => {
                ApiError::InvalidRequest(err.to_string())
            }
            GateError::Backend(err @ StoreError::Poisoned) => ApiError::Internal(err.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_is_transparent() {
        let err: GateError<StoreError> = GateError::Backend(StoreError::Poisoned);
        assert_eq!(err.to_string(), StoreError::Poisoned.to_string());
        assert_eq!(err.into_backend(), Some(StoreError::Poisoned));
    }

    #[test]
    fn test_unsupported_key_message() {
        let err: GateError<StoreError> = GateError::UnsupportedKeyType(KeyKind::Unsupported("bool"));
        assert!(err.is_unsupported_key());
        assert!(err.to_string().contains("bool"));
        assert_eq!(err.into_backend(), None);
    }

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (ApiError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (ApiError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_gate_error_maps_to_bad_request() {
        let err: ApiError = GateError::UnsupportedKeyType(KeyKind::Unsupported("null")).into();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        let err: ApiError = GateError::Backend(StoreError::Poisoned).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
