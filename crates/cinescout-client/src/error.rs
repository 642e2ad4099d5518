//! Errors raised by the recommendation service client.

use std::fmt;

use thiserror::Error;

/// The four remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AvailableGenres,
    AvailableLanguages,
    MovieDescription,
    MovieRecommendation,
}

impl Operation {
    /// Endpoint path relative to the service base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::AvailableGenres => "/availableGenres",
            Self::AvailableLanguages => "/availableLanguages",
            Self::MovieDescription => "/movieDescription",
            Self::MovieRecommendation => "/movieRecommendation",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AvailableGenres => "available genres",
            Self::AvailableLanguages => "available languages",
            Self::MovieDescription => "movie description",
            Self::MovieRecommendation => "movie recommendation",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while talking to the recommendation service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success HTTP status.
    #[error("{operation} failed with HTTP {status}")]
    Status { operation: Operation, status: u16 },

    /// The request never produced a response (connection refused, reset, ...).
    #[error("{operation} request failed: {source}")]
    Request {
        operation: Operation,
        source: reqwest::Error,
    },

    /// The response body did not match the expected shape.
    #[error("{operation} response could not be decoded: {message}")]
    Decode { operation: Operation, message: String },

    /// The HTTP client itself could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl ClientError {
    /// The operation that failed, when the error came from a request.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Status { operation, .. }
            | Self::Request { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::Client(_) => None,
        }
    }

    /// Returns `true` when the failure was in transport or a server-side
    /// status, i.e. the same call might succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Decode { .. } | Self::Client(_) => false,
        }
    }
}

/// Convenience alias for client results.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_paths() {
        assert_eq!(Operation::AvailableGenres.path(), "/availableGenres");
        assert_eq!(Operation::AvailableLanguages.path(), "/availableLanguages");
        assert_eq!(Operation::MovieDescription.path(), "/movieDescription");
        assert_eq!(Operation::MovieRecommendation.path(), "/movieRecommendation");
    }

    #[test]
    fn test_status_error_display() {
        let err = ClientError::Status {
            operation: Operation::MovieRecommendation,
            status: 502,
        };
        assert_eq!(err.to_string(), "movie recommendation failed with HTTP 502");
        assert_eq!(err.operation(), Some(Operation::MovieRecommendation));
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        let not_found = ClientError::Status {
            operation: Operation::AvailableGenres,
            status: 404,
        };
        assert!(!not_found.is_transient());

        let decode = ClientError::Decode {
            operation: Operation::AvailableLanguages,
            message: "missing field `languages`".to_string(),
        };
        assert!(!decode.is_transient());
    }
}
