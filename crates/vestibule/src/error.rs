//! Error types for vestibule

use thiserror::Error;

use crate::authenticator::AuthResult;

/// Result type alias for vestibule operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vestibule
///
/// Only configuration problems and the authentication challenge surface as
/// `Err`. Expected authentication failures (wrong password, unknown user,
/// missing credentials) are carried inside
/// [`AuthResult`](crate::authenticator::AuthResult), and backend faults are
/// converted into diagnostics on that result.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error raised at registration or construction time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid parameter passed to a constructor
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Authentication is required and a challenge should be issued
    ///
    /// Carries the `WWW-Authenticate` header value the caller must attach
    /// to its 401 response, along with the failure result of the last
    /// strategy tried so its status and diagnostics stay readable.
    #[error("Authentication required: {www_authenticate}")]
    AuthenticationRequired {
        /// Value for the `WWW-Authenticate` response header
        www_authenticate: String,
        /// Outcome of the last strategy tried before the challenge fired
        result: AuthResult,
    },

    /// A resolver backend failed while looking up a candidate
    #[error("Resolver error: {0}")]
    Resolver(String),

    /// Cryptographic operation failed
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Session storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error is a configuration problem that should have been
    /// caught before serving requests
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::InvalidParameter(_))
    }

    /// Check if this error is the challenge condition
    pub fn is_challenge(&self) -> bool {
        matches!(self, Error::AuthenticationRequired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::Status;

    fn challenge() -> Error {
        Error::AuthenticationRequired {
            www_authenticate: "Basic realm=\"app\"".to_string(),
            result: AuthResult::failure(Status::IdentityNotFound, Vec::new()),
        }
    }

    #[test]
    fn test_error_categorization() {
        assert!(Error::Configuration("bad".to_string()).is_configuration());
        assert!(!Error::Configuration("bad".to_string()).is_challenge());

        assert!(challenge().is_challenge());
        assert!(!challenge().is_configuration());
    }

    #[test]
    fn test_challenge_display_carries_header_value() {
        assert_eq!(
            challenge().to_string(),
            "Authentication required: Basic realm=\"app\""
        );
    }
}
