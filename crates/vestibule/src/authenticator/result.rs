//! Authentication result value

use crate::error::{Error, Result};
use crate::record::Record;

/// Status of an authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Authentication succeeded
    Success,
    /// No identity matched the supplied credentials
    IdentityNotFound,
    /// Required credential fields were absent or empty
    CredentialsMissing,
    /// Credentials were present but structurally or cryptographically
    /// invalid (bad token signature, expired token)
    CredentialInvalid,
    /// Failure for another reason (misrouted login request, empty
    /// authenticator registry)
    Other,
    /// Generic failure
    Failure,
}

impl Status {
    /// Whether the status represents a successful attempt
    pub fn is_valid(self) -> bool {
        matches!(self, Status::Success)
    }
}

/// Immutable outcome of one authentication attempt
///
/// A successful result always carries an identity; this invariant is
/// enforced at construction.
#[derive(Debug, Clone)]
pub struct AuthResult {
    status: Status,
    identity: Option<Record>,
    errors: Vec<String>,
}

impl AuthResult {
    /// Construct a result, enforcing that success carries an identity
    pub fn new(identity: Option<Record>, status: Status, errors: Vec<String>) -> Result<Self> {
        if status.is_valid() && identity.as_ref().map_or(true, Record::is_empty) {
            return Err(Error::InvalidParameter(
                "Identity can not be empty with status success".to_string(),
            ));
        }

        Ok(Self {
            status,
            identity,
            errors,
        })
    }

    /// Construct a successful result
    pub fn success(identity: Record) -> Self {
        Self {
            status: Status::Success,
            identity: Some(identity),
            errors: Vec::new(),
        }
    }

    /// Construct a failed result
    pub fn failure(status: Status, errors: Vec<String>) -> Self {
        debug_assert!(!status.is_valid());
        Self {
            status,
            identity: None,
            errors,
        }
    }

    /// Whether the attempt succeeded
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Status of the attempt
    pub fn status(&self) -> Status {
        self.status
    }

    /// Identity resolved by the attempt, if any
    pub fn identity(&self) -> Option<&Record> {
        self.identity.as_ref()
    }

    /// Consume the result, returning the identity
    pub fn into_identity(self) -> Option<Record> {
        self.identity
    }

    /// Reasons the attempt failed; empty on success
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
