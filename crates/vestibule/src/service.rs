//! Authentication service
//!
//! Orchestrates an ordered list of authenticators against one request:
//! stops at the first success, otherwise reports the last failure so the
//! most specific error reaches the caller, and raises the Basic-auth
//! challenge once every strategy has been exhausted.

use std::sync::Arc;

use crate::authenticator::{AuthResult, Authenticator, Status};
use crate::error::{Error, Result};
use crate::identifier::{Identifier, IdentifierCollection};
use crate::record::Record;
use crate::request::Request;
use crate::storage::Storage;

/// Entry point tying authenticators and identifiers together
///
/// Built once per application and shared across concurrent requests; all
/// per-request state lives in the values flowing through
/// [`authenticate`](AuthenticationService::authenticate).
pub struct AuthenticationService {
    authenticators: Vec<(String, Arc<dyn Authenticator>)>,
    identifiers: IdentifierCollection,
}

impl std::fmt::Debug for AuthenticationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationService")
            .field(
                "authenticators",
                &self
                    .authenticators
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl AuthenticationService {
    /// Start building a service
    pub fn builder() -> AuthenticationServiceBuilder {
        AuthenticationServiceBuilder::default()
    }

    /// Access the identifier chain
    pub fn identifiers(&self) -> &IdentifierCollection {
        &self.identifiers
    }

    /// Get a registered authenticator by name
    pub fn authenticator(&self, name: &str) -> Option<&Arc<dyn Authenticator>> {
        self.authenticators
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, authenticator)| authenticator)
    }

    /// Authenticate the request against the registered strategies in order
    ///
    /// Returns the first successful result; if every strategy fails, the
    /// last failure is returned. When no strategy succeeds and one of them
    /// issues a challenge, the challenge is raised as
    /// [`Error::AuthenticationRequired`] instead so the caller can answer
    /// with a 401; the error carries that last failure result so its
    /// status and diagnostics remain readable.
    pub async fn authenticate(&self, request: &Request) -> Result<AuthResult> {
        if self.authenticators.is_empty() {
            return Ok(AuthResult::failure(
                Status::Other,
                vec!["No authenticators registered".to_string()],
            ));
        }

        let mut last = None;
        for (name, authenticator) in &self.authenticators {
            let result = authenticator.authenticate(request, &self.identifiers).await?;
            if result.is_valid() {
                tracing::debug!(authenticator = %name, "authentication succeeded");
                return Ok(result);
            }

            tracing::debug!(authenticator = %name, status = ?result.status(), "authentication failed");
            last = Some(result);
        }

        let last = last.unwrap_or_else(|| AuthResult::failure(Status::Failure, Vec::new()));

        if let Some(challenge) = self
            .authenticators
            .iter()
            .find_map(|(_, authenticator)| authenticator.challenge(request))
        {
            return Err(Error::AuthenticationRequired {
                www_authenticate: challenge.www_authenticate,
                result: last,
            });
        }

        Ok(last)
    }

    /// Persist a successful result's identity
    pub fn persist(&self, storage: &dyn Storage, result: &AuthResult) -> Result<()> {
        let identity = result.identity().ok_or_else(|| {
            Error::InvalidParameter("Cannot persist a result without an identity".to_string())
        })?;

        storage.write(identity)
    }

    /// Read the identity persisted for the current session, if any
    pub fn identity(&self, storage: &dyn Storage) -> Result<Option<Record>> {
        storage.read()
    }

    /// Clear the persisted identity
    pub fn clear(&self, storage: &dyn Storage) -> Result<()> {
        storage.delete()
    }
}

/// Builder for [`AuthenticationService`]
#[derive(Default)]
pub struct AuthenticationServiceBuilder {
    authenticators: Vec<(String, Arc<dyn Authenticator>)>,
    identifiers: Vec<(String, Arc<dyn Identifier>)>,
}

impl AuthenticationServiceBuilder {
    /// Register an authenticator; registration order is trial order
    pub fn authenticator(
        mut self,
        name: impl Into<String>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        self.authenticators.push((name.into(), authenticator));
        self
    }

    /// Register an identifier; registration order is trial order
    pub fn identifier(mut self, name: impl Into<String>, identifier: Arc<dyn Identifier>) -> Self {
        self.identifiers.push((name.into(), identifier));
        self
    }

    /// Build the service
    ///
    /// Duplicate authenticator or identifier names are configuration
    /// errors.
    pub fn build(self) -> Result<AuthenticationService> {
        let mut identifiers = IdentifierCollection::new();
        for (name, identifier) in self.identifiers {
            identifiers.register(name, identifier)?;
        }

        let mut seen: Vec<&str> = Vec::new();
        for (name, _) in &self.authenticators {
            if seen.contains(&name.as_str()) {
                return Err(Error::Configuration(format!(
                    "Authenticator `{name}` is already registered"
                )));
            }
            seen.push(name);
        }

        Ok(AuthenticationService {
            authenticators: self.authenticators,
            identifiers,
        })
    }
}
