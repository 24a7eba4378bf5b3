//! HTTP Basic authentication

use async_trait::async_trait;

use crate::authenticator::{AuthResult, Authenticator, Challenge, Status};
use crate::credentials::{self, Credentials};
use crate::error::Result;
use crate::identifier::IdentifierCollection;
use crate::request::{self, Request};

/// Authenticates the credential fields the transport parsed from an
/// `Authorization: Basic` header
///
/// Stateless: a failed attempt can be answered with a `WWW-Authenticate`
/// challenge so the client retries with credentials.
#[derive(Debug, Default)]
pub struct HttpBasicAuthenticator {
    realm: Option<String>,
}

impl HttpBasicAuthenticator {
    /// Create an authenticator using the request's server name as realm
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed realm in the challenge instead of the server name
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }
}

#[async_trait]
impl Authenticator for HttpBasicAuthenticator {
    async fn authenticate(
        &self,
        request: &Request,
        identifiers: &IdentifierCollection,
    ) -> Result<AuthResult> {
        let username = request.server_param(request::AUTH_USER).unwrap_or_default();
        let password = request.server_param(request::AUTH_PW).unwrap_or_default();

        // Missing or empty transport credentials never reach the chain.
        if username.is_empty() || password.is_empty() {
            return Ok(AuthResult::failure(Status::IdentityNotFound, Vec::new()));
        }

        let creds = Credentials::new()
            .with(credentials::USERNAME, username)
            .with(credentials::PASSWORD, password);

        let outcome = identifiers.identify(&creds).await;
        match outcome.candidate {
            Some(identified) => Ok(AuthResult::success(identified.record)),
            None => Ok(AuthResult::failure(
                Status::IdentityNotFound,
                outcome.errors,
            )),
        }
    }

    fn challenge(&self, request: &Request) -> Option<Challenge> {
        let realm = self
            .realm
            .as_deref()
            .or_else(|| request.server_param(request::SERVER_NAME))
            .unwrap_or_default();

        Some(Challenge {
            www_authenticate: format!("Basic realm=\"{realm}\""),
        })
    }
}
