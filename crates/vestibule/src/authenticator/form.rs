//! Form POST authentication

use async_trait::async_trait;

use crate::authenticator::{AuthResult, Authenticator, Status};
use crate::credentials::{self, Credentials};
use crate::error::Result;
use crate::identifier::IdentifierCollection;
use crate::request::Request;

/// Authenticates username/password fields from a parsed request body
pub struct FormAuthenticator {
    username_field: String,
    password_field: String,
    login_url: Option<String>,
}

impl Default for FormAuthenticator {
    fn default() -> Self {
        Self {
            username_field: credentials::USERNAME.to_string(),
            password_field: credentials::PASSWORD.to_string(),
            login_url: None,
        }
    }
}

impl FormAuthenticator {
    /// Create an authenticator reading the conventional `username` and
    /// `password` body fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the body field names
    pub fn fields(
        mut self,
        username_field: impl Into<String>,
        password_field: impl Into<String>,
    ) -> Self {
        self.username_field = username_field.into();
        self.password_field = password_field.into();
        self
    }

    /// Only accept login attempts posted to this path
    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into());
        self
    }

    /// Both fields must be present and non-empty, mirroring the identifier's
    /// own guard
    fn extract(&self, request: &Request) -> Option<Credentials> {
        let username = request.body_field(&self.username_field)?;
        let password = request.body_field(&self.password_field)?;
        if username.is_empty() || password.is_empty() {
            return None;
        }

        Some(
            Credentials::new()
                .with(credentials::USERNAME, username)
                .with(credentials::PASSWORD, password),
        )
    }
}

#[async_trait]
impl Authenticator for FormAuthenticator {
    async fn authenticate(
        &self,
        request: &Request,
        identifiers: &IdentifierCollection,
    ) -> Result<AuthResult> {
        if let Some(login_url) = &self.login_url {
            if request.path() != login_url {
                return Ok(AuthResult::failure(
                    Status::Other,
                    vec![format!(
                        "Login URL `{}` did not match `{login_url}`",
                        request.path()
                    )],
                ));
            }
        }

        let Some(creds) = self.extract(request) else {
            return Ok(AuthResult::failure(
                Status::CredentialsMissing,
                vec!["Login credentials not found".to_string()],
            ));
        };

        let outcome = identifiers.identify(&creds).await;
        match outcome.candidate {
            Some(identified) => Ok(AuthResult::success(identified.record)),
            None => Ok(AuthResult::failure(
                Status::IdentityNotFound,
                outcome.errors,
            )),
        }
    }
}
