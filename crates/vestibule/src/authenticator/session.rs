//! Session-resumption authentication

use std::sync::Arc;

use async_trait::async_trait;

use crate::authenticator::{AuthResult, Authenticator, Status};
use crate::credentials::{self, Credentials};
use crate::error::Result;
use crate::identifier::IdentifierCollection;
use crate::request::Request;
use crate::storage::Storage;

/// Resumes an identity persisted by an earlier login
///
/// Placed first in the chain it lets follow-up requests of a session skip
/// credential verification entirely. With [`verify`](Self::verify) enabled
/// the stored identity's lookup fields are re-run through the identifier
/// chain on every request, trading a backend round trip for immediate
/// revocation of deleted or disabled accounts.
pub struct SessionAuthenticator {
    storage: Arc<dyn Storage>,
    fields: Vec<String>,
    verify: bool,
}

impl SessionAuthenticator {
    /// Create an authenticator resuming identities from the given storage
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            fields: vec![credentials::USERNAME.to_string()],
            verify: false,
        }
    }

    /// Replace the identity fields handed to the chain when verifying
    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Re-verify the stored identity against the identifier chain on every
    /// request
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(
        &self,
        _request: &Request,
        identifiers: &IdentifierCollection,
    ) -> Result<AuthResult> {
        let Some(identity) = self.storage.read()? else {
            return Ok(AuthResult::failure(Status::IdentityNotFound, Vec::new()));
        };

        if !self.verify {
            return Ok(AuthResult::success(identity));
        }

        let mut creds = Credentials::new();
        for field in &self.fields {
            if let Some(value) = identity.get_str(field) {
                creds.insert(field.clone(), value);
            }
        }

        // A stored identity the chain no longer recognizes is invalid, not
        // merely unknown.
        let outcome = identifiers.identify(&creds).await;
        match outcome.candidate {
            Some(identified) => Ok(AuthResult::success(identified.record)),
            None => Ok(AuthResult::failure(
                Status::CredentialInvalid,
                outcome.errors,
            )),
        }
    }
}
