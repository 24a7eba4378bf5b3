//! Token identification

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::{self, Credentials};
use crate::error::Result;
use crate::identifier::resolver::{Combinator, Conditions, Resolver};
use crate::identifier::{Identified, Identifier};

/// Identifies credentials carrying an opaque token
///
/// Looks up the stored token column (`token_field`) against the credential
/// value found under `data_field`. Both default to `token`; authenticators
/// that derive credentials from signed-token claims typically point
/// `data_field` at `sub`.
pub struct TokenIdentifier {
    resolver: Arc<dyn Resolver>,
    token_field: String,
    data_field: String,
}

impl TokenIdentifier {
    /// Create an identifier with the conventional `token` field names
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            token_field: credentials::TOKEN.to_string(),
            data_field: credentials::TOKEN.to_string(),
        }
    }

    /// Replace the stored token field queried on the backend
    pub fn token_field(mut self, field: impl Into<String>) -> Self {
        self.token_field = field.into();
        self
    }

    /// Replace the credential field the token is read from
    pub fn data_field(mut self, field: impl Into<String>) -> Self {
        self.data_field = field.into();
        self
    }
}

#[async_trait]
impl Identifier for TokenIdentifier {
    async fn identify(&self, credentials: &Credentials) -> Result<Option<Identified>> {
        let Some(token) = credentials.non_empty(&self.data_field) else {
            return Ok(None);
        };

        let conditions = Conditions::one(self.token_field.clone(), token);
        let candidate = self.resolver.find(&conditions, Combinator::All).await?;

        Ok(candidate.map(|record| Identified {
            record,
            needs_rehash: false,
        }))
    }
}
