//! Username/password identification

use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::{self, Credentials};
use crate::error::Result;
use crate::hasher::PasswordHasher;
use crate::identifier::resolver::{Combinator, Conditions, Resolver};
use crate::identifier::{Identified, Identifier};

/// Identifies credentials carrying a username and password
///
/// Several username fields can be configured (e.g. `username` and `email`);
/// the first one present in the credentials supplies the lookup value, and
/// the backend query matches it against any of the configured fields.
pub struct PasswordIdentifier {
    resolver: Arc<dyn Resolver>,
    hasher: Arc<dyn PasswordHasher>,
    username_fields: Vec<String>,
    password_field: String,
}

impl PasswordIdentifier {
    /// Create an identifier with the conventional `username`/`password`
    /// field names
    pub fn new(resolver: Arc<dyn Resolver>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            resolver,
            hasher,
            username_fields: vec![credentials::USERNAME.to_string()],
            password_field: credentials::PASSWORD.to_string(),
        }
    }

    /// Replace the username fields consulted for the lookup
    pub fn username_fields(mut self, fields: Vec<String>) -> Self {
        self.username_fields = fields;
        self
    }

    /// Replace the password field name
    pub fn password_field(mut self, field: impl Into<String>) -> Self {
        self.password_field = field.into();
        self
    }

    async fn find_candidate(&self, username: &str) -> Result<Option<crate::Record>> {
        let mut conditions = Conditions::new();
        for field in &self.username_fields {
            conditions = conditions.with(field.clone(), username);
        }

        self.resolver.find(&conditions, Combinator::Any).await
    }
}

#[async_trait]
impl Identifier for PasswordIdentifier {
    async fn identify(&self, credentials: &Credentials) -> Result<Option<Identified>> {
        // Incomplete input never reaches the backend.
        let username = self
            .username_fields
            .iter()
            .find_map(|field| credentials.non_empty(field));
        let Some(username) = username else {
            return Ok(None);
        };
        let Some(password) = credentials.non_empty(&self.password_field) else {
            return Ok(None);
        };

        let Some(candidate) = self.find_candidate(username).await? else {
            return Ok(None);
        };

        let Some(stored) = candidate.get_str(&self.password_field) else {
            return Ok(None);
        };
        if !self.hasher.check(password, stored) {
            return Ok(None);
        }

        let needs_rehash = self.hasher.needs_rehash(stored);

        Ok(Some(Identified {
            record: candidate.without(&self.password_field),
            needs_rehash,
        }))
    }
}
