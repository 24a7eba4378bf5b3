//! Transient credential sets extracted from requests
//!
//! Credentials are constructed per authentication attempt and discarded
//! once consumed; the backing values are zeroized on drop so password
//! material does not linger in memory.

use std::collections::BTreeMap;

use zeroize::Zeroize;

/// Conventional field name for the username credential
pub const USERNAME: &str = "username";
/// Conventional field name for the password credential
pub const PASSWORD: &str = "password";
/// Conventional field name for a token credential
pub const TOKEN: &str = "token";

/// An opaque mapping from credential field name to string value
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    fields: BTreeMap<String, String>,
}

impl Credentials {
    /// Create an empty credential set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, consuming and returning the set for chaining
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Get a field value only if it is non-empty
    ///
    /// Identifiers use this guard to reject incomplete input without
    /// querying the backend.
    pub fn non_empty(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }

    /// Check whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Check whether the set has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        for value in self.fields.values_mut() {
            value.zeroize();
        }
    }
}
