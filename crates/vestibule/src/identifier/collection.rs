//! Ordered identifier registry

use std::sync::Arc;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::identifier::{Identified, Identifier};

/// Outcome of running a credential set through the identifier chain
///
/// Diagnostics from faulting backends are collected here so they can be
/// attached to the final authentication result without any shared mutable
/// state on the collection.
#[derive(Debug, Default)]
pub struct IdentifyOutcome {
    /// First candidate produced by the chain, if any
    pub candidate: Option<Identified>,
    /// Diagnostic messages from identifiers whose backend failed
    pub errors: Vec<String>,
}

impl IdentifyOutcome {
    /// Whether a candidate was found
    pub fn is_found(&self) -> bool {
        self.candidate.is_some()
    }
}

/// Ordered registry of identifiers
///
/// Identifiers are registered as constructed instances under a unique name;
/// registration order is trial order. Construction problems are surfaced at
/// registration time, never during a request.
#[derive(Default)]
pub struct IdentifierCollection {
    entries: Vec<(String, Arc<dyn Identifier>)>,
}

impl IdentifierCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identifier under a unique name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        identifier: Arc<dyn Identifier>,
    ) -> Result<()> {
        let name = name.into();
        if self.entries.iter().any(|(existing, _)| existing == &name) {
            return Err(Error::Configuration(format!(
                "Identifier `{name}` is already registered"
            )));
        }

        self.entries.push((name, identifier));
        Ok(())
    }

    /// Get a registered identifier by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Identifier>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, identifier)| identifier)
    }

    /// Number of registered identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the credentials through the chain in registration order
    ///
    /// Returns the first candidate found. A backend fault in one identifier
    /// is logged and recorded as a diagnostic, and the chain moves on to the
    /// next identifier rather than aborting.
    pub async fn identify(&self, credentials: &Credentials) -> IdentifyOutcome {
        let mut outcome = IdentifyOutcome::default();

        for (name, identifier) in &self.entries {
            match identifier.identify(credentials).await {
                Ok(Some(identified)) => {
                    outcome.candidate = Some(identified);
                    return outcome;
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(identifier = %name, %error, "identifier backend failed");
                    outcome.errors.push(format!("{name}: {error}"));
                }
            }
        }

        outcome
    }
}
