//! Identity resolution
//!
//! An [`Identifier`] turns a credential set into a candidate identity by
//! querying a [`Resolver`](resolver::Resolver) backend and verifying
//! whatever proof the credentials carry (a password hash, a stored token).
//! Identifiers are registered in an [`IdentifierCollection`] which tries
//! them in order.

mod collection;
mod password;
pub mod resolver;
mod token;

pub use collection::{IdentifierCollection, IdentifyOutcome};
pub use password::PasswordIdentifier;
pub use token::TokenIdentifier;

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::record::Record;

/// A successfully identified candidate
///
/// The rehash flag travels with the value rather than living on the
/// identifier instance, which stays free of per-request mutable state and
/// safe for concurrent reuse.
#[derive(Debug, Clone)]
pub struct Identified {
    /// The candidate identity record
    pub record: Record,
    /// Whether the stored credential hash should be recomputed and
    /// re-persisted by the caller
    pub needs_rehash: bool,
}

/// Resolves a credential set to a candidate identity
///
/// Implementations must reject incomplete input (missing, empty fields)
/// with `Ok(None)` before touching their backend, so malformed requests
/// cannot probe backend behavior. `Err` is reserved for backend faults.
#[async_trait]
pub trait Identifier: Send + Sync {
    /// Attempt to identify the given credentials
    async fn identify(&self, credentials: &Credentials) -> Result<Option<Identified>>;
}
