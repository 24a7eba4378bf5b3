//! # Vestibule
//!
//! A pluggable authentication pipeline for web requests.
//!
//! Authenticators extract credentials from one surface of a request (HTTP
//! Basic transport fields, form POST bodies, opaque or signed bearer
//! tokens) and hand them to an ordered chain of identifiers, which resolve
//! them against external backends through a single `find` contract. The
//! [`AuthenticationService`] tries authenticators in order, normalizes
//! every outcome into an [`AuthResult`], and raises the Basic challenge
//! when every strategy fails. A resolved identity is persisted across
//! requests through [`SessionStorage`], which rotates the session id on
//! every write.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use vestibule::{AuthenticationService, JwtAuthenticator, Request};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> vestibule::Result<()> {
//! let service = AuthenticationService::builder()
//!     .authenticator("jwt", Arc::new(JwtAuthenticator::new(b"app-secret")))
//!     .build()?;
//!
//! let request = Request::builder()
//!     .header("Authorization", "Bearer not-a-real-token")
//!     .build();
//!
//! let result = service.authenticate(&request).await?;
//! assert!(!result.is_valid());
//! # Ok(())
//! # }
//! ```
//!
//! Password flows add identifiers backed by a
//! [`Resolver`](identifier::resolver::Resolver) implementation and a
//! [`PasswordHasher`](hasher::PasswordHasher):
//!
//! ```rust,ignore
//! let service = AuthenticationService::builder()
//!     .identifier("password", Arc::new(PasswordIdentifier::new(resolver, hasher)))
//!     .authenticator("form", Arc::new(FormAuthenticator::new().login_url("/login")))
//!     .authenticator("basic", Arc::new(HttpBasicAuthenticator::new().realm("app")))
//!     .build()?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Authentication strategies and the result value they produce
pub mod authenticator;

/// Transient credential sets
pub mod credentials;

/// Error types for the crate
pub mod error;

/// Password hashing strategies
pub mod hasher;

/// Identity resolution against external backends
pub mod identifier;

/// Identity records
pub mod record;

/// Request boundary
pub mod request;

/// Service orchestration
pub mod service;

/// Identity persistence
pub mod storage;

pub use authenticator::{
    AuthResult, Authenticator, Challenge, FormAuthenticator, HttpBasicAuthenticator,
    JwtAuthenticator, SessionAuthenticator, Status, TokenAuthenticator, WWW_AUTHENTICATE,
};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use hasher::{Argon2Hasher, ArgonConfig, LegacyDigest, LegacyHasher, PasswordHasher};
pub use identifier::{
    Identified, Identifier, IdentifierCollection, PasswordIdentifier, TokenIdentifier,
};
pub use record::Record;
pub use request::Request;
pub use service::AuthenticationService;
pub use storage::{MemorySession, Session, SessionStorage, Storage};
