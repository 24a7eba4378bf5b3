//! Password hashing strategies
//!
//! Two strategies ship with the crate: [`Argon2Hasher`], the default, and
//! [`LegacyHasher`] for verifying pre-existing weak hashes during a
//! migration. Both are safe for concurrent reuse.

mod argon;
mod legacy;

pub use argon::{Argon2Hasher, ArgonConfig};
pub use legacy::{LegacyDigest, LegacyHasher};

/// Pluggable hash/verify strategy
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, password: &str) -> crate::Result<String>;

    /// Check a plaintext password against a stored hash
    ///
    /// Never errors: a malformed stored hash simply fails verification.
    fn check(&self, password: &str, stored: &str) -> bool;

    /// Whether the stored hash should be recomputed with the current
    /// algorithm and cost settings
    ///
    /// The caller is responsible for re-persisting a fresh hash; hashers
    /// and identifiers never write back themselves.
    fn needs_rehash(&self, stored: &str) -> bool;
}
