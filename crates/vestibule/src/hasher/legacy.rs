//! Legacy password hasher
//!
//! Plain digest with an optional static salt, for verifying hashes created
//! before the switch to Argon2. Deprecated: every hash it accepts reports
//! `needs_rehash` so callers can upgrade transparently on login.

use sha2::{Digest, Sha256, Sha512};

use crate::error::Result;
use crate::hasher::PasswordHasher;

/// Digest algorithm used by [`LegacyHasher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyDigest {
    /// SHA-256, hex-encoded
    Sha256,
    /// SHA-512, hex-encoded
    Sha512,
}

/// Digest-based password hasher kept for compatibility with existing data
pub struct LegacyHasher {
    digest: LegacyDigest,
    salt: Option<String>,
}

impl LegacyHasher {
    /// Create a legacy hasher
    ///
    /// The static salt, when set, is prepended to the password before
    /// digesting. Logs a deprecation warning but does not block operation.
    pub fn new(digest: LegacyDigest, salt: Option<String>) -> Self {
        tracing::warn!(
            ?digest,
            "legacy password hasher in use; stored hashes should be migrated to Argon2id"
        );
        Self { digest, salt }
    }

    fn digest(&self, password: &str) -> String {
        let mut input = String::new();
        if let Some(salt) = &self.salt {
            input.push_str(salt);
        }
        input.push_str(password);

        match self.digest {
            LegacyDigest::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
            LegacyDigest::Sha512 => hex::encode(Sha512::digest(input.as_bytes())),
        }
    }
}

impl PasswordHasher for LegacyHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(self.digest(password))
    }

    fn check(&self, password: &str, stored: &str) -> bool {
        constant_time_eq(self.digest(password).as_bytes(), stored.as_bytes())
    }

    fn needs_rehash(&self, _stored: &str) -> bool {
        true
    }
}

/// Constant-time equality comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}
