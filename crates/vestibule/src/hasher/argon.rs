//! Default password hasher
//!
//! Uses Argon2id in PHC string format. Salts are generated from the OS RNG
//! per hash, and verification is constant-time inside the `argon2` crate.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{Error, Result};
use crate::hasher::PasswordHasher;

/// Cost configuration for [`Argon2Hasher`]
#[derive(Debug, Clone)]
pub struct ArgonConfig {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Number of iterations
    pub time_cost: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for ArgonConfig {
    fn default() -> Self {
        Self {
            memory_cost: 64 * 1024, // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

/// Argon2id password hasher
pub struct Argon2Hasher {
    argon: Argon2<'static>,
    config: ArgonConfig,
}

impl Argon2Hasher {
    /// Create a hasher with the given cost configuration
    ///
    /// Fails with [`Error::Configuration`] when the cost parameters are out
    /// of range for Argon2.
    pub fn new(config: ArgonConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| Error::Configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            config,
        })
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Crypto(format!("Failed to hash password: {e}")))?;

        Ok(hash.to_string())
    }

    fn check(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };

        self.argon
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    fn needs_rehash(&self, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return true;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }
        let Ok(params) = Params::try_from(&parsed) else {
            return true;
        };

        params.m_cost() != self.config.memory_cost
            || params.t_cost() != self.config.time_cost
            || params.p_cost() != self.config.parallelism
    }
}
