use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use core_config::{ConfigError, FromEnv, env_parse};

use crate::error::{RegistrationError, RegistrationResult};

/// Argon2id cost parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl FromEnv for HashingConfig {
    /// Reads from environment variables with the Argon2 defaults:
    /// - PASSWORD_HASH_MEMORY_KIB: 19456
    /// - PASSWORD_HASH_ITERATIONS: 2
    /// - PASSWORD_HASH_PARALLELISM: 1
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            memory_kib: env_parse(
                "PASSWORD_HASH_MEMORY_KIB",
                &defaults.memory_kib.to_string(),
            )?,
            iterations: env_parse(
                "PASSWORD_HASH_ITERATIONS",
                &defaults.iterations.to_string(),
            )?,
            parallelism: env_parse(
                "PASSWORD_HASH_PARALLELISM",
                &defaults.parallelism.to_string(),
            )?,
        })
    }
}

/// Salted Argon2id password hashing.
///
/// Hashes are PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`), so the
/// salt and cost parameters travel with the hash.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Fails when the cost parameters are outside what Argon2 accepts.
    pub fn new(config: &HashingConfig) -> RegistrationResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| RegistrationError::PasswordHash(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, password: &str) -> RegistrationResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| RegistrationError::PasswordHash(e.to_string()))
    }

    /// Check `password` against a stored PHC hash.
    pub fn verify(&self, password: &str, hash: &str) -> RegistrationResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| RegistrationError::PasswordHash(e.to_string()))?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
