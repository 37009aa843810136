use std::sync::Arc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::error::{RegistrationError, RegistrationResult};
use crate::models::{Confirmation, RegistrationRequest};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::validation::{NewRegistration, validate};

/// Service layer for sign-up business logic
pub struct RegistrationService<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> Clone for RegistrationService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: self.hasher.clone(),
        }
    }
}

impl<R: UserRepository> RegistrationService<R> {
    pub fn new(repository: R, hasher: PasswordHasher) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
        }
    }

    /// Validate, hash and store one submission.
    ///
    /// Nothing is stored unless every field is present, and a storage failure
    /// never leaves a partial row behind.
    pub async fn register(&self, request: RegistrationRequest) -> RegistrationResult<Confirmation> {
        let NewRegistration {
            username,
            email,
            password,
        } = validate(request).inspect_err(|errors| {
            debug!(
                error_count = errors.messages().len(),
                "Registration rejected by validation"
            );
        })?;

        let password_hash = self.hash_password(password).await?;

        let id = self
            .repository
            .insert_user(&username, &email, &password_hash)
            .await
            .inspect_err(|e| {
                warn!(username = %username, error = %e, "Failed to store registration");
            })?;

        info!(user_id = %id, username = %username, "Registered user");
        Ok(Confirmation::new(id, username))
    }

    /// Runs on the blocking pool; the plaintext is wiped when the task drops it.
    async fn hash_password(&self, password: Zeroizing<String>) -> RegistrationResult<String> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| RegistrationError::PasswordHash(format!("hashing task failed: {}", e)))?
    }
}
