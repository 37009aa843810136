//! Application state management.

use domain_registration::{PasswordHasher, PgUserRepository, RegistrationService};

/// Shared application state.
///
/// Cloned into each router that needs it.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn registration_service(&self) -> RegistrationService<PgUserRepository> {
        RegistrationService::new(PgUserRepository::new(self.db.clone()), self.hasher.clone())
    }
}
