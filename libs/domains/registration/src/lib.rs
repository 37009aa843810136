//! Registration Domain
//!
//! Accepts a sign-up submission, validates it, hashes the password and stores
//! a new `users` row through an injected repository.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTML form + JSON endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, password hashing, persistence
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← insert_user (trait + in-memory / Postgres)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_registration::{
//!     handlers, InMemoryUserRepository, PasswordHasher, RegistrationService,
//! };
//!
//! let service = RegistrationService::new(InMemoryUserRepository::new(), PasswordHasher::default());
//! let router = handlers::form_router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{
    RegistrationError, RegistrationResult, StorageError, StorageResult, ValidationErrors,
};
pub use models::{Confirmation, RecordId, RegistrationRequest, UserRecord};
pub use password::{HashingConfig, PasswordHasher};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::RegistrationService;
pub use validation::{NewRegistration, sanitize_email, validate};
