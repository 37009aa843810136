use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Identifier assigned to a stored user by the database.
pub type RecordId = Uuid;

/// Raw sign-up submission, as posted by the form or the JSON API.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation like any other empty field. The password buffer is wiped
/// when the request is dropped.
#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegistrationRequest {
    #[schema(example = "amy")]
    pub username: String,
    #[schema(example = "amy@example.com")]
    pub email: String,
    #[schema(value_type = String, format = Password)]
    pub password: Zeroizing<String>,
}

impl RegistrationRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A stored `users` row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRecord {
    #[schema(value_type = String, format = Uuid)]
    pub id: RecordId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Returned after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Confirmation {
    #[schema(value_type = String, format = Uuid)]
    pub id: RecordId,
    pub username: String,
    #[schema(example = "Record inserted successfully")]
    pub message: String,
}

impl Confirmation {
    pub const MESSAGE: &'static str = "Record inserted successfully";

    pub fn new(id: RecordId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            message: Self::MESSAGE.to_string(),
        }
    }
}
