//! User entity model and DTOs.

use bagline_core::coerce::null_as_default;
use bagline_core::roles::Role;
use bagline_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(rename = "nome", default, deserialize_with = "null_as_default")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password_hash: String,
    /// Kept as stored; rows written by older clients may carry other labels.
    #[serde(rename = "tipo", default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: RecordId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "tipo")]
    pub role: String,
    pub created_at: Option<Timestamp>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUser {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "senha")]
    pub password_hash: String,
    #[serde(rename = "tipo")]
    pub role: Role,
}
