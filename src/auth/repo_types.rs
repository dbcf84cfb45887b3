use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Role name that grants access to administrative operations.
pub const ADMIN_ROLE: &str = "admin";

/// User record with role names aggregated from the user_roles join.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,                   // unique user ID
    pub email: String,              // unique email
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,      // full Argon2 PHC digest, never exposed
    pub active: bool,
    pub roles: Vec<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}
