use serde::Deserialize;

/// Full-field replacement for a user. Every mutable field is listed
/// explicitly; a missing password keeps the stored digest.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub full_name: String,
    pub active: bool,
    pub password: Option<String>,
}

/// Grants a named role to a user.
#[derive(Debug, Deserialize)]
pub struct GrantRoleRequest {
    pub role: String,
}
