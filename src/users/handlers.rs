use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        repo as auth_repo,
        services::{hash_password, is_valid_email},
        AdminUser, CurrentUser,
    },
    certificates::repo as certificates_repo,
    error::ApiError,
    state::AppState,
    users::{
        dto::{GrantRoleRequest, UpdateUserRequest},
        repo,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(get_user))
        .route("/users/:id", put(update_user))
        .route("/users/:id", delete(delete_user))
        .route("/users/:id/roles", post(grant_role))
        .route("/users/:id/certificates", get(list_user_certificates))
}

#[instrument(skip(state, _user))]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::auth::PublicUser>, ApiError> {
    let user = auth_repo::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, admin, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<crate::auth::PublicUser>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("invalid email".into()));
    }

    let password_hash = match payload.password.as_deref() {
        Some(p) if p.len() < 8 => {
            return Err(ApiError::Validation("password too short".into()));
        }
        Some(p) => Some(hash_password(p)?),
        None => None,
    };

    let user = repo::update_user(
        &state.db,
        id,
        &payload.email,
        payload.full_name.trim(),
        payload.active,
        password_hash.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("user"))?;

    info!(admin_id = %admin.id, user_id = %id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state, admin))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    repo::delete_user(&state.db, id).await?;
    info!(admin_id = %admin.id, user_id = %id, "user deleted");
    Ok(Json(json!({ "message": "user account deleted" })))
}

#[instrument(skip(state, admin, payload))]
pub async fn grant_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<GrantRoleRequest>,
) -> Result<Json<crate::auth::PublicUser>, ApiError> {
    if auth_repo::find_by_id(&state.db, id).await?.is_none() {
        warn!(user_id = %id, "role grant for unknown user");
        return Err(ApiError::NotFound("user"));
    }

    repo::grant_role(&state.db, id, payload.role.trim()).await?;

    let user = auth_repo::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    info!(admin_id = %admin.id, user_id = %id, role = %payload.role, "role granted");
    Ok(Json(user.into()))
}

#[instrument(skip(state, _user))]
pub async fn list_user_certificates(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<crate::certificates::repo::Certificate>>, ApiError> {
    if auth_repo::find_by_id(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("user"));
    }
    let certs = certificates_repo::list_for_user(&state.db, id).await?;
    Ok(Json(certs))
}
