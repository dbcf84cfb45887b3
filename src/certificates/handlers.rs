use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    certificates::{
        dto::{CreateCertificateRequest, Pagination},
        repo,
        repo::Certificate,
    },
    error::ApiError,
    state::AppState,
};

pub fn certificate_routes() -> Router<AppState> {
    Router::new()
        .route("/certificates", post(create_certificate))
        .route("/certificates", get(list_certificates))
        .route("/certificates/:id", get(get_certificate))
        .route("/certificates/:id", delete(delete_certificate))
}

#[instrument(skip(state, user, payload))]
pub async fn create_certificate(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateCertificateRequest>,
) -> Result<(StatusCode, Json<Certificate>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("certificate title is required".into()));
    }
    if payload.issuer.trim().is_empty() {
        return Err(ApiError::Validation("issuer is required".into()));
    }

    let cert = repo::create(&state.db, user.id, &payload).await?;
    info!(certificate_id = %cert.id, user_id = %user.id, "certificate created");
    Ok((StatusCode::CREATED, Json(cert)))
}

#[instrument(skip(state, _user))]
pub async fn list_certificates(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Certificate>>, ApiError> {
    let certs = repo::list(&state.db, p.limit, p.offset).await?;
    Ok(Json(certs))
}

#[instrument(skip(state, _user))]
pub async fn get_certificate(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Certificate>, ApiError> {
    let cert = repo::get_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("certificate"))?;
    Ok(Json(cert))
}

/// Only the owning user or an admin may delete a certificate.
#[instrument(skip(state, user))]
pub async fn delete_certificate(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let cert = repo::get_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("certificate"))?;

    if cert.user_id != user.id && !user.is_admin() {
        warn!(certificate_id = %id, user_id = %user.id, "certificate delete denied");
        return Err(ApiError::Forbidden);
    }

    repo::delete(&state.db, id).await?;
    info!(certificate_id = %id, user_id = %user.id, "certificate deleted");
    Ok(Json(json!({ "message": "certificate deleted" })))
}
