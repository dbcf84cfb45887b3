use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{AdminUser, CurrentUser},
    error::ApiError,
    ministries::{
        dto::{CreateMinistryRequest, Pagination},
        repo,
        repo::Ministry,
    },
    state::AppState,
};

pub fn ministry_routes() -> Router<AppState> {
    Router::new()
        .route("/ministries", post(create_ministry))
        .route("/ministries", get(list_ministries))
        .route("/ministries/:id", get(get_ministry))
}

#[instrument(skip(state, admin, payload))]
pub async fn create_ministry(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateMinistryRequest>,
) -> Result<(StatusCode, Json<Ministry>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("ministry name is required".into()));
    }

    let ministry = repo::create(&state.db, &payload).await?;
    info!(ministry_id = %ministry.id, admin_id = %admin.id, "ministry created");
    Ok((StatusCode::CREATED, Json(ministry)))
}

#[instrument(skip(state, _user))]
pub async fn list_ministries(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Ministry>>, ApiError> {
    let rows = repo::list(&state.db, p.limit, p.offset).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, _user))]
pub async fn get_ministry(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Ministry>, ApiError> {
    let ministry = repo::get_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("ministry"))?;
    Ok(Json(ministry))
}
