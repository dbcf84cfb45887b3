use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    error::ApiError,
    images::{dto::CreateImageRequest, repo, repo::Image},
    state::AppState,
};

pub fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/images", post(upload_image))
        .route("/images/:id", get(get_image))
}

#[instrument(skip(state, user, payload))]
pub async fn upload_image(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateImageRequest>,
) -> Result<(StatusCode, Json<Image>), ApiError> {
    if payload.image_url.trim().is_empty() {
        return Err(ApiError::Validation("image url is required".into()));
    }

    let image = repo::create(&state.db, user.id, &payload).await?;
    info!(image_id = %image.id, project_id = %image.project_id, user_id = %user.id, "image created");
    Ok((StatusCode::CREATED, Json(image)))
}

#[instrument(skip(state, _user))]
pub async fn get_image(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Image>, ApiError> {
    let image = repo::get_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("image"))?;
    Ok(Json(image))
}
