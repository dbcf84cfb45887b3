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
    contracts::{dto::CreateContractRequest, repo, repo::Contract},
    error::ApiError,
    state::AppState,
};

pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/contracts", post(create_contract))
        .route("/contracts/:id", get(get_contract))
}

#[instrument(skip(state, user, payload))]
pub async fn create_contract(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateContractRequest>,
) -> Result<(StatusCode, Json<Contract>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("contract name is required".into()));
    }

    let contract = repo::create(&state.db, &payload).await?;
    info!(contract_id = %contract.id, project_id = %contract.project_id, user_id = %user.id, "contract created");
    Ok((StatusCode::CREATED, Json(contract)))
}

#[instrument(skip(state, _user))]
pub async fn get_contract(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Contract>, ApiError> {
    let contract = repo::get_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("contract"))?;
    Ok(Json(contract))
}
