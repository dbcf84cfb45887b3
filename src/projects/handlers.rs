use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{AdminUser, CurrentUser, PublicUser},
    contracts::repo as contracts_repo,
    error::ApiError,
    images::repo as images_repo,
    projects::{
        dto::{AddMemberRequest, CreateCommentRequest, CreateProjectRequest, UpdateProjectRequest},
        repo,
        repo::{Comment, Project},
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/:id", get(get_project))
        .route("/projects/:id/comments", get(list_comments))
        .route("/projects/:id/images", get(list_images))
        .route("/projects/:id/contracts", get(list_contracts))
        .route("/projects/:id/contractors", get(list_contractors))
        .route("/projects/:id/ministry-officers", get(list_officers))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project))
        .route("/projects/:id", put(update_project))
        .route("/projects/:id", delete(delete_project))
        .route("/projects/:id/comments", post(create_comment))
        .route("/projects/:id/contractors", post(add_contractor))
        .route("/projects/:id/ministry-officers", post(add_officer))
}

#[instrument(skip(state, user, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("project name is required".into()));
    }
    if payload.end_date < payload.start_date {
        return Err(ApiError::Validation("end date precedes start date".into()));
    }

    let project = repo::create_project(&state.db, user.id, &payload).await?;
    info!(project_id = %project.id, owner_id = %user.id, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

#[instrument(skip(state, _user))]
pub async fn get_project(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, ApiError> {
    let project = repo::get_project(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    Ok(Json(project))
}

#[instrument(skip(state, admin, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    if payload.end_date < payload.start_date {
        return Err(ApiError::Validation("end date precedes start date".into()));
    }

    let project = repo::update_project(&state.db, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    info!(admin_id = %admin.id, project_id = %id, "project updated");
    Ok(Json(project))
}

#[instrument(skip(state, admin))]
pub async fn delete_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    repo::delete_project(&state.db, id).await?;
    info!(admin_id = %admin.id, project_id = %id, "project deleted");
    Ok(Json(json!({ "message": "project deleted" })))
}

#[instrument(skip(state, _user))]
pub async fn list_comments(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    ensure_project(&state, id).await?;
    let comments = repo::comments_for_project(&state.db, id).await?;
    Ok(Json(comments))
}

#[instrument(skip(state, user, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(ApiError::Validation("comment text is required".into()));
    }
    if text.chars().count() > 500 {
        return Err(ApiError::Validation("comment text too long".into()));
    }

    let comment = repo::add_comment(&state.db, id, user.id, text).await?;
    info!(project_id = %id, user_id = %user.id, "comment created");
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state, _user))]
pub async fn list_images(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<images_repo::Image>>, ApiError> {
    ensure_project(&state, id).await?;
    let images = images_repo::list_for_project(&state.db, id).await?;
    Ok(Json(images))
}

#[instrument(skip(state, _user))]
pub async fn list_contracts(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<contracts_repo::Contract>>, ApiError> {
    ensure_project(&state, id).await?;
    let contracts = contracts_repo::list_for_project(&state.db, id).await?;
    Ok(Json(contracts))
}

#[instrument(skip(state, _user))]
pub async fn list_contractors(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    ensure_project(&state, id).await?;
    let users = repo::contractors_for_project(&state.db, id).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, admin, payload))]
pub async fn add_contractor(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<Json<Value>, ApiError> {
    ensure_project(&state, id).await?;
    if crate::auth::repo::find_by_id(&state.db, payload.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::Validation("user does not exist".into()));
    }
    repo::add_contractor(&state.db, id, payload.user_id).await?;
    info!(admin_id = %admin.id, project_id = %id, user_id = %payload.user_id, "contractor added");
    Ok(Json(json!({ "message": "contractor added" })))
}

#[instrument(skip(state, _user))]
pub async fn list_officers(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    ensure_project(&state, id).await?;
    let users = repo::officers_for_project(&state.db, id).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, admin, payload))]
pub async fn add_officer(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<Json<Value>, ApiError> {
    ensure_project(&state, id).await?;
    if crate::auth::repo::find_by_id(&state.db, payload.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::Validation("user does not exist".into()));
    }
    repo::add_officer(&state.db, id, payload.user_id).await?;
    info!(admin_id = %admin.id, project_id = %id, user_id = %payload.user_id, "ministry officer added");
    Ok(Json(json!({ "message": "ministry officer added" })))
}

async fn ensure_project(state: &AppState, id: Uuid) -> Result<(), ApiError> {
    if repo::get_project(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("project"));
    }
    Ok(())
}
