use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::User;
use crate::error::{map_delete_err, map_insert_err, ApiError};
use crate::projects::dto::{CreateProjectRequest, UpdateProjectRequest};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub budget: Decimal,
    pub status: String,
    pub user_id: Uuid,     // owning user
    pub ministry_id: Uuid, // owning ministry
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub text: String,
    pub created_at: OffsetDateTime,
}

const PROJECT_COLUMNS: &str =
    "id, name, description, start_date, end_date, budget, status, user_id, ministry_id, created_at";

pub async fn create_project(
    db: &PgPool,
    owner_id: Uuid,
    req: &CreateProjectRequest,
) -> Result<Project, ApiError> {
    let project = sqlx::query_as::<_, Project>(&format!(
        r#"
        INSERT INTO projects (name, description, start_date, end_date, budget, status, user_id, ministry_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {PROJECT_COLUMNS}
        "#
    ))
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(req.budget)
    .bind(&req.status)
    .bind(owner_id)
    .bind(req.ministry_id)
    .fetch_one(db)
    .await
    .map_err(|e| map_insert_err(e, "project"))?;
    Ok(project)
}

pub async fn get_project(db: &PgPool, id: Uuid) -> Result<Option<Project>, ApiError> {
    let project = sqlx::query_as::<_, Project>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(project)
}

/// Full-field replacement in a single atomic UPDATE.
pub async fn update_project(
    db: &PgPool,
    id: Uuid,
    req: &UpdateProjectRequest,
) -> Result<Option<Project>, ApiError> {
    let project = sqlx::query_as::<_, Project>(&format!(
        r#"
        UPDATE projects
        SET name = $2, description = $3, start_date = $4, end_date = $5,
            budget = $6, status = $7, ministry_id = $8
        WHERE id = $1
        RETURNING {PROJECT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(req.budget)
    .bind(&req.status)
    .bind(req.ministry_id)
    .fetch_optional(db)
    .await
    .map_err(|e| map_insert_err(e, "project"))?;
    Ok(project)
}

/// Hard delete under the restrict policy: owned records (comments, images,
/// contracts, agreements, receipts, published) block the delete; member
/// associations are cleaned up inside the same transaction.
pub async fn delete_project(db: &PgPool, id: Uuid) -> Result<(), ApiError> {
    let mut tx = db.begin().await?;

    let exists: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_none() {
        return Err(ApiError::NotFound("project"));
    }

    let dependents: i64 = sqlx::query_scalar(
        r#"
        SELECT (SELECT count(*) FROM comments WHERE project_id = $1)
             + (SELECT count(*) FROM images WHERE project_id = $1)
             + (SELECT count(*) FROM contracts WHERE project_id = $1)
             + (SELECT count(*) FROM project_agreements WHERE project_id = $1)
             + (SELECT count(*) FROM project_payment_receipts WHERE project_id = $1)
             + (SELECT count(*) FROM published WHERE project_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    if dependents > 0 {
        return Err(ApiError::Conflict(
            "project still has dependent records".into(),
        ));
    }

    sqlx::query("DELETE FROM project_contractors WHERE project_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM project_ministry_officers WHERE project_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_delete_err(e, "project"))?;

    tx.commit().await?;
    Ok(())
}

/// Comments in creation order.
pub async fn comments_for_project(db: &PgPool, project_id: Uuid) -> Result<Vec<Comment>, ApiError> {
    let rows = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, project_id, text, created_at
        FROM comments
        WHERE project_id = $1
        ORDER BY created_at, id
        "#,
    )
    .bind(project_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn add_comment(
    db: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
    text: &str,
) -> Result<Comment, ApiError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (user_id, project_id, text)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, project_id, text, created_at
        "#,
    )
    .bind(user_id)
    .bind(project_id)
    .bind(text)
    .fetch_one(db)
    .await
    .map_err(|e| map_insert_err(e, "comment"))?;
    Ok(comment)
}

const MEMBER_SELECT: &str = r#"
    SELECT u.id, u.email, u.full_name, u.password_hash, u.active, u.created_at,
           COALESCE(array_agg(r.name ORDER BY r.name)
                    FILTER (WHERE r.name IS NOT NULL), '{}') AS roles
    FROM users u
"#;

/// Contractors associated with a project, in association order.
pub async fn contractors_for_project(db: &PgPool, project_id: Uuid) -> Result<Vec<User>, ApiError> {
    let rows = sqlx::query_as::<_, User>(&format!(
        r#"
        {MEMBER_SELECT}
        JOIN project_contractors pc ON pc.contractor_id = u.id
        LEFT JOIN user_roles ur ON ur.user_id = u.id
        LEFT JOIN roles r ON r.id = ur.role_id
        WHERE pc.project_id = $1
        GROUP BY u.id, pc.created_at
        ORDER BY pc.created_at
        "#
    ))
    .bind(project_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn add_contractor(db: &PgPool, project_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO project_contractors (project_id, contractor_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .execute(db)
    .await
    .map_err(|e| map_insert_err(e, "contractor association"))?;
    Ok(())
}

/// Ministry contact officers associated with a project, in association order.
pub async fn officers_for_project(db: &PgPool, project_id: Uuid) -> Result<Vec<User>, ApiError> {
    let rows = sqlx::query_as::<_, User>(&format!(
        r#"
        {MEMBER_SELECT}
        JOIN project_ministry_officers po ON po.officer_id = u.id
        LEFT JOIN user_roles ur ON ur.user_id = u.id
        LEFT JOIN roles r ON r.id = ur.role_id
        WHERE po.project_id = $1
        GROUP BY u.id, po.created_at
        ORDER BY po.created_at
        "#
    ))
    .bind(project_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn add_officer(db: &PgPool, project_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO project_ministry_officers (project_id, officer_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .execute(db)
    .await
    .map_err(|e| map_insert_err(e, "officer association"))?;
    Ok(())
}
