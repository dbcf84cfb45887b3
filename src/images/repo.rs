use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{map_insert_err, ApiError};
use crate::images::dto::CreateImageRequest;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub image_url: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, project_id, image_url, description, created_at";

pub async fn create(db: &PgPool, user_id: Uuid, req: &CreateImageRequest) -> Result<Image, ApiError> {
    let image = sqlx::query_as::<_, Image>(&format!(
        r#"
        INSERT INTO images (user_id, project_id, image_url, description)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(req.project_id)
    .bind(&req.image_url)
    .bind(&req.description)
    .fetch_one(db)
    .await
    .map_err(|e| map_insert_err(e, "image"))?;
    Ok(image)
}

pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Option<Image>, ApiError> {
    let image =
        sqlx::query_as::<_, Image>(&format!("SELECT {COLUMNS} FROM images WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?;
    Ok(image)
}

/// Images for a project, in creation order.
pub async fn list_for_project(db: &PgPool, project_id: Uuid) -> Result<Vec<Image>, ApiError> {
    let rows = sqlx::query_as::<_, Image>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM images
        WHERE project_id = $1
        ORDER BY created_at, id
        "#
    ))
    .bind(project_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
