use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::ministries::dto::CreateMinistryRequest;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ministry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, name, description, contact_info, created_at";

pub async fn create(db: &PgPool, req: &CreateMinistryRequest) -> Result<Ministry, ApiError> {
    let ministry = sqlx::query_as::<_, Ministry>(&format!(
        r#"
        INSERT INTO ministries (name, description, contact_info)
        VALUES ($1, $2, $3)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&req.name)
    .bind(&req.description)
    .bind(&req.contact_info)
    .fetch_one(db)
    .await?;
    Ok(ministry)
}

pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Option<Ministry>, ApiError> {
    let ministry = sqlx::query_as::<_, Ministry>(&format!(
        "SELECT {COLUMNS} FROM ministries WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(ministry)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<Ministry>, ApiError> {
    let rows = sqlx::query_as::<_, Ministry>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM ministries
        ORDER BY created_at, id
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
