use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::certificates::dto::CreateCertificateRequest;
use crate::error::{map_insert_err, ApiError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date_issued: OffsetDateTime,
    pub issuer: String,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, title, description, date_issued, issuer, created_at";

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    req: &CreateCertificateRequest,
) -> Result<Certificate, ApiError> {
    let cert = sqlx::query_as::<_, Certificate>(&format!(
        r#"
        INSERT INTO certificates (user_id, title, description, date_issued, issuer)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.date_issued)
    .bind(&req.issuer)
    .fetch_one(db)
    .await
    .map_err(|e| map_insert_err(e, "certificate"))?;
    Ok(cert)
}

pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Option<Certificate>, ApiError> {
    let cert = sqlx::query_as::<_, Certificate>(&format!(
        "SELECT {COLUMNS} FROM certificates WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(cert)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<Certificate>, ApiError> {
    let rows = sqlx::query_as::<_, Certificate>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM certificates
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

/// Certificates owned by a user, in creation order.
pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Certificate>, ApiError> {
    let rows = sqlx::query_as::<_, Certificate>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM certificates
        WHERE user_id = $1
        ORDER BY created_at, id
        "#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, ApiError> {
    let res = sqlx::query("DELETE FROM certificates WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}
