use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::contracts::dto::CreateContractRequest;
use crate::error::{map_insert_err, ApiError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub name: String, // globally unique
    pub details: Option<String>,
    pub project_id: Uuid,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, name, details, project_id, created_at";

/// A duplicate name maps to Conflict, a missing project to Validation.
pub async fn create(db: &PgPool, req: &CreateContractRequest) -> Result<Contract, ApiError> {
    let contract = sqlx::query_as::<_, Contract>(&format!(
        r#"
        INSERT INTO contracts (name, details, project_id)
        VALUES ($1, $2, $3)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&req.name)
    .bind(&req.details)
    .bind(req.project_id)
    .fetch_one(db)
    .await
    .map_err(|e| map_insert_err(e, "contract"))?;
    Ok(contract)
}

pub async fn get_by_id(db: &PgPool, id: Uuid) -> Result<Option<Contract>, ApiError> {
    let contract = sqlx::query_as::<_, Contract>(&format!(
        "SELECT {COLUMNS} FROM contracts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(contract)
}

/// Contracts for a project, in creation order.
pub async fn list_for_project(db: &PgPool, project_id: Uuid) -> Result<Vec<Contract>, ApiError> {
    let rows = sqlx::query_as::<_, Contract>(&format!(
        r#"
        SELECT {COLUMNS}
        FROM contracts
        WHERE project_id = $1
        ORDER BY created_at, id
        "#
    ))
    .bind(project_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
