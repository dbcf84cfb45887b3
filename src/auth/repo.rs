use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::error::{map_insert_err, ApiError};

const SELECT_USER: &str = r#"
    SELECT u.id, u.email, u.full_name, u.password_hash, u.active, u.created_at,
           COALESCE(array_agg(r.name ORDER BY r.name)
                    FILTER (WHERE r.name IS NOT NULL), '{}') AS roles
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.id
    LEFT JOIN roles r ON r.id = ur.role_id
"#;

/// Find a user with their roles by email.
pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "{SELECT_USER} WHERE u.email = $1 GROUP BY u.id"
    ))
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

/// Find a user with their roles by id.
pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "{SELECT_USER} WHERE u.id = $1 GROUP BY u.id"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

/// Create an active user with no roles. Duplicate email maps to Conflict.
pub async fn create(
    db: &PgPool,
    email: &str,
    full_name: &str,
    password_hash: &str,
) -> Result<User, ApiError> {
    let (id, created_at): (Uuid, OffsetDateTime) = sqlx::query_as(
        r#"
        INSERT INTO users (email, full_name, password_hash, active)
        VALUES ($1, $2, $3, TRUE)
        RETURNING id, created_at
        "#,
    )
    .bind(email)
    .bind(full_name)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(|e| map_insert_err(e, "user"))?;

    Ok(User {
        id,
        email: email.to_owned(),
        full_name: full_name.to_owned(),
        password_hash: password_hash.to_owned(),
        active: true,
        roles: Vec::new(),
        created_at,
    })
}
