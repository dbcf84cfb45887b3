use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo as auth_repo;
use crate::auth::User;
use crate::error::{map_delete_err, map_insert_err, ApiError};

/// Replace a user's mutable fields in one atomic statement. The password
/// digest is only touched when a new one is supplied.
pub async fn update_user(
    db: &PgPool,
    id: Uuid,
    email: &str,
    full_name: &str,
    active: bool,
    password_hash: Option<&str>,
) -> Result<Option<User>, ApiError> {
    let updated = match password_hash {
        Some(hash) => sqlx::query(
            r#"
            UPDATE users
            SET email = $2, full_name = $3, active = $4, password_hash = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(full_name)
        .bind(active)
        .bind(hash)
        .execute(db)
        .await
        .map_err(|e| map_insert_err(e, "user"))?,
        None => sqlx::query(
            r#"
            UPDATE users
            SET email = $2, full_name = $3, active = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(full_name)
        .bind(active)
        .execute(db)
        .await
        .map_err(|e| map_insert_err(e, "user"))?,
    };

    if updated.rows_affected() == 0 {
        return Ok(None);
    }
    auth_repo::find_by_id(db, id).await
}

/// Hard delete under the restrict policy: owned records block the delete,
/// pure membership rows (roles, project associations) are cleaned up inside
/// the same transaction.
pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), ApiError> {
    let mut tx = db.begin().await?;

    let exists: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_none() {
        return Err(ApiError::NotFound("user"));
    }

    let dependents: i64 = sqlx::query_scalar(
        r#"
        SELECT (SELECT count(*) FROM certificates WHERE user_id = $1)
             + (SELECT count(*) FROM comments WHERE user_id = $1)
             + (SELECT count(*) FROM images WHERE user_id = $1)
             + (SELECT count(*) FROM comment_replies WHERE user_id = $1)
             + (SELECT count(*) FROM education WHERE user_id = $1)
             + (SELECT count(*) FROM experience WHERE user_id = $1)
             + (SELECT count(*) FROM projects WHERE user_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    if dependents > 0 {
        return Err(ApiError::Conflict(
            "user still has dependent records".into(),
        ));
    }

    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM project_contractors WHERE contractor_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM project_ministry_officers WHERE officer_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_delete_err(e, "user"))?;

    tx.commit().await?;
    Ok(())
}

/// Grant a named role. Granting a role the user already holds is a no-op.
pub async fn grant_role(db: &PgPool, user_id: Uuid, role: &str) -> Result<(), ApiError> {
    let role_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM roles WHERE name = $1")
        .bind(role)
        .fetch_optional(db)
        .await?;
    let Some(role_id) = role_id else {
        return Err(ApiError::Validation(format!("unknown role '{role}'")));
    };

    sqlx::query(
        r#"
        INSERT INTO user_roles (user_id, role_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(role_id)
    .execute(db)
    .await
    .map_err(|e| map_insert_err(e, "role grant"))?;
    Ok(())
}
