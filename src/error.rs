use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by handlers and repos. Auth variants map to 401/403 and
/// never reveal whether a protected resource exists; data variants map to
/// 404/409/422. Everything else is a 500 with the detail kept in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid token")]
    TokenInvalid,
    #[error("token has expired")]
    TokenExpired,
    #[error("invalid credentials")]
    Unauthenticated,
    #[error("not authorized to perform this action")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::TokenInvalid | ApiError::TokenExpired | ApiError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Database(e) => {
                error!(error = %e, "database error");
                "internal server error".to_string()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps constraint failures on INSERT/UPDATE: duplicate key -> Conflict,
/// missing FK target -> Validation. Anything else stays a database error.
pub fn map_insert_err(e: sqlx::Error, what: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                return ApiError::Conflict(format!("{what} already exists"));
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return ApiError::Validation(format!("{what} references a missing row"));
            }
            _ => {}
        }
    }
    ApiError::Database(e)
}

/// Maps constraint failures on DELETE: an FK violation here means dependent
/// rows still reference the target, which is a restrict conflict.
pub fn map_delete_err(e: sqlx::Error, what: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return ApiError::Conflict(format!("{what} still has dependent rows"));
        }
    }
    ApiError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_do_not_leak_detail() {
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenInvalid.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn data_errors_map_to_expected_statuses() {
        assert_eq!(ApiError::NotFound("project").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Conflict("email already exists".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Validation("project references a missing row".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn row_not_found_is_a_database_error_not_a_panic() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
