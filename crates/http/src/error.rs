//! Error handling for the cinema HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Convenience alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    /// A replace or delete by id matched no row.
    #[error("{entity} {id}: no row matched")]
    UnmatchedRows { entity: &'static str, id: i64 },

    #[error("conflict: {message}")]
    Conflict {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    /// Create a conflict error
    pub fn conflict(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Conflict {
            details,
            code: "conflict".to_string(),
            message: message.into(),
        }
    }

    /// Check the row count of a by-id mutation.
    ///
    /// Zero rows is [`AppError::UnmatchedRows`]; more than one is a conflict.
    /// Callers commit only on `Ok`, so an error drops (and rolls back) their
    /// transaction.
    pub fn expect_single_row(affected: u64, entity: &'static str, id: i64) -> AppResult<()> {
        match affected {
            1 => Ok(()),
            0 => Err(Self::UnmatchedRows { entity, id }),
            rows => Err(Self::conflict(
                vec![json!({ "entity": entity, "id": id, "rows": rows })],
                format!("{entity} {id} matched {rows} rows"),
            )),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();

        let (status, error_code, message, details) = match self {
            AppError::UnmatchedRows { entity, id } => {
                tracing::warn!(
                    error_id = %error_id,
                    entity,
                    id,
                    status_code = StatusCode::BAD_REQUEST.as_u16(),
                    "no row matched"
                );
                return StatusCode::BAD_REQUEST.into_response();
            }
            AppError::NotFound { message, code } => (StatusCode::NOT_FOUND, code, message, None),
            AppError::Conflict {
                details,
                code,
                message,
            } => (StatusCode::CONFLICT, code, message, Some(details)),
            AppError::Database(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error".to_string(),
                e.to_string(),
                None,
            ),
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error".to_string(),
                e.to_string(),
                None,
            ),
        };

        tracing::error!(
            error_id = %error_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            "Request error"
        );

        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message,
                "details": details.unwrap_or_default(),
                "trace_id": error_id.to_string(),
                "timestamp": OffsetDateTime::now_utc().to_string()
            }
        });

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn test_not_found_carries_diagnostic_message() {
        let response = AppError::not_found("movie 999 not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "movie 999 not found");
        assert!(json["error"]["trace_id"].as_str().unwrap().len() == 36);
        assert!(json["error"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unmatched_rows_is_empty_bad_request() {
        let response = AppError::UnmatchedRows {
            entity: "movie",
            id: 7,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_bytes(response).await.is_empty());
    }

    #[test]
    fn test_single_row_contract() {
        assert!(AppError::expect_single_row(1, "genre", 1).is_ok());
        assert!(matches!(
            AppError::expect_single_row(0, "genre", 1),
            Err(AppError::UnmatchedRows { entity: "genre", id: 1 })
        ));
        assert!(matches!(
            AppError::expect_single_row(2, "genre", 1),
            Err(AppError::Conflict { .. })
        ));
    }

    #[test]
    fn test_conflict_mapping() {
        let response = AppError::expect_single_row(3, "director", 4)
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_error_mapping() {
        let error = AppError::from(sqlx::Error::PoolTimedOut);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_mapping() {
        let internal_error = anyhow::anyhow!("Database connection failed");
        let error = AppError::Internal(internal_error);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
