//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("invalid api token entry '{0}' (expected token=email:ROLE|ROLE)")]
    InvalidToken(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("{capability} role required")]
    Forbidden { capability: &'static str },
    #[error("{type_name} with id {id} not found")]
    NotFound { type_name: &'static str, id: String },
    #[error("{0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(type_name: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            type_name,
            id: id.to_string(),
        }
    }

    /// Error-kind tag carried in the `type` field of the error payload.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "Unauthenticated",
            AppError::Forbidden { .. } => "Forbidden",
            AppError::NotFound { .. } => "EntityNotFoundException",
            AppError::Validation(_) => "ValidationError",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Db(_) => "DatabaseError",
            AppError::Config(_) => "ConfigError",
            AppError::Internal(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            kind: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_type_and_id() {
        let err = AppError::not_found("RecommendationRequest", 7);
        assert_eq!(err.to_string(), "RecommendationRequest with id 7 not found");
        assert_eq!(err.kind(), "EntityNotFoundException");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_failures_are_distinct_statuses() {
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        let forbidden = AppError::Forbidden { capability: "admin" };
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(forbidden.to_string(), "admin role required");
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Validation("name is required".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "ValidationError");
    }
}
