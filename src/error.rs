//! Typed errors and HTTP mapping.

use crate::model::EntityId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Failure of a single store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("entity {0} not found")]
    NotFound(EntityId),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreErrorKind {
    NotFound,
    Internal,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            StoreError::Db(_) | StoreError::Unavailable(_) => StoreErrorKind::Internal,
        }
    }
}

/// Request body could not be turned into the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("body is not valid JSON: {0}")]
    Malformed(String),
    #[error("body must be a JSON object")]
    NotAnObject,
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a string")]
    NotAString(&'static str),
    #[error("{0} must not be empty")]
    Blank(&'static str),
    #[error("id must be a positive integer")]
    InvalidId,
}

/// JSON key a failure message is reported under. Both are part of the public contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKey {
    Error,
    Message,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    NotFound { key: ErrorKey, message: String },
    #[error("{0}")]
    Conflict(String),
    #[error("{message}")]
    Internal { key: ErrorKey, message: String },
}

impl AppError {
    pub fn not_found(key: ErrorKey, message: impl Into<String>) -> Self {
        AppError::NotFound { key, message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn internal(key: ErrorKey, message: impl Into<String>) -> Self {
        AppError::Internal { key, message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn key(&self) -> ErrorKey {
        match self {
            AppError::Validation(_) => ErrorKey::Error,
            AppError::Conflict(_) => ErrorKey::Message,
            AppError::NotFound { key, .. } | AppError::Internal { key, .. } => *key,
        }
    }
}

/// Failure body: exactly one of `error` / `message` is set.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(key: ErrorKey, text: String) -> Self {
        match key {
            ErrorKey::Error => ErrorBody { error: Some(text), message: None },
            ErrorKey::Message => ErrorBody { error: None, message: Some(text) },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "request rejected");
        }
        let body = ErrorBody::new(self.key(), self.to_string());
        (status, Json(body)).into_response()
    }
}
