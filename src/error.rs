//! Typed errors and HTTP mapping.

use crate::provider::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    /// No list matched, or the method is not served. Rendered without a body.
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    /// The store rejected an operation. `details` always holds `argument` and `sql_msg`.
    #[error("{message}")]
    Database {
        message: String,
        details: Map<String, Value>,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    /// Database error echoing the argument and the store's diagnostic, plus any `extra` fields.
    pub fn database(
        message: impl Into<String>,
        argument: Option<&str>,
        err: &StoreError,
        mut extra: Map<String, Value>,
    ) -> Self {
        extra.insert("argument".into(), argument.map_or(Value::Null, |a| Value::String(a.into())));
        extra.insert("sql_msg".into(), err.sql_msg().map_or(Value::Null, Value::String));
        AppError::Database {
            message: message.into(),
            details: extra,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, details) = match self {
            AppError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            AppError::Database { ref details, .. } => (
                StatusCode::BAD_REQUEST,
                "database_error",
                Some(Value::Object(details.clone())),
            ),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
