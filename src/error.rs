use axum::{
    http::{Method, StatusCode},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invalid request body")]
    InvalidBody(#[source] serde_json::Error),

    #[error("title and content are required")]
    MissingFields(Vec<&'static str>),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::InvalidBody(_) | ApiError::MissingFields(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: ApiError) -> (StatusCode, Json<serde_json::Value>) {
        let status = err.status();
        let body = match &err {
            ApiError::MissingFields(fields) => json!({
                "error": err.to_string(),
                "fields": fields,
            }),
            ApiError::InvalidBody(source) => {
                tracing::debug!(error = %source, "rejected request body");
                json!({ "error": err.to_string() })
            }
            ApiError::Store(StoreError::Internal(detail)) => {
                tracing::error!(%detail, "store failure");
                json!({ "error": "internal server error" })
            }
            _ => json!({ "error": err.to_string() }),
        };

        (status, Json(body))
    }
}
