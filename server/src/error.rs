//! HTTP error responses.
//!
//! Every failure leaves the server as `{"error": "<message>"}`. Caller
//! mistakes carry a specific message; infrastructure failures are logged
//! here and answered with a generic one.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use todo_core::StoreError;
use tracing::{debug, error};
use utoipa::ToSchema;

pub const NOT_FOUND_MESSAGE: &str = "Todo not found";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing title.
    #[error("{0}")]
    BadRequest(String),

    /// The body could not be read as JSON. Oversized bodies keep axum's 413;
    /// everything else is a 400.
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Todo not found")]
    NotFound,

    #[error("store failure: {0}")]
    Internal(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => ApiError::BadRequest(message),
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Internal(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::InvalidBody {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::BadRequest(message) | ApiError::InvalidBody { message, .. } => {
                debug!(%status, %message, "rejected request");
                message.clone()
            }
            ApiError::NotFound => NOT_FOUND_MESSAGE.to_string(),
            ApiError::Internal(err) => {
                error!(error = %err, "request failed");
                INTERNAL_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
