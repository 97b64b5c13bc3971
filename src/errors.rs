use crate::actions::ActionError;
use crate::storage::StorageError;
use axum::http::StatusCode;
use tracing::{error, warn};

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ActionError> for AppError {
    fn from(err: ActionError) -> Self {
        warn!("rejected action: {err}");
        let status = match err {
            ActionError::EmptyName => StatusCode::BAD_REQUEST,
            ActionError::NoSuchItem { .. } => StatusCode::NOT_FOUND,
            ActionError::ResetNotConfirmed => StatusCode::CONFLICT,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        error!("failed to persist data file: {err}");
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
