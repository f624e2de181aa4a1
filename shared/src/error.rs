use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid time format: {0} (expected HH:MM)")]
    InvalidTimeFormat(String),
    #[error("booking duration must cover at least one slot")]
    InvalidDuration,
    #[error("start time {0} is not aligned to the slot grid")]
    UnalignedSlot(String),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("room not found: {0}")]
    RoomNotFound(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("requested time falls outside the business day: {0}")]
    SlotOutOfRange(String),
    #[error("slot is no longer available: {0}")]
    SlotConflict(String),
    #[error("booking store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error(transparent)]
    InternalError(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            AppError::InvalidTimeFormat(_)
            | AppError::InvalidDuration
            | AppError::UnalignedSlot(_)
            | AppError::MissingFields(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RoomNotFound(_) | AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SlotOutOfRange(_) | AppError::UnprocessableEntity(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::SlotConflict(_) => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "unexpected error happened"
            );
        } else {
            tracing::warn!(
                error.cause_chain = ?self,
                error.message = %self,
                "request rejected"
            );
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
