// Path: crates/global-state-gateway/src/error.rs

use agora_types::config::SnapshotFailureStatus;
use agora_types::error::{ErrorCode, GlobalStateError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

/// A failed operation, ready to be rendered as a structured JSON error.
#[derive(Debug)]
pub struct AppError {
    operation: &'static str,
    error: GlobalStateError,
    snapshot_status: SnapshotFailureStatus,
}

impl AppError {
    pub fn new(
        operation: &'static str,
        error: GlobalStateError,
        snapshot_status: SnapshotFailureStatus,
    ) -> Self {
        Self {
            operation,
            error,
            snapshot_status,
        }
    }

    pub fn error(&self) -> &GlobalStateError {
        &self.error
    }

    pub fn status(&self) -> StatusCode {
        match (&self.error, self.snapshot_status) {
            (GlobalStateError::FeatureDisabled, _) => StatusCode::NOT_FOUND,
            (GlobalStateError::SnapshotUnavailable(_), SnapshotFailureStatus::Internal) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // The disabled gate must not reveal which operation was asked for.
        let message = match &self.error {
            GlobalStateError::FeatureDisabled => self.error.to_string(),
            other => format!("{}: {}", self.operation, other),
        };
        if status.is_server_error() {
            tracing::error!(target: "gateway", op = self.operation, error = %self.error, "operation failed");
        } else {
            tracing::debug!(target: "gateway", op = self.operation, error = %self.error, "operation rejected");
        }
        (
            status,
            Json(serde_json::json!({
                "error": { "code": self.error.code(), "message": message }
            })),
        )
            .into_response()
    }
}
