use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::api::ErrorResponse;
use shared::{InventoryError, WagerError};
use validator::ValidationErrors;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Wager(WagerError),
    Inventory(InventoryError),
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<WagerError> for ApiError {
    fn from(err: WagerError) -> Self {
        ApiError::Wager(err)
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        ApiError::Inventory(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Wager(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Wager(WagerError::SpinInProgress) => StatusCode::CONFLICT,
            ApiError::Wager(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Inventory(e) => match e {
                InventoryError::ItemNotFound(_) | InventoryError::BoosterNotFound(_) => StatusCode::NOT_FOUND,
                InventoryError::NotSellable(_) => StatusCode::BAD_REQUEST,
                InventoryError::BoosterAlreadyActive(_) => StatusCode::CONFLICT,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(msg) => format!("Invalid request: {}", msg),
            ApiError::Wager(e) => e.to_string(),
            ApiError::Inventory(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.message());
        }
        let body = ErrorResponse { success: false, error: self.message() };
        (status, Json(body)).into_response()
    }
}
