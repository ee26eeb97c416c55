use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::store::StoreError;

// ============================================================================
// API Error - Store Error to HTTP Status Mapping
// ============================================================================

/// Wrapper giving store errors an HTTP representation.
///
/// Malformed request bodies never reach this type; the `Json` extractor
/// rejects them with 400 before a handler runs.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub StoreError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::ConstraintViolation(_) => StatusCode::CONFLICT,
            StoreError::Connectivity(_) | StoreError::Scan(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.0.to_string(),
        }))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
