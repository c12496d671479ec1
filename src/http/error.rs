use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

use crate::store::StoreError;

/// Store failure carried to the HTTP boundary. Validation maps to 400,
/// storage trouble to 500; the raw storage message stays in the log.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> ApiError {
        ApiError(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match &self.0 {
            StoreError::Storage(detail) => {
                log::error!("storage failure: {}", detail);
                "storage failure".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// The exact wire shape the dashboard expects for an incomplete POST body.
pub fn missing_fields() -> ApiError {
    ApiError(StoreError::Validation("Missing fields".to_string()))
}
