// src/shared/api/response.rs
use actix_web::http::StatusCode;
use serde::Serialize;

/// Uniform body for every response: `{ "code", "message", "data" }`.
///
/// `data` is serialized as `null` when absent.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_data(status: StatusCode, message: &str, data: T) -> Self {
        ApiResponse {
            code: status.as_u16(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(status: StatusCode, message: &str) -> Self {
        ApiResponse {
            code: status.as_u16(),
            message: message.to_string(),
            data: None,
        }
    }
}
