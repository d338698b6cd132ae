// src/shared/api/status_error.rs
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use std::error::Error as StdError;
use tracing::{error, warn};

use crate::shared::api::codec::{self, CodecError};
use crate::shared::api::ApiResponse;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Failure classes that reach the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error carrying its response status through the business layers.
///
/// The message is what clients see. For internal failures it is a generic
/// text and the underlying cause is only logged.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StatusError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<Cause>,
}

impl StatusError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn internal(cause: impl Into<Cause>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: "internal server error".to_string(),
            source: Some(cause.into()),
        }
    }

    pub fn with_source(mut self, cause: impl Into<Cause>) -> Self {
        self.source = Some(cause.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CodecError> for StatusError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encoding(_) => StatusError::internal(err),
            CodecError::UnsupportedMediaType(_) | CodecError::MalformedBody(_) => {
                StatusError::bad_request(err.to_string()).with_source(err)
            }
        }
    }
}

impl From<DbErr> for StatusError {
    fn from(err: DbErr) -> Self {
        StatusError::internal(err)
    }
}

impl ResponseError for StatusError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self.kind {
            ErrorKind::Internal => error!(
                status = status.as_u16(),
                cause = ?self.source,
                "request failed"
            ),
            _ => warn!(status = status.as_u16(), error = %self, "request rejected"),
        }

        codec::encode(status, &ApiResponse::message(status, &self.message))
            .unwrap_or_else(|_| plain_text_response(status, &self.to_string()))
    }
}

fn plain_text_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::plaintext())
        .body(message.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_kinds_map_to_statuses() {
        assert_eq!(StatusError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(StatusError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(StatusError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            StatusError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_hides_cause_but_keeps_source() {
        let err = StatusError::internal(DbErr::Custom("connection refused".to_string()));

        assert_eq!(err.to_string(), "internal server error");
        let source = err.source().expect("cause should be kept");
        assert!(source.to_string().contains("connection refused"));
    }

    #[test]
    fn test_codec_errors_are_client_errors() {
        let err: StatusError = CodecError::UnsupportedMediaType("text/plain".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("text/plain"));
    }

    #[actix_web::test]
    async fn test_error_response_uses_envelope() {
        let resp = StatusError::not_found("user not found").error_response();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["code"], 404);
        assert_eq!(value["message"], "user not found");
        assert!(value["data"].is_null());
    }

    #[actix_web::test]
    async fn test_plain_text_fallback_keeps_status_and_message() {
        let resp = plain_text_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error");

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"internal server error");
    }
}
