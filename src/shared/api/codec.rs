// src/shared/api/codec.rs
//! JSON request decoding and response encoding.
//!
//! Requests must declare `application/json`. An empty body decodes to the
//! target's `Default` value instead of failing.

use actix_web::dev::Payload;
use actix_web::http::header::{ContentType, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api::StatusError;

pub const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Invalid content type: {0}")]
    UnsupportedMediaType(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Failed to encode response: {0}")]
    Encoding(#[source] serde_json::Error),
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media_type| media_type.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
        .unwrap_or(false)
}

pub fn decode<T>(content_type: Option<&str>, body: &[u8]) -> Result<T, CodecError>
where
    T: DeserializeOwned + Default,
{
    let content_type = content_type.unwrap_or_default();
    if !is_json(content_type) {
        return Err(CodecError::UnsupportedMediaType(content_type.to_string()));
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(CodecError::MalformedBody)
}

pub fn encode<T>(status: StatusCode, value: &T) -> Result<HttpResponse, CodecError>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(value).map_err(CodecError::Encoding)?;

    Ok(HttpResponse::build(status)
        .content_type(ContentType::json())
        .body(body))
}

/// Extractor that runs [`decode`] over the request body.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for JsonBody<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = StatusError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = Bytes::from_request(req, payload);

        Box::pin(async move {
            if !content_type.as_deref().map(is_json).unwrap_or(false) {
                return Err(CodecError::UnsupportedMediaType(content_type.unwrap_or_default()).into());
            }

            let body = body
                .await
                .map_err(|e| StatusError::bad_request(format!("Unreadable request body: {e}")))?;

            decode(content_type.as_deref(), &body)
                .map(JsonBody)
                .map_err(StatusError::from)
        })
    }
}
