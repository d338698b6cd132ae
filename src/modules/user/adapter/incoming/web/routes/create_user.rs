use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::modules::user::application::ports::incoming::CreateUserRequest;
use crate::shared::api::{codec, ApiResponse, JsonBody, StatusError};
use crate::AppState;

/// `POST /users`
pub async fn create_user_handler(
    data: web::Data<AppState>,
    payload: JsonBody<CreateUserRequest>,
) -> Result<HttpResponse, StatusError> {
    data.user_use_case.create(payload.into_inner()).await?;

    let body = ApiResponse::message(StatusCode::CREATED, "User created successfully");
    Ok(codec::encode(StatusCode::CREATED, &body)?)
}
