use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::modules::user::application::ports::incoming::UpdateUserRequest;
use crate::shared::api::{codec, ApiResponse, JsonBody, StatusError};
use crate::AppState;

/// `PUT /users`
pub async fn update_user_handler(
    data: web::Data<AppState>,
    payload: JsonBody<UpdateUserRequest>,
) -> Result<HttpResponse, StatusError> {
    data.user_use_case.update(payload.into_inner()).await?;

    let body = ApiResponse::message(StatusCode::OK, "User updated successfully");
    Ok(codec::encode(StatusCode::OK, &body)?)
}
