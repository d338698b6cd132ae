use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::modules::user::application::ports::incoming::GetUserByEmailRequest;
use crate::shared::api::{codec, ApiResponse, JsonBody, StatusError};
use crate::AppState;

/// `GET /users` with the email in a JSON body.
pub async fn get_user_by_email_handler(
    data: web::Data<AppState>,
    payload: JsonBody<GetUserByEmailRequest>,
) -> Result<HttpResponse, StatusError> {
    let user = data.user_use_case.get_by_email(payload.into_inner()).await?;

    let body = ApiResponse::with_data(StatusCode::OK, "User retrieved successfully", user);
    Ok(codec::encode(StatusCode::OK, &body)?)
}
