use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::api::StatusError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GetUserByEmailRequest {
    pub email: String,
}

/// `email` selects the user. `password` is accepted but not applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetUserResponse {
    pub name: String,
    pub email: String,
}

#[async_trait]
pub trait UserUseCase: Send + Sync {
    async fn create(&self, req: CreateUserRequest) -> Result<(), StatusError>;
    async fn get_by_email(&self, req: GetUserByEmailRequest)
        -> Result<GetUserResponse, StatusError>;
    async fn update(&self, req: UpdateUserRequest) -> Result<(), StatusError>;
}
