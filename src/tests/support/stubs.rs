use std::sync::Mutex;

use async_trait::async_trait;

use crate::modules::user::application::ports::incoming::{
    CreateUserRequest, GetUserByEmailRequest, GetUserResponse, UpdateUserRequest, UserUseCase,
};
use crate::shared::api::{ErrorKind, StatusError};

/// Use case stub that records what handlers pass in.
///
/// By default every call succeeds and `get_by_email` answers with an empty
/// user.
#[derive(Default)]
pub struct StubUserUseCase {
    failure: Option<(ErrorKind, String)>,
    user: Option<GetUserResponse>,
    creates: Mutex<Vec<CreateUserRequest>>,
    updates: Mutex<Vec<UpdateUserRequest>>,
}

impl StubUserUseCase {
    pub fn returning(user: GetUserResponse) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn failing(kind: ErrorKind, message: &str) -> Self {
        Self {
            failure: Some((kind, message.to_string())),
            ..Self::default()
        }
    }

    pub fn last_create(&self) -> Option<CreateUserRequest> {
        self.creates.lock().unwrap().last().cloned()
    }

    pub fn last_update(&self) -> Option<UpdateUserRequest> {
        self.updates.lock().unwrap().last().cloned()
    }

    fn check(&self) -> Result<(), StatusError> {
        match &self.failure {
            None => Ok(()),
            Some((ErrorKind::Internal, message)) => Err(StatusError::internal(message.clone())),
            Some((kind, message)) => Err(StatusError::new(*kind, message.clone())),
        }
    }
}

#[async_trait]
impl UserUseCase for StubUserUseCase {
    async fn create(&self, req: CreateUserRequest) -> Result<(), StatusError> {
        self.creates.lock().unwrap().push(req);
        self.check()
    }

    async fn get_by_email(
        &self,
        _req: GetUserByEmailRequest,
    ) -> Result<GetUserResponse, StatusError> {
        self.check()?;
        Ok(self.user.clone().unwrap_or_default())
    }

    async fn update(&self, req: UpdateUserRequest) -> Result<(), StatusError> {
        self.updates.lock().unwrap().push(req);
        self.check()
    }
}
