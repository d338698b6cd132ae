use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::modules::user::application::domain::entities::User;
use crate::modules::user::application::ports::incoming::{
    CreateUserRequest, GetUserByEmailRequest, GetUserResponse, UpdateUserRequest, UserUseCase,
};
use crate::modules::user::application::ports::outgoing::{
    PasswordHasher, UserRepository, UserRepositoryError,
};
use crate::shared::api::StatusError;
use crate::shared::db::DbPool;

const USER_ALREADY_EXISTS: &str = "user already exists";
const USER_NOT_FOUND: &str = "user not found";

pub struct UserService<R>
where
    R: UserRepository + Clone + 'static,
{
    db: DbPool,
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R> UserService<R>
where
    R: UserRepository + Clone + 'static,
{
    pub fn new(db: DbPool, repository: R, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            db,
            repository,
            hasher,
        }
    }
}

fn lookup_error(err: UserRepositoryError) -> StatusError {
    match err {
        UserRepositoryError::NotFound => StatusError::not_found(USER_NOT_FOUND),
        other => StatusError::internal(other),
    }
}

#[async_trait]
impl<R> UserUseCase for UserService<R>
where
    R: UserRepository + Clone + 'static,
{
    async fn create(&self, req: CreateUserRequest) -> Result<(), StatusError> {
        match self.repository.get_by_email(None, &req.email).await {
            Ok(_) => return Err(StatusError::conflict(USER_ALREADY_EXISTS)),
            Err(UserRepositoryError::NotFound) => {}
            Err(other) => return Err(StatusError::internal(other)),
        }

        let password_hash = self
            .hasher
            .hash_password(&req.password)
            .await
            .map_err(StatusError::internal)?;

        let user = User::new(req.name, req.email, password_hash);

        self.repository
            .create(None, &user)
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent create for the same email.
                UserRepositoryError::AlreadyExists => StatusError::conflict(USER_ALREADY_EXISTS),
                other => StatusError::internal(other),
            })?;

        info!(user_id = %user.id, "User created");
        Ok(())
    }

    async fn get_by_email(
        &self,
        req: GetUserByEmailRequest,
    ) -> Result<GetUserResponse, StatusError> {
        let user = self
            .repository
            .get_by_email(None, &req.email)
            .await
            .map_err(lookup_error)?;

        debug!(user_id = %user.id, "User retrieved");
        Ok(GetUserResponse {
            name: user.name,
            email: user.email,
        })
    }

    async fn update(&self, req: UpdateUserRequest) -> Result<(), StatusError> {
        let repository = self.repository.clone();

        self.db
            .transaction::<_, (), StatusError>(move |uow| {
                Box::pin(async move {
                    let mut user = repository
                        .get_by_email(Some(uow), &req.email)
                        .await
                        .map_err(lookup_error)?;

                    user.rename(req.name);

                    repository
                        .update(Some(uow), &user)
                        .await
                        .map_err(lookup_error)?;

                    info!(user_id = %user.id, "User updated");
                    Ok(())
                })
            })
            .await
    }
}
