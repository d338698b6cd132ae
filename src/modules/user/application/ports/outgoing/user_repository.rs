use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::user::application::domain::entities::User;
use crate::shared::db::UnitOfWork;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User not found")]
    NotFound,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Persistence for users.
///
/// Every operation takes an optional unit of work. With `Some`, the call joins
/// that transaction; with `None` it runs on the pooled connection.
/// Soft-deleted rows are never returned and never updated.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, uow: Option<&UnitOfWork>, user: &User)
        -> Result<(), UserRepositoryError>;

    /// Replaces name, email, password hash and timestamps of the stored row.
    async fn update(&self, uow: Option<&UnitOfWork>, user: &User)
        -> Result<(), UserRepositoryError>;

    async fn get_by_id(&self, uow: Option<&UnitOfWork>, id: Uuid)
        -> Result<User, UserRepositoryError>;

    async fn get_by_email(
        &self,
        uow: Option<&UnitOfWork>,
        email: &str,
    ) -> Result<User, UserRepositoryError>;
}
