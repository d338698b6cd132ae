pub mod password_hasher;
pub mod user_repository;

pub use password_hasher::{HashError, PasswordHasher};
pub use user_repository::{UserRepository, UserRepositoryError};
