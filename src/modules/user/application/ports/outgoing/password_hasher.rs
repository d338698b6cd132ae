use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("Failed to hash password: {0}")]
    HashFailed(String),
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;
}
