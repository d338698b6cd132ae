use async_trait::async_trait;
use bcrypt::{hash, DEFAULT_COST};

use crate::modules::user::application::ports::outgoing::{HashError, PasswordHasher};

/// bcrypt on the blocking pool so hashing never stalls a request worker.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptHasher {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Minimum bcrypt cost, for tests.
    pub fn fast() -> Self {
        Self::with_cost(4)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| HashError::HashFailed(e.to_string()))?
            .map_err(|e| HashError::HashFailed(e.to_string()))
    }
}
