pub mod modules;
pub mod server;
pub mod shared;

pub use modules::user;

use std::sync::Arc;

use crate::user::application::ports::incoming::UserUseCase;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub user_use_case: Arc<dyn UserUseCase + Send + Sync>,
}
