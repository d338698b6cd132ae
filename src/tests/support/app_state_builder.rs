use std::sync::Arc;

use crate::modules::user::application::ports::incoming::UserUseCase;
use crate::tests::support::stubs::StubUserUseCase;
use crate::AppState;

pub struct TestAppStateBuilder {
    user_use_case: Arc<dyn UserUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            user_use_case: Arc::new(StubUserUseCase::default()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_user_use_case(mut self, use_case: Arc<dyn UserUseCase + Send + Sync>) -> Self {
        self.user_use_case = use_case;
        self
    }

    pub fn build(self) -> AppState {
        AppState {
            user_use_case: self.user_use_case,
        }
    }
}
