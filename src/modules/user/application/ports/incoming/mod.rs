pub mod user_use_case;

pub use user_use_case::{
    CreateUserRequest, GetUserByEmailRequest, GetUserResponse, UpdateUserRequest, UserUseCase,
};
