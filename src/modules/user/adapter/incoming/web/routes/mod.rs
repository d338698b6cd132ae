mod create_user;
mod get_user_by_email;
mod update_user;

pub use create_user::create_user_handler;
pub use get_user_by_email::get_user_by_email_handler;
pub use update_user::update_user_handler;
