pub mod sea_orm_entity;
pub mod security;
mod user_repository_sea_orm;

pub use user_repository_sea_orm::UserRepositorySeaOrm;
