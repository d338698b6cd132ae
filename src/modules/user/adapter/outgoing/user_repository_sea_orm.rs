use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::user::application::domain::entities::User;
use crate::modules::user::application::ports::outgoing::{UserRepository, UserRepositoryError};
use crate::shared::db::UnitOfWork;

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositorySeaOrm {
    db: Arc<DatabaseConnection>,
}

impl UserRepositorySeaOrm {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn insert_with<C>(conn: &C, user: &User) -> Result<(), UserRepositoryError>
    where
        C: ConnectionTrait,
    {
        let model = UserModel::from(user);
        let active = UserActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            email: Set(model.email),
            password_hash: Set(model.password_hash),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
            deleted_at: Set(model.deleted_at),
        };

        UserEntity::insert(active)
            .exec_without_returning(conn)
            .await
            .map_err(map_write_error)?;

        Ok(())
    }

    async fn update_with<C>(conn: &C, user: &User) -> Result<(), UserRepositoryError>
    where
        C: ConnectionTrait,
    {
        let model = UserModel::from(user);
        let active = UserActiveModel {
            id: NotSet,
            name: Set(model.name),
            email: Set(model.email),
            password_hash: Set(model.password_hash),
            created_at: NotSet,
            updated_at: Set(model.updated_at),
            deleted_at: Set(model.deleted_at),
        };

        let result = UserEntity::update_many()
            .set(active)
            .filter(Column::Id.eq(user.id))
            .filter(Column::DeletedAt.is_null())
            .exec(conn)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn find_one<C>(
        conn: &C,
        filter: sea_orm::Condition,
    ) -> Result<User, UserRepositoryError>
    where
        C: ConnectionTrait,
    {
        UserEntity::find()
            .filter(filter)
            .filter(Column::DeletedAt.is_null())
            .one(conn)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .map(User::from)
            .ok_or(UserRepositoryError::NotFound)
    }
}

fn map_write_error(err: DbErr) -> UserRepositoryError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        return UserRepositoryError::AlreadyExists;
    }

    let err_str = err.to_string().to_lowercase();
    if err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("duplicate entry")
        || err_str.contains("unique constraint")
    {
        return UserRepositoryError::AlreadyExists;
    }

    UserRepositoryError::DatabaseError(err.to_string())
}

#[async_trait]
impl UserRepository for UserRepositorySeaOrm {
    async fn create(
        &self,
        uow: Option<&UnitOfWork>,
        user: &User,
    ) -> Result<(), UserRepositoryError> {
        match uow {
            Some(uow) => Self::insert_with(uow.connection(), user).await,
            None => Self::insert_with(self.db.as_ref(), user).await,
        }
    }

    async fn update(
        &self,
        uow: Option<&UnitOfWork>,
        user: &User,
    ) -> Result<(), UserRepositoryError> {
        match uow {
            Some(uow) => Self::update_with(uow.connection(), user).await,
            None => Self::update_with(self.db.as_ref(), user).await,
        }
    }

    async fn get_by_id(
        &self,
        uow: Option<&UnitOfWork>,
        id: Uuid,
    ) -> Result<User, UserRepositoryError> {
        let filter = sea_orm::Condition::all().add(Column::Id.eq(id));
        match uow {
            Some(uow) => Self::find_one(uow.connection(), filter).await,
            None => Self::find_one(self.db.as_ref(), filter).await,
        }
    }

    async fn get_by_email(
        &self,
        uow: Option<&UnitOfWork>,
        email: &str,
    ) -> Result<User, UserRepositoryError> {
        let filter = sea_orm::Condition::all().add(Column::Email.eq(email));
        match uow {
            Some(uow) => Self::find_one(uow.connection(), filter).await,
            None => Self::find_one(self.db.as_ref(), filter).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};

    fn create_test_user_model(email: &str) -> UserModel {
        let now = Utc::now().fixed_offset();

        UserModel {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_user() -> User {
        User::new(
            "Test User".to_string(),
            "test@example.com".to_string(),
            "$2b$12$hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let result = repo.create(None, &sample_user()).await;

        assert!(result.is_ok(), "Expected success, got {:?}", result);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors(vec![DbErr::Exec(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ))])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let result = repo.create(None, &sample_user()).await;

        assert_eq!(result, Err(UserRepositoryError::AlreadyExists));
    }

    #[tokio::test]
    async fn test_create_user_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors(vec![DbErr::Exec(RuntimeErr::Internal(
                "connection reset".to_string(),
            ))])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let result = repo.create(None, &sample_user()).await;

        match result {
            Err(UserRepositoryError::DatabaseError(msg)) => {
                assert!(msg.contains("connection reset"))
            }
            other => panic!("Expected DatabaseError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_by_email_found() {
        let model = create_test_user_model("test@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let user = repo.get_by_email(None, "test@example.com").await.unwrap();

        assert_eq!(user.id, model.id);
        assert_eq!(user.name, "Test User");
        assert_eq!(user.email, "test@example.com");
        assert!(user.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_get_by_email_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let result = repo.get_by_email(None, "nobody@example.com").await;

        assert_eq!(result, Err(UserRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_get_by_id_skips_soft_deleted_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<UserModel>::new()])
            .into_connection();

        let db = Arc::new(db);
        let repo = UserRepositorySeaOrm::new(Arc::clone(&db));
        let id = Uuid::new_v4();

        let result = repo.get_by_id(None, id).await;
        assert_eq!(result, Err(UserRepositoryError::NotFound));

        drop(repo);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let log = format!("{:?}", log);
        assert!(log.contains("deleted_at"), "unexpected log: {log}");
        assert!(log.contains("IS NULL"), "unexpected log: {log}");
    }

    #[tokio::test]
    async fn test_get_by_email_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("timeout".to_string())])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let result = repo.get_by_email(None, "test@example.com").await;

        assert!(matches!(result, Err(UserRepositoryError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_update_user_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let result = repo.update(None, &sample_user()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = UserRepositorySeaOrm::new(Arc::new(db));

        let result = repo.update(None, &sample_user()).await;

        assert_eq!(result, Err(UserRepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_create_joins_unit_of_work() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let db = Arc::new(db);
        let repo = UserRepositorySeaOrm::new(Arc::clone(&db));

        let uow = UnitOfWork::begin(&db).await.unwrap();
        repo.create(Some(&uow), &sample_user()).await.unwrap();
        uow.commit().await.unwrap();

        drop(repo);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 1, "insert should run inside the open transaction");
        let log = format!("{:?}", log);
        assert!(log.contains("BEGIN"));
        assert!(log.contains("INSERT"));
        assert!(log.contains("COMMIT"));
    }
}
