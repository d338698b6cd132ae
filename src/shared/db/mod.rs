// src/shared/db/mod.rs
mod unit_of_work;

pub use unit_of_work::UnitOfWork;

use futures::future::BoxFuture;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::shared::config::DatabaseConfig;

/// Shared connection pool plus the transaction entry point.
#[derive(Clone, Debug)]
pub struct DbPool {
    conn: Arc<DatabaseConnection>,
}

impl DbPool {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(config.max_lifetime)
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;
        info!(
            driver = %config.driver,
            max_connections = config.max_connections,
            "Connected to database"
        );

        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn: Arc::new(conn),
        }
    }

    pub fn connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.conn)
    }

    pub async fn begin(&self) -> Result<UnitOfWork, DbErr> {
        UnitOfWork::begin(&self.conn).await
    }

    /// Runs `f` inside a unit of work: commit on `Ok`, rollback on `Err`.
    ///
    /// A panic in `f` drops the unit of work, which rolls it back.
    pub async fn transaction<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c UnitOfWork) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: From<DbErr> + Send,
    {
        let uow = self.begin().await?;
        let result = f(&uow).await;

        match result {
            Ok(value) => {
                uow.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!(error = %rollback_err, "transaction rollback failed");
                }
                Err(err)
            }
        }
    }
}
