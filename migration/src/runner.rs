use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::Migrator;

/// One-shot schema synchronisation for the user store.
///
/// `start` applies every pending migration and returns; the caller decides
/// how the process ends.
pub struct MigrationRunner {
    db: DatabaseConnection,
}

impl MigrationRunner {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn start(&self) -> Result<(), DbErr> {
        let pending = Migrator::get_pending_migrations(&self.db)
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to read migration status");
                e
            })?;

        info!(pending = pending.len(), "applying migrations");

        if let Err(e) = Migrator::up(&self.db, None).await {
            warn!(error = %e, "user migrate error");
            return Err(e);
        }

        info!("migrations applied");
        Ok(())
    }

    pub async fn stop(&self) {
        info!("migration runner stopped");
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn into_connection(self) -> DatabaseConnection {
        self.db
    }
}
