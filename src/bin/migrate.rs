use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use migration::MigrationRunner;
use sea_orm::Database;
use tracing::{error, info};

use user_api::shared::config::AppConfig;
use user_api::shared::telemetry;

#[derive(Debug, Parser)]
#[command(name = "migrate", about = "Apply pending database migrations")]
struct Cli {
    /// Dotenv file to load instead of `.env.{RUST_ENV}` / `.env`.
    #[arg(long)]
    config: Option<PathBuf>,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let db = Database::connect(config.database.url.as_str())
        .await
        .context("failed to connect to database")?;

    let runner = MigrationRunner::new(db);
    runner.start().await.context("migration failed")?;
    runner.stop().await;

    Ok(())
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> ExitCode {
    telemetry::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => {
            info!("Migrations complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = ?e, "Migration failed");
            ExitCode::FAILURE
        }
    }
}
