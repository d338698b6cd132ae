use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use actix_web::web;
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use user_api::server::Server;
use user_api::shared::config::AppConfig;
use user_api::shared::db::DbPool;
use user_api::shared::telemetry;
use user_api::user::adapter::incoming::routes::init_routes;
use user_api::user::adapter::outgoing::security::BcryptHasher;
use user_api::user::adapter::outgoing::UserRepositorySeaOrm;
use user_api::user::application::services::UserService;
use user_api::AppState;

#[derive(Debug, Parser)]
#[command(name = "user-api", about = "User management HTTP API")]
struct Cli {
    /// Dotenv file to load instead of `.env.{RUST_ENV}` / `.env`.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start(cli: Cli) -> anyhow::Result<()> {
    telemetry::init();
    info!("Starting application...");

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let db = DbPool::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let user_repo = UserRepositorySeaOrm::new(db.connection());
    let user_service = UserService::new(db.clone(), user_repo, Arc::new(BcryptHasher::default()));

    let state = AppState {
        user_use_case: Arc::new(user_service),
    };

    let server = Server::new(&config.server);
    server
        .start(
            move |cfg: &mut web::ServiceConfig| {
                cfg.app_data(web::Data::new(state.clone()));
                init_routes(cfg);
            },
            std::future::pending(),
        )
        .await?;

    info!("Application stopped");
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Application failed");
            eprintln!("Error starting app: {e:#}");
            ExitCode::FAILURE
        }
    }
}
