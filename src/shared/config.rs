// src/shared/config.rs
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("Unknown database driver: {0}")]
    UnknownDriver(String),

    #[error("DATABASE_URL does not match the {0} driver")]
    DriverMismatch(DatabaseDriver),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseDriver {
    Postgres,
    MySql,
    Sqlite,
}

impl DatabaseDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseDriver::Postgres => "postgres",
            DatabaseDriver::MySql => "mysql",
            DatabaseDriver::Sqlite => "sqlite",
        }
    }

    fn accepts(&self, url: &str) -> bool {
        match self {
            DatabaseDriver::Postgres => {
                url.starts_with("postgres://") || url.starts_with("postgresql://")
            }
            DatabaseDriver::MySql => url.starts_with("mysql://"),
            DatabaseDriver::Sqlite => url.starts_with("sqlite:"),
        }
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DatabaseDriver::Postgres),
            "mysql" => Ok(DatabaseDriver::MySql),
            "sqlite" => Ok(DatabaseDriver::Sqlite),
            other => Err(ConfigError::UnknownDriver(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Loads a dotenv file into the process environment, then reads the
    /// configuration from it.
    ///
    /// Without an explicit path, `.env.{RUST_ENV}` is tried first and `.env`
    /// is the fallback. Variables already present in the environment win.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|source| ConfigError::File {
                    path: path.display().to_string(),
                    source,
                })?;
                info!(path = %path.display(), "Loaded configuration file");
            }
            None => {
                let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
                let env_file = format!(".env.{}", env);
                if dotenvy::from_filename(&env_file).is_err() {
                    dotenvy::dotenv().ok();
                }
                debug!(env = %env, "Loaded environment configuration");
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let driver: DatabaseDriver = required(&lookup, "DATABASE_DRIVER")?.parse()?;
        let url = required(&lookup, "DATABASE_URL")?;
        if !driver.accepts(&url) {
            return Err(ConfigError::DriverMismatch(driver));
        }

        let defaults = ServerConfig::default();

        Ok(Self {
            database: DatabaseConfig {
                driver,
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 100)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 10)?,
                max_lifetime: Duration::from_secs(parse_or(&lookup, "DB_MAX_LIFETIME_SECS", 3600)?),
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or(defaults.host),
                port: parse_or(&lookup, "PORT", defaults.port)?,
                shutdown_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "SHUTDOWN_TIMEOUT_SECS",
                    defaults.shutdown_timeout.as_secs(),
                )?),
            },
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
