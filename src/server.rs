//! HTTP server lifecycle.
//!
//! [`Server::start`] binds, serves in a background task and then waits for
//! whichever comes first: the caller's shutdown future, Ctrl-C, or the
//! background task ending on its own. A requested stop drains in-flight
//! requests for at most the configured shutdown timeout.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::shared::config::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Serving,
    Stopped,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Server is already serving")]
    AlreadyServing,

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Server stopped with an error: {0}")]
    Serve(#[source] io::Error),

    #[error("Server task failed: {0}")]
    Task(String),

    #[error("Graceful shutdown did not finish within {0:?}")]
    ShutdownTimeout(Duration),
}

#[derive(Debug)]
pub struct Server {
    host: String,
    port: u16,
    shutdown_timeout: Duration,
    state: Mutex<ServerState>,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl Default for Server {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}

impl Server {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            shutdown_timeout: config.shutdown_timeout,
            state: Mutex::new(ServerState::Idle),
            local_addr: Mutex::new(None),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn state(&self) -> ServerState {
        *lock(&self.state)
    }

    /// Address of the live listener; `None` unless serving.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *lock(&self.local_addr)
    }

    /// Serves the routes registered by `configure` until `shutdown` resolves,
    /// Ctrl-C arrives, or the server fails.
    pub async fn start<F, S>(&self, configure: F, shutdown: S) -> Result<(), ServerError>
    where
        F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
        S: Future<Output = ()>,
    {
        let previous = {
            let mut state = lock(&self.state);
            if *state == ServerState::Serving {
                return Err(ServerError::AlreadyServing);
            }
            std::mem::replace(&mut *state, ServerState::Serving)
        };

        let result = self.serve(configure, shutdown).await;

        *lock(&self.local_addr) = None;
        *lock(&self.state) = match &result {
            Err(ServerError::Bind { .. }) => previous,
            _ => ServerState::Stopped,
        };

        result
    }

    async fn serve<F, S>(&self, configure: F, shutdown: S) -> Result<(), ServerError>
    where
        F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
        S: Future<Output = ()>,
    {
        let addr = format!("{}:{}", self.host, self.port);
        let grace = self.shutdown_timeout;

        // actix force-closes whatever is still open once its whole-second
        // budget runs out; it never fires before our own grace period.
        let force_after = grace.as_secs() + u64::from(grace.subsec_nanos() > 0);
        let force_after = force_after.max(1);

        let http = HttpServer::new(move || App::new().configure(configure.clone()))
            .disable_signals()
            .shutdown_timeout(force_after)
            .bind(&addr)
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        *lock(&self.local_addr) = http.addrs().first().copied();

        let server = http.run();
        let handle = server.handle();
        let mut task = actix_web::rt::spawn(server);
        info!(addr = %addr, "Server listening");

        let interrupted = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Ctrl-C handler unavailable");
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = shutdown => info!("Shutdown requested"),
            _ = interrupted => info!("Interrupt received"),
            joined = &mut task => {
                warn!("Server task ended before shutdown was requested");
                return task_outcome(joined);
            }
        }

        let drained = tokio::time::timeout(grace, async {
            handle.stop(true).await;
            (&mut task).await
        })
        .await;

        match drained {
            Ok(joined) => {
                info!("Server stopped");
                task_outcome(joined)
            }
            Err(_) => {
                warn!(timeout = ?grace, "Graceful shutdown timed out, closing open connections");
                // Workers drop their connections when the actix budget expires.
                let budget = Duration::from_secs(force_after + 1);
                if tokio::time::timeout(budget, &mut task).await.is_err() {
                    task.abort();
                }
                Err(ServerError::ShutdownTimeout(grace))
            }
        }
    }
}

fn task_outcome(joined: Result<io::Result<()>, JoinError>) -> Result<(), ServerError> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(ServerError::Serve(e)),
        Err(e) => Err(ServerError::Task(e.to_string())),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
