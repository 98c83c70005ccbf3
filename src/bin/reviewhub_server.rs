//! Serves the review marketplace HTTP API.
//!
//! Usage:
//!
//! ```text
//! JWT_SECRET=... reviewhub-server
//! ```
//!
//! Configuration is read from the environment, after loading `.env` when
//! present. See [`reviewhub::api::AppConfig`] for the recognised variables.
//! On start-up the server repairs interrupted claims and, when
//! `SEED_ON_STARTUP` is set, seeds the sample postings into an empty
//! catalog.

use reviewhub::api::{AppConfig, AppState, BootstrapError, ConfigError, LogFormat, build_router};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "reviewhub=info,tower_http=info";

/// Errors that stop the server.
#[derive(Debug, Error)]
enum ServerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("start-up: {0}")]
    Bootstrap(#[from] BootstrapError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // A missing .env file is normal outside development.
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err.into());
    }

    let config = AppConfig::from_env().map_err(ServerError::from)?;
    init_tracing(config.log_format);
    run(config).await.map_err(Into::into)
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn run(config: AppConfig) -> Result<(), ServerError> {
    tracing::info!(?config, "loaded configuration");

    let state = AppState::from_config(&config).await?;
    state.prepare(config.seed_on_startup).await?;

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!(%address, "listening");

    axum::serve(listener, build_router(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(err) => tracing::error!(error = %err, "failed to listen for shutdown signal"),
    }
}
