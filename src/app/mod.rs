mod router;
pub mod server;
mod state;
pub mod tracing;

pub use router::router;
pub use state::{AppState, Ports, ServiceSettings};

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::ServiceError;

/// Application entry point: tracing, configuration, adapters, server.
pub async fn run() -> Result<(), ServiceError> {
    tracing::init_tracing();

    let config = Config::from_env()?;
    ::tracing::info!(bind = %config.http_bind(), "Loaded configuration");

    let state = AppState::from_config(&config)?;
    let app = router(state);

    server::serve(app, config.http_bind(), CancellationToken::new()).await
}
