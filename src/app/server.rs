use std::net::SocketAddr;

use axum::Router;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ServiceError;

/// Serves `app` on `bind` until SIGINT/SIGTERM or `shutdown` is cancelled.
pub async fn serve(
    app: Router,
    bind: SocketAddr,
    shutdown: CancellationToken,
) -> Result<(), ServiceError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|source| ServiceError::Bind {
            address: bind.to_string(),
            source,
        })?;
    info!("Server listening on {}", listener.local_addr()?);

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn stops_when_token_is_cancelled() {
        let app = Router::new().route("/", get(|| async { "ok" }));
        let token = CancellationToken::new();
        token.cancel();

        let bind: SocketAddr = "127.0.0.1:0".parse().expect("addr");
        serve(app, bind, token).await.expect("clean shutdown");
    }

    #[tokio::test]
    async fn bind_failure_names_the_address() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener");
        let bind = taken.local_addr().expect("addr");

        let error = serve(Router::new(), bind, CancellationToken::new())
            .await
            .expect_err("port in use");
        assert!(error.to_string().contains(&bind.to_string()));
    }
}
