use std::time::Duration;

use thiserror::Error;

/// Port probed when `HTTP_BIND` is unset or unparsable.
const DEFAULT_HTTP_PORT: u16 = 9700;

#[derive(Debug, Error)]
#[error("Healthcheck failed: {0}")]
pub struct HealthcheckError(String);

/// Probes the liveness endpoint of the local server.
///
/// # Errors
/// When the request fails or the endpoint does not answer 2xx.
pub async fn healthcheck() -> Result<(), HealthcheckError> {
    let port = std::env::var("HTTP_BIND")
        .ok()
        .and_then(|bind| bind.parse::<std::net::SocketAddr>().ok())
        .map_or(DEFAULT_HTTP_PORT, |addr| addr.port());
    healthcheck_with_port(port).await
}

/// # Errors
/// When the request fails or the endpoint does not answer 2xx.
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(|e| HealthcheckError(format!("Failed to create HTTP client: {e}")))?;

    let url = format!("http://127.0.0.1:{port}/health/live");
    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| HealthcheckError(format!("Request failed: {e}")))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(HealthcheckError(format!(
            "Health endpoint returned status: {}",
            resp.status()
        )))
    }
}
