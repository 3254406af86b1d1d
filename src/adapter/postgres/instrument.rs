use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use tracing::{debug, warn};

/// Awaits `query`, logging its duration and any failure under `statement`.
pub(super) async fn instrumented<T, E, F>(statement: &'static str, query: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let started = Instant::now();
    let result = query.await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match &result {
        Ok(_) => debug!(statement, elapsed_ms, "query completed"),
        Err(error) => warn!(statement, elapsed_ms, %error, "query failed"),
    }
    result
}
