use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::app::AppState;
use crate::error::ApiError;

const METADATA_CACHE_CONTROL: &str = "public, max-age=86400";

/// GET /tokens/{token_id}: marketplace metadata for a minted token.
pub async fn token_metadata(
    State(state): State<AppState>,
    Path(token_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let metadata = state.mints().token_metadata(&token_id).await?;
    Ok(([(header::CACHE_CONTROL, METADATA_CACHE_CONTROL)], Json(metadata)))
}
