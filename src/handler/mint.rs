use axum::Json;
use axum::extract::State;

use crate::app::AppState;
use crate::error::ApiError;
use crate::service::{LatestToken, SaveMintRequest, SavedMint};

/// POST /api/save-mint
pub async fn save_mint(
    State(state): State<AppState>,
    Json(request): Json<SaveMintRequest>,
) -> Result<Json<SavedMint>, ApiError> {
    Ok(Json(state.mints().save_mint(request).await?))
}

/// GET /api/get-latest-token-id
pub async fn latest_token_id(State(state): State<AppState>) -> Result<Json<LatestToken>, ApiError> {
    Ok(Json(state.mints().latest_token_id().await?))
}
