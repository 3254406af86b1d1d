use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::handler::{analyze, friends, health, layout, mint, share, token};

/// Builds the HTTP router with request tracing.
pub fn router(state: AppState) -> Router {
    let health_router = Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready));

    let api_router = Router::new()
        .route("/api/analyze-profile", get(analyze::analyze_profile))
        .route("/api/find-friends", get(friends::find_friends))
        .route("/api/layout", post(layout::layout))
        .route("/api/save-mint", post(mint::save_mint))
        .route("/api/get-latest-token-id", get(mint::latest_token_id))
        .route("/api/share-intent", get(share::share_intent))
        .route("/tokens/{token_id}", get(token::token_metadata));

    Router::new()
        .merge(health_router)
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
