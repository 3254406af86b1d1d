use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use super::parse_fid;
use crate::app::AppState;
use crate::error::ApiError;
use crate::service::{AnalyzeRequest, ProfileAnalysis};

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    fid: Option<String>,
    limit: Option<String>,
    cursor: Option<String>,
    include_replies: Option<String>,
}

/// GET /api/analyze-profile
pub async fn analyze_profile(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<ProfileAnalysis>, ApiError> {
    let limit = match params.limit.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => Some(
            raw.parse::<u32>()
                .map_err(|_| ApiError::BadRequest("Invalid limit".to_string()))?,
        ),
    };

    let request = AnalyzeRequest {
        fid: parse_fid(params.fid.as_deref())?,
        limit,
        cursor: params.cursor.filter(|c| !c.is_empty()),
        include_replies: params.include_replies.as_deref() == Some("true"),
    };

    state
        .analysis()
        .analyze(request)
        .await
        .map(Json)
        .map_err(|source| ApiError::upstream("Failed to analyze profile", source))
}
