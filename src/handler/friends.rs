use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::{coordinate, parse_fid};
use crate::app::AppState;
use crate::domain::Point;
use crate::error::ApiError;
use crate::service::{FriendsError, FriendsOutcome};

#[derive(Debug, Default, Deserialize)]
pub struct FriendsParams {
    fid: Option<String>,
    x: Option<String>,
    y: Option<String>,
}

/// GET /api/find-friends
pub async fn find_friends(
    State(state): State<AppState>,
    Query(params): Query<FriendsParams>,
) -> Result<Response, ApiError> {
    let fid = parse_fid(params.fid.as_deref())?
        .ok_or_else(|| ApiError::BadRequest("FID parameter is required".to_string()))?;
    let self_point = Point::from_parts(coordinate(params.x), coordinate(params.y));

    match state.friends().find_friends(fid, self_point).await {
        Ok(FriendsOutcome::NoFriends) => Ok(Json(json!({
            "message": "No friends found for this user",
            "friends": [],
        }))
        .into_response()),
        Ok(FriendsOutcome::Found(report)) => Ok(Json(report).into_response()),
        Err(error) => {
            let message = error.to_string();
            match error {
                FriendsError::Following(source) => {
                    error!(fid, error = %format!("{source:#}"), "following lookup failed");
                    Ok((
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": message,
                            "details": format!("{source:#}"),
                            "friends": [],
                        })),
                    )
                        .into_response())
                }
                FriendsError::Lookup(source) => {
                    Err(ApiError::upstream("Failed to find friends", source))
                }
            }
        }
    }
}
