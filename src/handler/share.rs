use axum::Json;
use axum::extract::Query;
use serde::Deserialize;

use super::coordinate;
use crate::chart::{self, ShareIntent};
use crate::domain::{Category, Point};
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareParams {
    x: Option<String>,
    y: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
}

/// GET /api/share-intent
pub async fn share_intent(Query(params): Query<ShareParams>) -> Result<Json<ShareIntent>, ApiError> {
    let missing = || ApiError::BadRequest("Missing required parameters".to_string());

    let point = Point::from_parts(coordinate(params.x), coordinate(params.y)).ok_or_else(missing)?;
    let category = params
        .category
        .filter(|c| !c.trim().is_empty())
        .map(Category::new)
        .ok_or_else(missing)?;
    let image_url = params
        .image_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(missing)?;

    chart::share_intent(&category, point, &image_url)
        .map(Json)
        .map_err(|source| ApiError::upstream("Failed to build share intent", source))
}
