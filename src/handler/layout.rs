use axum::Json;
use serde::Deserialize;

use crate::chart::{ChartLayout, compose};
use crate::domain::{EntityRecord, PositionedEntity};

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    entities: Vec<EntityRecord>,
}

/// POST /api/layout: runs the chart core over client-supplied positions.
pub async fn layout(Json(request): Json<LayoutRequest>) -> Json<ChartLayout> {
    let entities: Vec<PositionedEntity> = request.entities.into_iter().map(Into::into).collect();
    Json(compose(entities))
}
