//! Pure chart computation: calibrating classifier output and laying out
//! markers. Nothing in here performs I/O.

pub mod layout;
pub mod normalize;
pub mod quadrant;
pub mod screen;
pub mod share;

use serde::Serialize;

use crate::domain::PositionedEntity;

pub use layout::resolve_layout;
pub use normalize::{Calibrated, amplify, calibrate, normalize, reconcile_signs};
pub use quadrant::{Quadrant, QuadrantBuckets, group_by_quadrant};
pub use screen::ScreenPosition;
pub use share::{ShareIntent, share_intent, share_text};

/// An entity after layout, with where to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEntity {
    #[serde(flatten)]
    pub entity: PositionedEntity,
    /// `None` for entities without a point; the renderer skips them.
    pub screen: Option<ScreenPosition>,
}

/// Everything the renderer needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub entities: Vec<PlacedEntity>,
    pub quadrants: QuadrantBuckets,
}

/// Resolves overlaps, groups by quadrant and maps to screen space.
#[must_use]
pub fn compose(entities: Vec<PositionedEntity>) -> ChartLayout {
    let resolved = resolve_layout(entities);
    let quadrants = group_by_quadrant(&resolved);
    let entities = resolved
        .into_iter()
        .map(|entity| PlacedEntity {
            screen: entity.point.map(ScreenPosition::from_point),
            entity,
        })
        .collect();

    ChartLayout {
        entities,
        quadrants,
    }
}
