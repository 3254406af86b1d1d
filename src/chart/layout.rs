//! Single-pass pairwise repulsion for chart markers.
//!
//! Every unordered pair of positioned entities is visited once in index
//! order. Pairs closer than [`CLOSENESS_THRESHOLD`] (squared distance) are
//! pushed apart along the line joining them by [`REPULSION`] each. A moved
//! coordinate that would leave its quadrant is pulled back to just off the
//! axis, and both points are clamped to [`LAYOUT_BOUND`].
//!
//! Adjusted positions feed later pairs, so the result depends on input order,
//! and three or more near-coincident points may still overlap after the pass.

use crate::domain::{Point, PositionedEntity, sign};

/// Squared distance below which two markers are considered overlapping.
pub const CLOSENESS_THRESHOLD: f64 = 0.5;
/// Distance each marker of an overlapping pair is moved.
pub const REPULSION: f64 = 0.3;
/// Coordinates are clamped to `[-LAYOUT_BOUND, LAYOUT_BOUND]` after a move.
pub const LAYOUT_BOUND: f64 = 9.9;
/// Offset from the axis a coordinate is snapped to when it would cross.
pub const AXIS_MARGIN: f64 = 0.1;
/// Distance used when two points coincide exactly.
const MIN_DISTANCE: f64 = 0.001;

/// Runs one repulsion pass and returns the adjusted entities in input order.
///
/// Entities without a point are passed through untouched and take no part in
/// the comparison.
#[must_use]
pub fn resolve_layout(mut entities: Vec<PositionedEntity>) -> Vec<PositionedEntity> {
    let positioned: Vec<usize> = entities
        .iter()
        .enumerate()
        .filter_map(|(index, entity)| entity.point.map(|_| index))
        .collect();

    for (offset, &i) in positioned.iter().enumerate() {
        for &j in &positioned[offset + 1..] {
            let (Some(a), Some(b)) = (entities[i].point, entities[j].point) else {
                continue;
            };
            if let Some((moved_a, moved_b)) = repel(a, b) {
                entities[i].point = Some(moved_a);
                entities[j].point = Some(moved_b);
            }
        }
    }

    entities
}

/// Pushes `a` and `b` apart if they are too close; `None` when they are not.
#[must_use]
pub fn repel(a: Point, b: Point) -> Option<(Point, Point)> {
    if a.squared_distance(&b) >= CLOSENESS_THRESHOLD {
        return None;
    }

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        dist = MIN_DISTANCE;
    }
    let ux = dx / dist * REPULSION;
    let uy = dy / dist * REPULSION;

    let moved_a = settle(a, Point::new(a.x - ux, a.y - uy));
    let moved_b = settle(b, Point::new(b.x + ux, b.y + uy));
    Some((moved_a, moved_b))
}

/// Applies quadrant retention and the bounds clamp to a displaced point.
fn settle(before: Point, after: Point) -> Point {
    Point::new(
        retain_side(before.x, after.x),
        retain_side(before.y, after.y),
    )
    .clamp(-LAYOUT_BOUND, LAYOUT_BOUND)
}

fn retain_side(before: f64, after: f64) -> f64 {
    let original = sign(before);
    if original != 0.0 && sign(after) != original {
        original * AXIS_MARGIN
    } else {
        after
    }
}
