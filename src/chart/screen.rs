use serde::Serialize;

use crate::domain::{DOMAIN_MAX, DOMAIN_MIN, Point};

/// Marker offset inside the chart box, in percent of its width/height.
/// `top` grows downward, so the y axis is inverted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPosition {
    pub left: f64,
    pub top: f64,
}

impl ScreenPosition {
    #[must_use]
    pub fn from_point(point: Point) -> Self {
        let span = DOMAIN_MAX - DOMAIN_MIN;
        Self {
            left: (point.x - DOMAIN_MIN) / span * 100.0,
            top: (DOMAIN_MAX - point.y) / span * 100.0,
        }
    }
}
