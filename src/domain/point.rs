use serde::{Deserialize, Deserializer, Serialize};

/// Lower bound of both chart axes.
pub const DOMAIN_MIN: f64 = -10.0;
/// Upper bound of both chart axes.
pub const DOMAIN_MAX: f64 = 10.0;

/// A position on the alignment chart.
///
/// `x` runs Builder (-10) to Speculator (+10), `y` runs Decentralist (-10)
/// to Pragmatist (+10).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a point from two optional coordinates, rejecting anything that
    /// is missing or not finite.
    #[must_use]
    pub fn from_parts(x: Option<f64>, y: Option<f64>) -> Option<Self> {
        match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Self { x, y }),
            _ => None,
        }
    }

    #[must_use]
    pub fn squared_distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn clamp(self, min: f64, max: f64) -> Self {
        Self {
            x: self.x.clamp(min, max),
            y: self.y.clamp(min, max),
        }
    }

    #[must_use]
    pub fn in_domain(&self) -> bool {
        (DOMAIN_MIN..=DOMAIN_MAX).contains(&self.x) && (DOMAIN_MIN..=DOMAIN_MAX).contains(&self.y)
    }
}

/// Three-way sign: -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
#[must_use]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// A coordinate as it arrives from clients or stored rows: either a JSON
/// number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// The numeric value, if the coordinate holds a finite number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// Booleans, objects and the like collapse into an unparseable text value so
// a single bad field never rejects the whole payload.
impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_maps_zero_to_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.2), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn coordinate_parses_numbers_and_numeric_strings() {
        assert_eq!(Coordinate::Number(2.5).value(), Some(2.5));
        assert_eq!(Coordinate::from(" -3.75 ").value(), Some(-3.75));
        assert_eq!(Coordinate::from("abc").value(), None);
        assert_eq!(Coordinate::from("").value(), None);
        assert_eq!(Coordinate::Number(f64::NAN).value(), None);
    }

    #[test]
    fn coordinate_deserializes_from_mixed_json() {
        let values: Vec<Coordinate> =
            serde_json::from_str(r#"[1.5, "2.25", true, null]"#).expect("valid json");
        assert_eq!(values[0].value(), Some(1.5));
        assert_eq!(values[1].value(), Some(2.25));
        assert_eq!(values[2].value(), None);
        assert_eq!(values[3].value(), None);
    }

    #[test]
    fn from_parts_requires_both_finite_coordinates() {
        assert_eq!(Point::from_parts(Some(1.0), Some(2.0)), Some(Point::new(1.0, 2.0)));
        assert_eq!(Point::from_parts(Some(1.0), None), None);
        assert_eq!(Point::from_parts(Some(f64::INFINITY), Some(0.0)), None);
    }

    #[test]
    fn clamp_limits_both_axes() {
        let p = Point::new(12.0, -15.0).clamp(-9.9, 9.9);
        assert_eq!(p, Point::new(9.9, -9.9));
        assert!(p.in_domain());
    }
}
