//! Classifier normalization: sign reconciliation followed by amplification.
//!
//! Raw classifier scores cluster near the origin and sometimes disagree with
//! the category they come with. [`normalize`] makes the signs agree with the
//! category and then spreads magnitudes toward (but never onto) the chart edge.

use tracing::warn;

use crate::domain::{CategoryLabel, ClassificationResult, Point, RawClassification, sign};

/// Largest magnitude amplification can produce.
pub const AMPLIFIED_MAX: f64 = 9.0;

/// Magnitudes above this take the steep branch.
const STRONG_THRESHOLD: f64 = 3.0;
const STRONG_BASE: f64 = 5.0;
const STRONG_SLOPE: f64 = 1.3;
const MILD_FLOOR: f64 = 3.0;
const MILD_SLOPE: f64 = 1.5;

/// Outcome of [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibrated {
    pub point: Point,
    /// `None` when the category could not be parsed; signs were then left as-is.
    pub label: Option<CategoryLabel>,
}

/// Forces `value` onto the side of the axis `required` (-1 or 1) asks for.
/// Zero stays zero.
fn align_sign(value: f64, required: f64) -> f64 {
    if sign(value) == -required {
        required * value.abs()
    } else {
        value
    }
}

/// Makes the coordinates agree with the label's required signs.
#[must_use]
pub fn reconcile_signs(label: CategoryLabel, x: f64, y: f64) -> (f64, f64) {
    (
        align_sign(x, label.disposition.required_sign()),
        align_sign(y, label.stance.required_sign()),
    )
}

/// Sign-preserving, monotonic stretch of one coordinate.
///
/// Non-finite input is treated as zero.
#[must_use]
pub fn amplify(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let magnitude = value.abs();
    let amplified = if magnitude > STRONG_THRESHOLD {
        AMPLIFIED_MAX.min(STRONG_BASE + (magnitude - STRONG_THRESHOLD) * STRONG_SLOPE)
    } else if magnitude > 0.0 {
        MILD_FLOOR.max(magnitude * MILD_SLOPE)
    } else {
        return 0.0;
    };
    sign(value) * amplified
}

/// Single-pass calibration of a raw category and coordinate pair.
///
/// Must not be applied to its own output: amplification is not idempotent.
#[must_use]
pub fn normalize(raw_category: &str, raw_x: f64, raw_y: f64) -> Calibrated {
    let label = match raw_category.parse::<CategoryLabel>() {
        Ok(label) => Some(label),
        Err(error) => {
            warn!(%error, "leaving coordinate signs unreconciled");
            None
        }
    };

    let (x, y) = label.map_or((raw_x, raw_y), |label| reconcile_signs(label, raw_x, raw_y));

    Calibrated {
        point: Point::new(amplify(x), amplify(y)),
        label,
    }
}

/// Calibrates a whole classifier response, keeping its category text and
/// narrative fields unchanged.
#[must_use]
pub fn calibrate(raw: RawClassification) -> ClassificationResult {
    let Calibrated { point, .. } = normalize(raw.category.as_str(), raw.x_position, raw.y_position);
    ClassificationResult {
        x_position: point.x,
        y_position: point.y,
        category: raw.category,
        narrative: raw.narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Disposition, Narrative, Stance};
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn builder_pragmatist_example() {
        let out = normalize("Builder-Pragmatist", 6.0, -2.0);
        assert!(approx(out.point.x, -8.9), "x = {}", out.point.x);
        assert!(approx(out.point.y, 3.0), "y = {}", out.point.y);
        assert_eq!(
            out.label,
            Some(CategoryLabel::new(Disposition::Builder, Stance::Pragmatist))
        );
    }

    #[test]
    fn amplify_branches() {
        assert_eq!(amplify(0.0), 0.0);
        assert!(approx(amplify(1.0), 3.0));
        assert!(approx(amplify(-2.5), -3.75));
        assert!(approx(amplify(3.0), 4.5));
        assert!(approx(amplify(4.0), 6.3));
        assert!(approx(amplify(-10.0), -9.0));
        assert_eq!(amplify(f64::NAN), 0.0);
    }

    #[test]
    fn zero_stays_at_origin() {
        let out = normalize("Speculator-Decentralist", 0.0, 0.0);
        assert_eq!(out.point, Point::new(0.0, 0.0));
    }

    #[test]
    fn unknown_category_skips_reconciliation() {
        let out = normalize("Moonboy-Maximalist", 2.0, -2.0);
        assert_eq!(out.label, None);
        assert!(approx(out.point.x, 3.0));
        assert!(approx(out.point.y, -3.0));
    }

    #[test]
    fn described_category_is_reconciled() {
        let out = normalize(
            "Speculator-Decentralist: The principle-driven investor in decentralized projects",
            -5.0,
            4.0,
        );
        assert!(out.point.x > 0.0);
        assert!(out.point.y < 0.0);
    }

    #[test]
    fn calibrate_keeps_category_text_and_narrative() {
        let raw = RawClassification {
            category: Category::new("Builder-Decentralist: The cypherpunk idealist"),
            x_position: 2.0,
            y_position: 7.0,
            narrative: Narrative {
                alignment_overview: "overview".into(),
                supporting_evidence: vec![],
                quadrant_analysis: "analysis".into(),
            },
        };
        let result = calibrate(raw);
        assert_eq!(result.category.as_str(), "Builder-Decentralist: The cypherpunk idealist");
        assert!(approx(result.x_position, -3.0));
        assert!(approx(result.y_position, -9.0));
        assert_eq!(result.narrative.quadrant_analysis, "analysis");
    }

    proptest! {
        #[test]
        fn reconciled_signs_match_label(
            index in 0usize..4,
            x in -10.0f64..10.0,
            y in -10.0f64..10.0,
        ) {
            let label = CategoryLabel::ALL[index];
            let out = normalize(&label.described(), x, y);
            match label.disposition {
                Disposition::Builder => prop_assert!(out.point.x <= 0.0),
                Disposition::Speculator => prop_assert!(out.point.x >= 0.0),
            }
            match label.stance {
                Stance::Decentralist => prop_assert!(out.point.y <= 0.0),
                Stance::Pragmatist => prop_assert!(out.point.y >= 0.0),
            }
        }

        #[test]
        fn amplify_is_bounded_and_sign_preserving(v in -1.0e6f64..1.0e6) {
            let a = amplify(v);
            prop_assert!(a.abs() <= AMPLIFIED_MAX);
            if v != 0.0 {
                prop_assert_eq!(sign(a), sign(v));
            }
        }

        #[test]
        fn amplify_is_monotonic(m1 in 0.0001f64..20.0, delta in 0.0001f64..20.0) {
            let m2 = m1 + delta;
            prop_assert!(amplify(m1) <= amplify(m2));
            prop_assert!(amplify(-m1) >= amplify(-m2));
        }
    }
}
