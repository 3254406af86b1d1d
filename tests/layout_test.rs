//! Chart core scenarios exercised through the public API.

use alignment_chart::chart::{Quadrant, ScreenPosition, calibrate, compose, normalize};
use alignment_chart::domain::{
    Category, CategoryLabel, DisplayMeta, EntityRole, Narrative, Point, PositionedEntity,
    RawClassification,
};

fn friend(id: &str, x: f64, y: f64) -> PositionedEntity {
    PositionedEntity::new(id, Some(Point::new(x, y)), DisplayMeta::default())
}

#[test]
fn classifier_output_with_wrong_signs_lands_in_its_category() {
    let calibrated = normalize(
        "Builder-Pragmatist: The practical developer creating useful applications",
        8.9,
        -3.0,
    );
    assert_eq!(calibrated.label.map(|l| l.to_string()).as_deref(), Some("Builder-Pragmatist"));
    assert_eq!(calibrated.point, Point::new(-9.0, 4.5));
    assert_eq!(Quadrant::of(calibrated.point).map(Quadrant::label), calibrated.label);
}

#[test]
fn unknown_category_keeps_signs_but_still_amplifies() {
    let calibrated = normalize("Maximalist", 2.0, -1.0);
    assert_eq!(calibrated.label, None);
    assert_eq!(calibrated.point, Point::new(3.0, -3.0));
}

#[test]
fn calibrate_keeps_category_text_and_narrative() {
    let raw = RawClassification {
        category: Category::new("speculator-decentralist: principled investor"),
        x_position: -0.5,
        y_position: 0.0,
        narrative: Narrative {
            quadrant_analysis: "You hold tokens on principle".into(),
            ..Narrative::default()
        },
    };
    let result = calibrate(raw);
    assert_eq!(
        result.category.as_str(),
        "speculator-decentralist: principled investor"
    );
    assert!((result.x_position - 3.0).abs() < 1e-12);
    assert!(result.y_position.abs() < f64::EPSILON);
    assert_eq!(result.narrative.quadrant_analysis, "You hold tokens on principle");
}

#[test]
fn full_chart_for_self_and_friends() {
    let mut me = friend("self", -6.0, 6.0);
    me.meta.role = EntityRole::SelfUser;

    let chart = compose(vec![
        me,
        friend("alice", -6.1, 6.2),
        friend("bob", 4.0, -4.0),
        PositionedEntity::new("ghost", None, DisplayMeta::default()),
    ]);

    let ids: Vec<&str> = chart.entities.iter().map(|e| e.entity.id.as_str()).collect();
    assert_eq!(ids, ["self", "alice", "bob", "ghost"]);

    assert_eq!(chart.quadrants.builder_pragmatist, ["self", "alice"]);
    assert_eq!(chart.quadrants.speculator_decentralist, ["bob"]);
    assert_eq!(chart.quadrants.len(), 3);

    assert_eq!(
        chart.entities[2].screen,
        Some(ScreenPosition::from_point(Point::new(4.0, -4.0)))
    );
    assert_eq!(chart.entities[3].screen, None);

    let me = chart.entities[0].entity.point.expect("self point");
    let alice = chart.entities[1].entity.point.expect("alice point");
    assert!(me.squared_distance(&alice) > 0.05);
}

#[test]
fn every_label_round_trips_through_its_quadrant() {
    for label in CategoryLabel::ALL {
        let point = Point::new(
            label.disposition.required_sign() * 5.0,
            label.stance.required_sign() * 5.0,
        );
        assert_eq!(Quadrant::of(point).map(Quadrant::label), Some(label));
    }
}
