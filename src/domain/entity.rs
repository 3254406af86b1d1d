use serde::{Deserialize, Serialize};

use super::point::{Coordinate, Point};

/// Whose marker an entity is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityRole {
    #[serde(rename = "self")]
    SelfUser,
    #[default]
    Friend,
}

/// Rendering metadata carried alongside a position; never inspected by the
/// layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMeta {
    #[serde(default)]
    pub role: EntityRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A self-user or friend with an optional position, recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedEntity {
    pub id: String,
    /// `None` when the source coordinates were missing or non-numeric.
    pub point: Option<Point>,
    #[serde(flatten)]
    pub meta: DisplayMeta,
}

impl PositionedEntity {
    #[must_use]
    pub fn new(id: impl Into<String>, point: Option<Point>, meta: DisplayMeta) -> Self {
        Self {
            id: id.into(),
            point,
            meta,
        }
    }
}

/// Position record as received from clients: coordinates may be numbers or
/// numeric strings, or absent altogether.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(default)]
    pub x: Option<Coordinate>,
    #[serde(default)]
    pub y: Option<Coordinate>,
    #[serde(flatten)]
    pub meta: DisplayMeta,
}

impl From<EntityRecord> for PositionedEntity {
    fn from(record: EntityRecord) -> Self {
        let x = record.x.as_ref().and_then(Coordinate::value);
        let y = record.y.as_ref().and_then(Coordinate::value);
        Self {
            id: record.id,
            point: Point::from_parts(x, y),
            meta: record.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_with_string_coordinates_gets_a_point() {
        let record: EntityRecord = serde_json::from_value(serde_json::json!({
            "id": "alice",
            "x": "1.5",
            "y": -2,
            "username": "alice"
        }))
        .expect("record");
        let entity = PositionedEntity::from(record);
        assert_eq!(entity.point, Some(Point::new(1.5, -2.0)));
        assert_eq!(entity.meta.username.as_deref(), Some("alice"));
        assert_eq!(entity.meta.role, EntityRole::Friend);
    }

    #[test]
    fn record_with_bad_coordinates_has_no_point() {
        let record: EntityRecord = serde_json::from_value(serde_json::json!({
            "id": "bob",
            "x": "n/a",
            "y": 3
        }))
        .expect("record");
        assert_eq!(PositionedEntity::from(record).point, None);

        let missing: EntityRecord =
            serde_json::from_value(serde_json::json!({"id": "carol", "y": null})).expect("record");
        assert_eq!(PositionedEntity::from(missing).point, None);
    }

    #[test]
    fn self_role_serializes_as_self() {
        let meta = DisplayMeta {
            role: EntityRole::SelfUser,
            ..DisplayMeta::default()
        };
        let value = serde_json::to_value(&meta).expect("serialize");
        assert_eq!(value["role"], "self");
    }
}
