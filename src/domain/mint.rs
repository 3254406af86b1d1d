use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::point::Point;
use super::profile::Fid;

/// A minted token about to be recorded. Saving is keyed by `token_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMint {
    pub token_id: i64,
    pub tx_hash: String,
    pub wallet_address: String,
    pub fid: Option<Fid>,
    pub username: Option<String>,
    pub point: Point,
    pub category: Category,
    pub image_url: String,
}

/// A stored mint row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MintRecord {
    pub id: i64,
    pub token_id: i64,
    pub tx_hash: String,
    pub wallet_address: String,
    pub fid: Option<Fid>,
    pub username: Option<String>,
    /// `None` when the stored coordinates do not parse.
    pub point: Option<Point>,
    pub category: Category,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Request to the image service for a shareable token card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintImageRequest {
    pub x: f64,
    pub y: f64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

/// Token metadata served to marketplaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub background_color: String,
    pub attributes: Vec<MetadataAttribute>,
}

const FALLBACK_CATEGORY_NAME: &str = "Alignment NFT";

impl TokenMetadata {
    #[must_use]
    pub fn from_record(record: &MintRecord) -> Self {
        let category_name = match record.category.name() {
            "" => FALLBACK_CATEGORY_NAME,
            name => name,
        };
        let (x, y) = record
            .point
            .map_or((serde_json::Value::Null, serde_json::Value::Null), |p| {
                (serde_json::json!(p.x), serde_json::json!(p.y))
            });
        let position = record
            .point
            .map_or_else(|| "unknown".to_string(), |p| format!("{}, {}", p.x, p.y));

        Self {
            name: format!("Onchain Alignment #{}", record.token_id),
            description: format!(
                "{category_name} - An onchain alignment NFT representing your position ({position}) in the crypto ecosystem."
            ),
            image: record.image_url.clone(),
            background_color: "FFFFFF".to_string(),
            attributes: vec![
                MetadataAttribute {
                    trait_type: "Category".to_string(),
                    value: serde_json::json!(category_name),
                    display_type: None,
                },
                MetadataAttribute {
                    trait_type: "X Position".to_string(),
                    value: x,
                    display_type: Some("number".to_string()),
                },
                MetadataAttribute {
                    trait_type: "Y Position".to_string(),
                    value: y,
                    display_type: Some("number".to_string()),
                },
                MetadataAttribute {
                    trait_type: "Username".to_string(),
                    value: serde_json::json!(
                        record
                            .username
                            .as_deref()
                            .filter(|u| !u.is_empty())
                            .unwrap_or("Anonymous")
                    ),
                    display_type: None,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MintRecord {
        MintRecord {
            id: 1,
            token_id: 12,
            tx_hash: "0xtx".into(),
            wallet_address: "0xwallet".into(),
            fid: Some(5),
            username: Some("alice".into()),
            point: Some(Point::new(-8.9, 3.0)),
            category: Category::new("Builder-Pragmatist: The practical developer"),
            image_url: "https://cdn/12.png".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn metadata_uses_category_name_and_position() {
        let metadata = TokenMetadata::from_record(&record());
        assert_eq!(metadata.name, "Onchain Alignment #12");
        assert_eq!(
            metadata.description,
            "Builder-Pragmatist - An onchain alignment NFT representing your position (-8.9, 3) in the crypto ecosystem."
        );
        assert_eq!(metadata.attributes[0].value, "Builder-Pragmatist");
        assert_eq!(metadata.attributes[1].value, serde_json::json!(-8.9));
        assert_eq!(metadata.attributes[3].value, "alice");
    }

    #[test]
    fn metadata_falls_back_for_missing_values() {
        let mut record = record();
        record.category = Category::new("");
        record.username = None;
        let metadata = TokenMetadata::from_record(&record);
        assert!(metadata.description.starts_with("Alignment NFT - "));
        assert_eq!(metadata.attributes[3].value, "Anonymous");
    }
}
