use serde_json::{Value, json};

use crate::domain::CategoryLabel;

/// Response schema pinning the shape of a classification.
pub(super) fn alignment_schema() -> Value {
    let categories: Vec<String> = CategoryLabel::ALL.iter().map(CategoryLabel::described).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "xPosition": {
                "type": "NUMBER",
                "description": "From -10 (Builder) to +10 (Speculator)."
            },
            "yPosition": {
                "type": "NUMBER",
                "description": "From -10 (Decentralist) to +10 (Pragmatist)."
            },
            "category": {
                "type": "STRING",
                "description": "Quadrant matching the signs of xPosition and yPosition.",
                "enum": categories
            },
            "alignmentOverview": {
                "type": "STRING",
                "maxLength": 800
            },
            "supportingEvidence": {
                "type": "ARRAY",
                "minItems": 3,
                "maxItems": 6,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "pattern": {"type": "STRING", "maxLength": 30},
                        "phrases": {
                            "type": "ARRAY",
                            "minItems": 1,
                            "maxItems": 4,
                            "items": {"type": "STRING", "maxLength": 30}
                        },
                        "explanation": {"type": "STRING", "maxLength": 150}
                    }
                }
            },
            "quadrantAnalysis": {
                "type": "STRING",
                "maxLength": 300
            }
        },
        "required": [
            "xPosition",
            "yPosition",
            "category",
            "alignmentOverview",
            "supportingEvidence",
            "quadrantAnalysis"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_enum_lists_described_labels() {
        let schema = alignment_schema();
        let options = schema["properties"]["category"]["enum"]
            .as_array()
            .expect("enum array");
        assert_eq!(options.len(), 4);
        assert!(options.contains(&json!(
            "Builder-Pragmatist: The practical developer creating useful applications"
        )));
        assert_eq!(schema["required"].as_array().map(Vec::len), Some(6));
    }
}
