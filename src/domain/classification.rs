use serde::{Deserialize, Serialize};

use super::category::Category;

/// One behavioural pattern the classifier cites as evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

/// Free-text fields of a classification, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    #[serde(default)]
    pub alignment_overview: String,
    #[serde(default)]
    pub supporting_evidence: Vec<Evidence>,
    #[serde(default)]
    pub quadrant_analysis: String,
}

/// Classifier output before sign reconciliation and amplification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassification {
    pub category: Category,
    pub x_position: f64,
    pub y_position: f64,
    #[serde(flatten)]
    pub narrative: Narrative,
}

/// Calibrated classification: coordinates agree with the category signs and
/// have been spread toward the chart edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub x_position: f64,
    pub y_position: f64,
    pub category: Category,
    #[serde(flatten)]
    pub narrative: Narrative,
}
