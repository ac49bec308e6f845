//! Report entries emitted for each resolved candidate

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Enumeration written into every entry
pub const ENUMERATION_CVE: &str = "CVE";

/// Normalized score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub base: f64,
    pub version: String,
}

/// CVSS vector components for one standard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvssVector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_complexity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_vector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileges_required: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_interaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidentiality_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity_impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvssScore {
    pub vector: CvssVector,
}

/// One enriched vulnerability finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub category: String,
    pub classification: String,
    pub description: String,
    pub detected_at: String,
    pub enumeration: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub published_at: String,
    pub reference: String,
    pub score: Score,
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Keyed by "cvss2" / "cvss3"
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cvss: BTreeMap<String, CvssScore>,
    /// Matcher annotations that do not collide with synthesized fields
    #[serde(flatten)]
    pub annotations: Map<String, Value>,
}

impl ReportEntry {
    /// Names of the fields synthesized for every entry
    pub const FIELDS: &'static [&'static str] = &[
        "category",
        "classification",
        "description",
        "detected_at",
        "enumeration",
        "id",
        "item_id",
        "published_at",
        "reference",
        "score",
        "severity",
        "assigner",
        "cwe_reference",
        "updated",
        "condition",
        "cvss",
    ];
}
