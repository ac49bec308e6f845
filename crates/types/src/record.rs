//! Decoded vulnerability description retrieved from the feed store

use serde::{Deserialize, Serialize};

/// CVSS sub-metrics carried through to the report vector block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvssMetrics {
    pub access_complexity: Option<String>,
    pub attack_vector: Option<String>,
    pub authentication: Option<String>,
    pub availability_impact: Option<String>,
    pub confidentiality_impact: Option<String>,
    pub integrity_impact: Option<String>,
    pub privileges_required: Option<String>,
    pub scope: Option<String>,
    pub user_interaction: Option<String>,
}

/// Static metadata about one vulnerability.
///
/// String fields are `None` when the feed entry does not carry them, which is
/// distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VulnerabilityDescription {
    pub assigner_short_name: Option<String>,
    pub classification: Option<String>,
    pub cwe_id: Option<String>,
    pub date_published: Option<String>,
    pub date_updated: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    /// Base score as stored by the feed (single precision)
    pub score_base: f32,
    /// CVSS standard in effect, "2" or "3"
    pub score_version: Option<String>,
    /// Free-text severity, casing as stored
    pub severity: Option<String>,
    pub cvss: CvssMetrics,
}
