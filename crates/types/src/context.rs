//! Scan context: the unit of work handed to the response builder

use crate::{AgentInfo, MatchCondition, OsFacts, ReportEntry, ScannerType, SubjectPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Everything known about one scan subject plus the candidates the matcher
/// found for it.
///
/// `elements` is ordered by identifier so a synthesis pass always visits
/// candidates in the same order. `results` is written by the response builder
/// and never read by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanContext {
    #[serde(rename = "type")]
    pub scanner_type: ScannerType,
    #[serde(default)]
    pub agent: AgentInfo,
    #[serde(default)]
    pub os: OsFacts,
    #[serde(default)]
    pub payload: SubjectPayload,
    /// Candidate identifier -> opaque matcher annotation
    #[serde(default)]
    pub elements: BTreeMap<String, Value>,
    /// Candidate identifier -> resolved match condition
    #[serde(default)]
    pub match_conditions: HashMap<String, MatchCondition>,
    #[serde(skip)]
    pub results: Vec<ReportEntry>,
}

impl ScanContext {
    #[must_use]
    pub fn new(
        scanner_type: ScannerType,
        agent: AgentInfo,
        os: OsFacts,
        payload: SubjectPayload,
    ) -> Self {
        Self {
            scanner_type,
            agent,
            os,
            payload,
            elements: BTreeMap::new(),
            match_conditions: HashMap::new(),
            results: Vec::new(),
        }
    }

    /// Register a candidate with its matcher annotation
    pub fn add_candidate(&mut self, cve_id: impl Into<String>, annotation: Value) {
        self.elements.insert(cve_id.into(), annotation);
    }

    /// Attach the matcher's resolved condition to a candidate
    pub fn set_match_condition(&mut self, cve_id: impl Into<String>, condition: MatchCondition) {
        self.match_conditions.insert(cve_id.into(), condition);
    }

    /// Inventory item identifier of the subject, if present and non-empty
    #[must_use]
    pub fn package_item_id(&self) -> Option<&str> {
        self.payload.item_id()
    }
}
