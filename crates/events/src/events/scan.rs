use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Response synthesis events, one stream per scan subject
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScanEvent {
    /// Synthesis started for a subject
    ResponseStarted {
        agent_id: String,
        scanner: String,
        candidates: usize,
    },

    /// A report entry was built for a candidate
    EntryEmitted { cve_id: String, severity: String },

    /// All candidates resolved and appended to the results sink
    ResponseCompleted { agent_id: String, entries: usize },

    /// Synthesis aborted; nothing was appended
    ResponseFailed {
        agent_id: String,
        cve_id: Option<String>,
        failure: FailureContext,
    },
}
