use serde::{Deserialize, Serialize};

/// Feed store lookup events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedEvent {
    /// Identifier had no entry in the store
    LookupMiss { cve_id: String },

    /// Record served from the decoded-record cache
    CacheHit { cve_id: String },

    /// Stored bytes did not match the record schema
    DecodeFailed { cve_id: String, message: String },
}
