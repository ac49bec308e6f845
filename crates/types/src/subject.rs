//! Scan subject identity: agent, operating system and inventory payload

use serde::{Deserialize, Serialize};

/// Agent that reported the inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentInfo {
    pub id: String,
    pub ip: String,
    pub version: String,
    pub name: String,
}

/// Operating system facts reported by the agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsFacts {
    pub hostname: String,
    pub architecture: String,
    pub name: String,
    pub codename: String,
    pub major_version: String,
    pub minor_version: String,
    pub patch: String,
    pub build: String,
    pub platform: String,
    pub version: String,
    pub release: String,
    pub display_version: String,
    pub sysname: String,
    pub kernel_version: String,
    pub kernel_release: String,
}

/// Installed package as reported by the inventory collector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageInfo {
    pub architecture: String,
    pub checksum: String,
    pub description: String,
    pub format: String,
    pub groups: String,
    /// Stable identity of the inventoried package
    pub item_id: Option<String>,
    pub multiarch: String,
    pub name: String,
    pub priority: String,
    pub scan_time: String,
    pub size: u64,
    pub source: String,
    pub vendor: String,
    pub version: String,
    pub install_time: String,
    pub location: String,
}

/// Category-specific inventory carried by a scan context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectPayload {
    Package(PackageInfo),
    #[default]
    Empty,
}

impl SubjectPayload {
    /// Inventory item identifier, if present and non-empty
    #[must_use]
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::Package(package) => package.item_id.as_deref().filter(|id| !id.is_empty()),
            Self::Empty => None,
        }
    }
}
