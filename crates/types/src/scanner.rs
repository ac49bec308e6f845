//! Scanner categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vds_errors::ScanError;

/// Kind of inventory item a scan was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ScannerType {
    /// Installed package inventory
    Package,
    /// Operating system facts
    Os,
}

impl ScannerType {
    /// Category label written into report entries
    #[must_use]
    pub fn report_category(self) -> &'static str {
        match self {
            Self::Package => "Packages",
            Self::Os => "OS",
        }
    }

    /// Whether subjects of this kind must carry an inventory item identifier
    #[must_use]
    pub fn requires_item_id(self) -> bool {
        matches!(self, Self::Package)
    }
}

impl fmt::Display for ScannerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package => write!(f, "package"),
            Self::Os => write!(f, "os"),
        }
    }
}

impl FromStr for ScannerType {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "package" | "packages" => Ok(Self::Package),
            "os" => Ok(Self::Os),
            _ => Err(ScanError::InvalidScannerType {
                scanner: s.to_string(),
            }),
        }
    }
}
