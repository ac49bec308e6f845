#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the vds response synthesis stage
//!
//! This crate holds the data model shared by the feed adapters and the
//! response builder: the scan context handed in by orchestration, the
//! decoded vulnerability description, and the report entries produced.

pub mod condition;
pub mod context;
pub mod record;
pub mod report;
pub mod scanner;
pub mod subject;

pub use condition::{MatchCondition, MatchRuleCondition};
pub use context::ScanContext;
pub use record::{CvssMetrics, VulnerabilityDescription};
pub use report::{CvssScore, CvssVector, ReportEntry, Score, ENUMERATION_CVE};
pub use scanner::ScannerType;
pub use subject::{AgentInfo, OsFacts, PackageInfo, SubjectPayload};

use serde::{Deserialize, Serialize};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Json
    }
}

impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Plain, Self::Json]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Plain => clap::builder::PossibleValue::new("plain"),
            Self::Json => clap::builder::PossibleValue::new("json"),
        })
    }
}
