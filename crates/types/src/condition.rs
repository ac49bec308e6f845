//! Match conditions resolved by the upstream matcher

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version relationship the matcher found between the installed version and
/// the vulnerability's affected-version boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRuleCondition {
    Equal,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    DefaultStatus,
    #[default]
    Unknown,
}

impl fmt::Display for MatchRuleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equal => "equal",
            Self::LessThan => "less_than",
            Self::LessOrEqual => "less_or_equal",
            Self::GreaterThan => "greater_than",
            Self::GreaterOrEqual => "greater_or_equal",
            Self::DefaultStatus => "default_status",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Condition attached to one candidate for one subject
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchCondition {
    pub version: String,
    pub condition: MatchRuleCondition,
}

impl MatchCondition {
    #[must_use]
    pub fn new(version: impl Into<String>, condition: MatchRuleCondition) -> Self {
        Self {
            version: version.into(),
            condition,
        }
    }

    /// Human-readable sentence for the report, `None` for an unknown operator.
    ///
    /// This only renders what the matcher decided; it never compares versions.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        let version = &self.version;
        match self.condition {
            MatchRuleCondition::Equal => Some(format!("Package equal to {version}")),
            MatchRuleCondition::LessThan => Some(format!("Package less than {version}")),
            MatchRuleCondition::LessOrEqual => {
                Some(format!("Package less than or equal to {version}"))
            }
            MatchRuleCondition::GreaterThan => Some(format!("Package greater than {version}")),
            MatchRuleCondition::GreaterOrEqual => {
                Some(format!("Package greater than or equal to {version}"))
            }
            MatchRuleCondition::DefaultStatus => Some("Package default status".to_string()),
            MatchRuleCondition::Unknown => None,
        }
    }
}
