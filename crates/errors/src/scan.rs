//! Response synthesis error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ScanError {
    #[error("invalid subject payload: {message}")]
    InvalidSubjectPayload { message: String },

    #[error("invalid scanner type: {scanner}")]
    InvalidScannerType { scanner: String },

    #[error("malformed record for {cve_id}: missing or invalid {field}")]
    MalformedRecord { cve_id: String, field: String },

    #[error("invalid match condition for {cve_id}: {condition}")]
    InvalidMatchCondition { cve_id: String, condition: String },
}

impl UserFacingError for ScanError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidSubjectPayload { .. } => {
                Some("Package scans require a non-empty item_id in the inventory payload.")
            }
            Self::MalformedRecord { .. } => {
                Some("The vulnerability feed entry is incomplete; refresh the feed store.")
            }
            Self::InvalidMatchCondition { .. } => {
                Some("The upstream matcher produced an unknown condition for this candidate.")
            }
            Self::InvalidScannerType { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidSubjectPayload { .. } => "scan.invalid_subject_payload",
            Self::InvalidScannerType { .. } => "scan.invalid_scanner_type",
            Self::MalformedRecord { .. } => "scan.malformed_record",
            Self::InvalidMatchCondition { .. } => "scan.invalid_match_condition",
        })
    }
}
