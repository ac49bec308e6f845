//! Feed store lookup error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum FeedError {
    #[error("no feed record for {cve_id}")]
    RecordNotFound { cve_id: String },

    #[error("failed to decode feed record for {cve_id}: {message}")]
    DecodeError { cve_id: String, message: String },

    #[error("failed to encode feed record: {message}")]
    EncodeError { message: String },

    #[error("unsupported feed record schema {major}.{minor}")]
    UnsupportedSchema { major: u16, minor: u16 },

    #[error("invalid vulnerability identifier: {id:?}")]
    InvalidIdentifier { id: String },

    #[error("feed database error: {message}")]
    DatabaseError { message: String },
}

impl UserFacingError for FeedError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::RecordNotFound { .. } => {
                Some("The feed store may be out of date; update it and rescan.")
            }
            Self::DecodeError { .. } | Self::UnsupportedSchema { .. } => {
                Some("The feed store was written by an incompatible version; rebuild it.")
            }
            Self::DatabaseError { .. } => Some("Check that the feed database path is readable."),
            Self::InvalidIdentifier { .. } | Self::EncodeError { .. } => None,
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::DatabaseError { .. })
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::RecordNotFound { .. } => "feed.record_not_found",
            Self::DecodeError { .. } => "feed.decode_error",
            Self::EncodeError { .. } => "feed.encode_error",
            Self::UnsupportedSchema { .. } => "feed.unsupported_schema",
            Self::InvalidIdentifier { .. } => "feed.invalid_identifier",
            Self::DatabaseError { .. } => "feed.database",
        })
    }
}
