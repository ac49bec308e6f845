use serde::{Deserialize, Serialize};

use crate::EventSource;
use vds_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub retryable: bool,
}

impl FailureContext {
    #[must_use]
    pub fn new(
        code: Option<impl Into<String>>,
        message: impl Into<String>,
        hint: Option<impl Into<String>>,
        retryable: bool,
    ) -> Self {
        Self {
            code: code.map(Into::into),
            message: message.into(),
            hint: hint.map(Into::into),
            retryable,
        }
    }

    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self::new(
            error.user_code(),
            error.user_message().into_owned(),
            error.user_hint(),
            error.is_retryable(),
        )
    }
}

pub mod feed;
pub mod scan;

pub use feed::*;
pub use scan::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    Scan(ScanEvent),
    Feed(FeedEvent),
}

impl AppEvent {
    /// Identify the source domain for this event.
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::Scan(_) => EventSource::SCAN,
            Self::Feed(_) => EventSource::FEED,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Scan(ScanEvent::ResponseFailed { .. }) => Level::ERROR,
            Self::Feed(FeedEvent::LookupMiss { .. } | FeedEvent::DecodeFailed { .. }) => {
                Level::WARN
            }
            Self::Scan(ScanEvent::EntryEmitted { .. }) => Level::DEBUG,
            Self::Feed(FeedEvent::CacheHit { .. }) => Level::TRACE,
            Self::Scan(ScanEvent::ResponseStarted { .. } | ScanEvent::ResponseCompleted { .. }) => {
                Level::INFO
            }
        }
    }

    /// Get the log target for this event
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::Scan(_) => "vds::events::scan",
            Self::Feed(_) => "vds::events::feed",
        }
    }
}
