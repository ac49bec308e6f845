//! SQLite-backed feed store

use crate::{codec, validate_identifier, FeedLookup};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::debug;
use vds_errors::{Error, FeedError};
use vds_events::{AppEvent, EventEmitter, EventSender, FeedEvent};
use vds_types::VulnerabilityDescription;

/// Read-only lookups against the `descriptions` table of a feed database
pub struct SqliteFeed {
    pool: SqlitePool,
    event_sender: Option<EventSender>,
}

impl SqliteFeed {
    /// Open an existing feed database read-only
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub async fn open(path: &Path, max_connections: u32) -> Result<Self, Error> {
        if !path.exists() {
            return Err(FeedError::DatabaseError {
                message: format!("feed database not found: {}", path.display()),
            }
            .into());
        }

        let options = SqliteConnectOptions::new().filename(path).read_only(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        debug!(path = %path.display(), "opened feed database");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool
    #[must_use]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            event_sender: None,
        }
    }

    #[must_use]
    pub fn with_events(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }
}

#[async_trait]
impl FeedLookup for SqliteFeed {
    async fn fetch(&self, cve_id: &str) -> Result<VulnerabilityDescription, Error> {
        validate_identifier(cve_id)?;

        let row = sqlx::query("SELECT data FROM descriptions WHERE cve_id = ?")
            .bind(cve_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            self.emit(AppEvent::Feed(FeedEvent::LookupMiss {
                cve_id: cve_id.to_string(),
            }));
            return Err(FeedError::RecordNotFound {
                cve_id: cve_id.to_string(),
            }
            .into());
        };

        let data: Vec<u8> = row.get("data");
        codec::decode(cve_id, &data).map_err(|e| {
            self.emit(AppEvent::Feed(FeedEvent::DecodeFailed {
                cve_id: cve_id.to_string(),
                message: e.to_string(),
            }));
            e.into()
        })
    }
}

impl EventEmitter for SqliteFeed {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}
