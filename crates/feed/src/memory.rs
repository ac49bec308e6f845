//! In-memory feed store

use crate::{codec, validate_identifier, FeedLookup};
use async_trait::async_trait;
use dashmap::DashMap;
use vds_errors::{Error, FeedError};
use vds_types::VulnerabilityDescription;

/// Feed store kept entirely in memory.
///
/// Entries are held in their encoded form and decoded on every lookup, the
/// same way a persistent store would serve them. Useful for tests and for
/// small feeds loaded at startup.
#[derive(Debug, Default)]
pub struct MemoryFeed {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feed from decoded records
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be encoded.
    pub fn from_records<I, K>(records: I) -> Result<Self, FeedError>
    where
        I: IntoIterator<Item = (K, VulnerabilityDescription)>,
        K: Into<String>,
    {
        let feed = Self::new();
        for (cve_id, record) in records {
            feed.insert(cve_id, &record)?;
        }
        Ok(feed)
    }

    /// Store a record under `cve_id`, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded.
    pub fn insert(
        &self,
        cve_id: impl Into<String>,
        record: &VulnerabilityDescription,
    ) -> Result<(), FeedError> {
        self.entries.insert(cve_id.into(), codec::encode(record)?);
        Ok(())
    }

    /// Store raw bytes as-is
    pub fn insert_raw(&self, cve_id: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(cve_id.into(), bytes);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl FeedLookup for MemoryFeed {
    async fn fetch(&self, cve_id: &str) -> Result<VulnerabilityDescription, Error> {
        validate_identifier(cve_id)?;

        let entry = self
            .entries
            .get(cve_id)
            .ok_or_else(|| FeedError::RecordNotFound {
                cve_id: cve_id.to_string(),
            })?;

        Ok(codec::decode(cve_id, entry.value())?)
    }
}
