//! Decoded-record cache in front of any feed lookup

use crate::FeedLookup;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use vds_errors::Error;
use vds_events::{AppEvent, EventEmitter, EventSender, FeedEvent};
use vds_types::VulnerabilityDescription;

/// Expired entries are swept once every this many inserts
const PURGE_INTERVAL: usize = 128;

#[derive(Debug, Clone)]
struct CacheEntry {
    record: VulnerabilityDescription,
    created_at: Instant,
}

/// Caches successful lookups for a fixed time to live.
///
/// Failures are never cached, so a record added to the store after a miss is
/// picked up on the next lookup. Expired entries are dropped when looked up
/// again and swept periodically as new entries are inserted.
pub struct CachedFeed<F> {
    inner: F,
    entries: DashMap<String, CacheEntry>,
    inserts: AtomicUsize,
    ttl: Duration,
    event_sender: Option<EventSender>,
}

impl<F: FeedLookup> CachedFeed<F> {
    #[must_use]
    pub fn new(inner: F, ttl: Duration) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
            inserts: AtomicUsize::new(0),
            ttl,
            event_sender: None,
        }
    }

    /// Cache with the default 5 minute TTL
    #[must_use]
    pub fn with_default_ttl(inner: F) -> Self {
        Self::new(inner, Duration::from_secs(300))
    }

    #[must_use]
    pub fn with_events(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Drop expired entries
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.created_at.elapsed() < ttl);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn cached(&self, cve_id: &str) -> Option<VulnerabilityDescription> {
        let entry = self.entries.get(cve_id)?;
        if entry.created_at.elapsed() < self.ttl {
            Some(entry.record.clone())
        } else {
            drop(entry);
            self.entries.remove(cve_id);
            None
        }
    }
}

#[async_trait]
impl<F: FeedLookup> FeedLookup for CachedFeed<F> {
    async fn fetch(&self, cve_id: &str) -> Result<VulnerabilityDescription, Error> {
        if let Some(record) = self.cached(cve_id) {
            self.emit(AppEvent::Feed(FeedEvent::CacheHit {
                cve_id: cve_id.to_string(),
            }));
            return Ok(record);
        }

        let record = self.inner.fetch(cve_id).await?;
        self.entries.insert(
            cve_id.to_string(),
            CacheEntry {
                record: record.clone(),
                created_at: Instant::now(),
            },
        );
        if self.inserts.fetch_add(1, Ordering::Relaxed) % PURGE_INTERVAL == PURGE_INTERVAL - 1 {
            self.purge_expired();
        }
        Ok(record)
    }
}

impl<F> EventEmitter for CachedFeed<F> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}
