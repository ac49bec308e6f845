#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Vulnerability feed lookup for the response builder
//!
//! The feed store itself is owned elsewhere; this crate only defines the
//! lookup contract ([`FeedLookup`]) and a few adapters that satisfy it. Every
//! adapter decodes stored bytes into an owned [`VulnerabilityDescription`] at
//! the boundary, so callers never see the store's buffers.

pub mod codec;
mod cache;
mod memory;
mod sqlite;

pub use cache::CachedFeed;
pub use codec::SchemaVersion;
pub use memory::MemoryFeed;
pub use sqlite::SqliteFeed;

use async_trait::async_trait;
use std::sync::Arc;
use vds_errors::{Error, FeedError};
use vds_types::VulnerabilityDescription;

/// Fetch-by-identifier contract to the vulnerability feed store
///
/// Implementations must be safe to call concurrently from independent
/// synthesis passes.
#[async_trait]
pub trait FeedLookup: Send + Sync {
    /// Fetch and decode the description stored for `cve_id`
    ///
    /// # Errors
    ///
    /// Returns `FeedError::RecordNotFound` when the store has no entry and
    /// `FeedError::DecodeError` when the stored bytes do not match the schema.
    async fn fetch(&self, cve_id: &str) -> Result<VulnerabilityDescription, Error>;
}

#[async_trait]
impl<T: FeedLookup + ?Sized> FeedLookup for Arc<T> {
    async fn fetch(&self, cve_id: &str) -> Result<VulnerabilityDescription, Error> {
        (**self).fetch(cve_id).await
    }
}

pub(crate) fn validate_identifier(cve_id: &str) -> Result<(), FeedError> {
    if cve_id.trim().is_empty() {
        return Err(FeedError::InvalidIdentifier {
            id: cve_id.to_string(),
        });
    }
    Ok(())
}
