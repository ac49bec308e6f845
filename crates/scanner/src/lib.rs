#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Vulnerability response synthesis
//!
//! Given a [`ScanContext`](vds_types::ScanContext) holding the candidates the
//! matcher found for one subject, [`ResponseBuilder`] resolves each candidate
//! against a [`FeedLookup`](vds_feed::FeedLookup) and appends a normalized
//! [`ReportEntry`](vds_types::ReportEntry) per candidate to the context's
//! results.

mod builder;
mod entry;
pub mod normalize;

pub use builder::ResponseBuilder;
pub use normalize::{current_iso8601, float_to_double_round, to_sentence_case};
