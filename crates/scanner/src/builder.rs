//! Response synthesis over a scan context

use crate::entry::{build_entry, Candidate};
use tracing::debug;
use vds_errors::{Error, ScanError};
use vds_events::{AppEvent, EventEmitter, EventMessage, EventSender, FailureContext, ScanEvent};
use vds_feed::FeedLookup;
use vds_types::{ReportEntry, ScanContext};

/// Turns the candidates of a [`ScanContext`] into report entries.
///
/// The builder holds no per-scan state, so one instance can serve any number
/// of contexts concurrently as long as the feed lookup is shareable.
pub struct ResponseBuilder<F> {
    feed: F,
    event_sender: Option<EventSender>,
}

impl<F: FeedLookup> ResponseBuilder<F> {
    #[must_use]
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            event_sender: None,
        }
    }

    #[must_use]
    pub fn with_events(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Build one entry per candidate and append them to `context.results`.
    ///
    /// Candidates are visited in identifier order. Either every candidate
    /// resolves and all entries are appended, or the first failure is
    /// returned and `results` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a package subject has no item id, a candidate is
    /// missing from the feed, a record lacks a required field, or a match
    /// condition carries an unknown operator.
    pub async fn synthesize(&self, context: &mut ScanContext) -> Result<(), Error> {
        debug!(
            scanner = %context.scanner_type,
            candidates = context.elements.len(),
            "building response details"
        );

        if context.elements.is_empty() {
            return Ok(());
        }

        self.emit_scan(&context.agent.id, ScanEvent::ResponseStarted {
            agent_id: context.agent.id.clone(),
            scanner: context.scanner_type.to_string(),
            candidates: context.elements.len(),
        });

        let entries = self.build_entries(context).await?;
        let count = entries.len();
        context.results.extend(entries);

        self.emit_scan(&context.agent.id, ScanEvent::ResponseCompleted {
            agent_id: context.agent.id.clone(),
            entries: count,
        });
        Ok(())
    }

    async fn build_entries(&self, context: &ScanContext) -> Result<Vec<ReportEntry>, Error> {
        let item_id = if context.scanner_type.requires_item_id() {
            match context.package_item_id() {
                Some(item_id) => Some(item_id),
                None => {
                    let err: Error = ScanError::InvalidSubjectPayload {
                        message: "package item id is empty".to_string(),
                    }
                    .into();
                    self.emit_failure(context, None, &err);
                    return Err(err);
                }
            }
        } else {
            None
        };

        let mut staged = Vec::with_capacity(context.elements.len());
        for (cve_id, annotation) in &context.elements {
            let candidate = Candidate {
                cve_id,
                scanner: context.scanner_type,
                item_id,
                annotation,
                condition: context.match_conditions.get(cve_id),
            };

            let entry = match self.resolve(&candidate).await {
                Ok(entry) => entry,
                Err(err) => {
                    self.emit_failure(context, Some(cve_id.as_str()), &err);
                    return Err(err);
                }
            };

            self.emit_scan(&context.agent.id, ScanEvent::EntryEmitted {
                cve_id: cve_id.clone(),
                severity: entry.severity.clone(),
            });
            staged.push(entry);
        }

        Ok(staged)
    }

    async fn resolve(&self, candidate: &Candidate<'_>) -> Result<ReportEntry, Error> {
        let record = self.feed.fetch(candidate.cve_id).await?;
        Ok(build_entry(candidate, record)?)
    }

    /// Scan events carry the agent id as correlation id
    fn emit_scan(&self, agent_id: &str, event: ScanEvent) {
        self.emit_message(
            EventMessage::from_event(AppEvent::Scan(event)).with_correlation_id(agent_id),
        );
    }

    fn emit_failure(&self, context: &ScanContext, cve_id: Option<&str>, err: &Error) {
        debug!(agent = %context.agent.id, cve_id, error = %err, "response synthesis aborted");
        self.emit_scan(&context.agent.id, ScanEvent::ResponseFailed {
            agent_id: context.agent.id.clone(),
            cve_id: cve_id.map(str::to_string),
            failure: FailureContext::from_error(err),
        });
    }
}

impl<F> EventEmitter for ResponseBuilder<F> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}
