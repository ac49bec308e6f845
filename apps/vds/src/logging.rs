//! Tracing setup and the bridge from domain events to log records

use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;
use vds_config::Config;
use vds_events::{AppEvent, EventMessage, EventReceiver, FeedEvent, ScanEvent};

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level; `--debug` raises the
/// vds crates to debug. Logs always go to stderr so stdout stays parseable.
pub fn init_tracing(config: &Config, debug_enabled: bool) {
    let default_directive = if debug_enabled {
        format!("{},vds=debug,vds_scanner=debug,vds_feed=debug", config.logging.level)
    } else {
        config.logging.level.clone()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Drain `receiver` until every sender is dropped, logging each event
pub async fn forward_events(mut receiver: EventReceiver) {
    while let Some(message) = receiver.recv().await {
        log_event_with_tracing(&message);
    }
}

/// Log an `EventMessage` with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;

    match &message.event {
        AppEvent::Scan(scan_event) => match scan_event {
            ScanEvent::ResponseStarted {
                agent_id,
                scanner,
                candidates,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    agent = %agent_id,
                    scanner = %scanner,
                    candidates = candidates,
                    "Response synthesis started"
                );
            }
            ScanEvent::EntryEmitted { cve_id, severity } => {
                debug!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    cve_id = %cve_id,
                    severity = %severity,
                    "Report entry built"
                );
            }
            ScanEvent::ResponseCompleted { agent_id, entries } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    agent = %agent_id,
                    entries = entries,
                    "Response synthesis completed"
                );
            }
            ScanEvent::ResponseFailed {
                agent_id,
                cve_id,
                failure,
            } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    agent = %agent_id,
                    cve_id = ?cve_id,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    error = %failure.message,
                    hint = ?failure.hint,
                    "Response synthesis failed"
                );
            }
        },

        AppEvent::Feed(feed_event) => match feed_event {
            FeedEvent::LookupMiss { cve_id } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    cve_id = %cve_id,
                    "Feed lookup miss"
                );
            }
            FeedEvent::CacheHit { cve_id } => {
                trace!(
                    source = meta.source.as_str(),
                    cve_id = %cve_id,
                    "Feed cache hit"
                );
            }
            FeedEvent::DecodeFailed { cve_id, message } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    cve_id = %cve_id,
                    error = %message,
                    "Feed record decode failed"
                );
            }
        },
    }
}
