//! Integration tests for events

#[cfg(test)]
mod tests {
    use vds_errors::{FeedError, ScanError};
    use vds_events::*;

    #[tokio::test]
    async fn test_event_sender_emit() {
        let (tx, mut rx) = channel();

        tx.emit(AppEvent::Scan(ScanEvent::ResponseStarted {
            agent_id: "001".into(),
            scanner: "package".into(),
            candidates: 2,
        }));
        tx.emit(AppEvent::Feed(FeedEvent::CacheHit {
            cve_id: "CVE-2024-1234".into(),
        }));

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first.event,
            AppEvent::Scan(ScanEvent::ResponseStarted { candidates: 2, .. })
        ));
        assert_eq!(first.meta.level, EventLevel::Info);
        assert_eq!(first.meta.source, EventSource::SCAN);
        assert_eq!(first.meta.correlation_id, None);

        let second = rx.recv().await.unwrap();
        assert!(matches!(
            second.event,
            AppEvent::Feed(FeedEvent::CacheHit { .. })
        ));
        assert_eq!(second.meta.level, EventLevel::Trace);
        assert_eq!(second.meta.source, EventSource::FEED);
    }

    #[tokio::test]
    async fn test_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);

        // Should not panic when receiver is dropped
        tx.emit(AppEvent::Feed(FeedEvent::LookupMiss {
            cve_id: "CVE-2024-1234".into(),
        }));
    }

    #[tokio::test]
    async fn test_correlated_scan_event() {
        let (tx, mut rx) = channel();

        let message = EventMessage::from_event(AppEvent::Scan(ScanEvent::ResponseCompleted {
            agent_id: "001".into(),
            entries: 3,
        }))
        .with_correlation_id("001");
        tx.emit_message(message);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.meta.correlation_id.as_deref(), Some("001"));
        assert_eq!(received.meta.source, EventSource::SCAN);
        assert_eq!(received.event.log_target(), "vds::events::scan");
    }

    #[test]
    fn test_failure_context_from_error() {
        let failure = FailureContext::from_error(&ScanError::InvalidSubjectPayload {
            message: "package item id is empty".into(),
        });
        assert_eq!(failure.code.as_deref(), Some("scan.invalid_subject_payload"));
        assert!(failure.hint.is_some());
        assert!(!failure.retryable);

        let failure = FailureContext::from_error(&FeedError::DatabaseError {
            message: "busy".into(),
        });
        assert!(failure.retryable);
    }

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::Feed(FeedEvent::LookupMiss {
            cve_id: "CVE-2024-1234".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["domain"], "feed");
        assert_eq!(json["event"]["type"], "LookupMiss");
        assert_eq!(event.log_level(), tracing::Level::WARN);
    }
}
