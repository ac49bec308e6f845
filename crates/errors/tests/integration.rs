//! Integration tests for error types

#[cfg(test)]
mod tests {
    use vds_errors::*;

    #[test]
    fn test_error_conversion() {
        let scan_err = ScanError::InvalidSubjectPayload {
            message: "package item id is empty".into(),
        };
        let err: Error = scan_err.into();
        assert!(matches!(
            err,
            Error::Scan(ScanError::InvalidSubjectPayload { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = FeedError::RecordNotFound {
            cve_id: "CVE-2024-1234".into(),
        };
        assert_eq!(err.to_string(), "no feed record for CVE-2024-1234");

        let err = ScanError::MalformedRecord {
            cve_id: "CVE-2024-1234".into(),
            field: "description".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record for CVE-2024-1234: missing or invalid description"
        );
    }

    #[test]
    fn test_user_facing_codes() {
        let err: Error = FeedError::DecodeError {
            cve_id: "CVE-2024-1234".into(),
            message: "truncated".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("feed.decode_error"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());

        let err: Error = FeedError::DatabaseError {
            message: "locked".into(),
        }
        .into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(&io_err, "/tmp/context.json");
        match err {
            Error::Io { message, path } => {
                assert_eq!(message, "missing");
                assert_eq!(path.as_deref(), Some("/tmp/context.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
