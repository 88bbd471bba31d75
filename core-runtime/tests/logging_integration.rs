//! Integration tests for logging system

use async_trait::async_trait;
use bridge_traits::error::Result as SinkResult;
use bridge_traits::logging::{LogEntry, LogLevel, LoggerSink};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::Error;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

#[async_trait]
impl LoggerSink for RecordingSink {
    async fn log(&self, entry: LogEntry) -> SinkResult<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    fn min_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

// Global subscriber can only be installed once per process, so every
// assertion about the installed subscriber lives in this one test.
#[test]
fn test_init_logging_forwards_filtered_events_to_sink() {
    let sink = Arc::new(RecordingSink::default());
    let trait_sink: Arc<dyn LoggerSink> = sink.clone();

    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_filter("logging_integration=info")
        .with_logger_sink(trait_sink);

    init_logging(config).unwrap();

    tracing::debug!(path = "D:/Team/a.txt", "lookup miss");
    tracing::info!(matched = 3u64, owner = "alice@example.com", "reconciled");

    {
        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1, "debug event should be filtered out");
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].message, "reconciled");
        assert_eq!(entries[0].fields.get("matched"), Some(&"3".to_string()));
        assert_eq!(
            entries[0].fields.get("owner"),
            Some(&"a***@[REDACTED]".to_string())
        );
    }

    let second = init_logging(LoggingConfig::default());
    assert!(matches!(second, Err(Error::Config(_))));
}

#[test]
fn test_invalid_filter_is_rejected_before_install() {
    let config = LoggingConfig::default().with_filter("core_hierarchy=not-a-level");
    assert!(matches!(init_logging(config), Err(Error::Config(_))));
}
