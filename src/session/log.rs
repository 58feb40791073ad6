// User-facing activity log. Every line is mirrored to tracing.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Shared, append-only (until cleared) list of progress lines. Clones share
/// the same buffer.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: impl Into<String>) {
        let message = message.into();
        info!(target: "voicedrop::activity", "{}", message);
        self.entries().push(LogEntry {
            timestamp: Utc::now(),
            message,
        });
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries().iter().map(|e| e.message.clone()).collect()
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries().clone()
    }

    /// Lines joined the way the log panel shows them.
    pub fn render(&self) -> String {
        self.entries()
            .iter()
            .map(|e| format!("{}\n", e.message))
            .collect()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // A panic mid-push leaves at worst a missing line.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_clear() {
        let log = ActivityLog::new();
        let shared = log.clone();

        log.push("first");
        shared.push("second");
        assert_eq!(log.lines(), vec!["first", "second"]);
        assert_eq!(log.render(), "first\nsecond\n");

        shared.clear();
        assert!(log.lines().is_empty());
    }

    #[test]
    fn test_timestamps_are_ordered() {
        let log = ActivityLog::new();
        log.push("a");
        log.push("b");
        let entries = log.snapshot();
        assert!(entries[0].timestamp <= entries[1].timestamp);
    }
}
