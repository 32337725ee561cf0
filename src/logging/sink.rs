//! Destinations for formatted log lines other than the console.

use std::sync::{Arc, Mutex, PoisonError};

/// Receives formatted lines for the targets it is registered under.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Keeps every line in memory.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to a [`LoggerConfig`](super::LoggerConfig).
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
