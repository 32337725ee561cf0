//! Record of matched dispatches.

use super::table::StateKey;
use crate::core::Event;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// One matched dispatch: `from --event--> to` at `timestamp`.
#[derive(Clone, Debug, Serialize)]
pub struct DispatchRecord {
    /// The state the machine left
    pub from: StateKey,
    /// The event that matched
    pub event: Event,
    /// The state the machine entered
    pub to: StateKey,
    /// When the dispatch happened
    pub timestamp: DateTime<Utc>,
}

impl DispatchRecord {
    pub fn new(from: StateKey, event: Event, to: StateKey) -> Self {
        Self {
            from,
            event,
            to,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of matched dispatches.
///
/// Only kept when the context was built with
/// [`record_history`](crate::builder::ContextBuilder::record_history).
/// Unmatched events never appear here.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DispatchHistory {
    records: Vec<DispatchRecord>,
}

impl DispatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: DispatchRecord) {
        self.records.push(record);
    }

    /// States traversed: the first source, then each target in order.
    pub fn get_path(&self) -> Vec<&StateKey> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Time between the first and last recorded dispatch.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
