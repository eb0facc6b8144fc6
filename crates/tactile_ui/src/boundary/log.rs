//! Bounded fault log for operator visibility.
//!
//! Each captured fault appends one [`FaultRecord`]. The log is shared by
//! cloning and may be read from another thread (diagnostics overlay, crash
//! reporter), so it sits behind a mutex even though the boundaries that
//! write to it live on the UI thread.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::fault::Fault;

/// One captured fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    /// Monotonic sequence number across the log's lifetime.
    pub sequence: u64,
    /// Name of the boundary that captured the fault.
    pub boundary: String,
    /// Fault message.
    pub message: String,
    /// Origin trace, if the fault carried one.
    pub trace: Option<String>,
}

#[derive(Debug)]
struct LogState {
    records: VecDeque<FaultRecord>,
    capacity: usize,
    next_sequence: u64,
}

/// Shared ring buffer of captured faults.
#[derive(Debug, Clone)]
pub struct FaultLog {
    state: Arc<Mutex<LogState>>,
}

impl FaultLog {
    /// Creates a log retaining at most `capacity` records (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Arc::new(Mutex::new(LogState {
                records: VecDeque::with_capacity(capacity),
                capacity,
                next_sequence: 0,
            })),
        }
    }

    /// Appends a record, evicting the oldest beyond capacity.
    ///
    /// Returns the record's sequence number.
    pub fn record(&self, boundary: &str, fault: &Fault) -> u64 {
        let mut state = self.state.lock();
        let sequence = state.next_sequence;
        state.next_sequence += 1;

        if state.records.len() == state.capacity {
            state.records.pop_front();
        }
        state.records.push_back(FaultRecord {
            sequence,
            boundary: boundary.to_string(),
            message: fault.message().to_string(),
            trace: fault.trace().map(str::to_string),
        });
        sequence
    }

    /// Returns a snapshot of the retained records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<FaultRecord> {
        self.state.lock().records.iter().cloned().collect()
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<FaultRecord> {
        self.state.lock().records.back().cloned()
    }

    /// Returns the number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    /// Returns true if no records are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// Returns the total number of faults ever recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.state.lock().next_sequence
    }

    /// Drops all retained records. Sequence numbers keep counting.
    pub fn clear(&self) {
        self.state.lock().records.clear();
    }
}

impl Default for FaultLog {
    fn default() -> Self {
        Self::new(64)
    }
}
