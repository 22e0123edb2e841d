//! Bounded in-memory log of recent conversions.
//!
//! Purely observational: the conversion service never reads it.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use fxconv_types::HistoryEntry;

/// Number of conversions kept before the oldest is dropped.
pub const HISTORY_CAPACITY: usize = 50;

/// FIFO conversion log, safe to share between handlers.
pub struct HistoryService {
    entries: Mutex<VecDeque<HistoryEntry>>,
    capacity: usize,
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryService {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Appends an entry, evicting the oldest one when full.
    pub fn record(&self, entry: HistoryEntry) {
        debug!("Conversion recorded: {}", entry);
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of every entry, oldest first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.lock().iter().cloned().collect()
    }

    /// The `limit` most recent entries, oldest first.
    pub fn last(&self, limit: usize) -> Vec<HistoryEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
        info!("Conversion history cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
