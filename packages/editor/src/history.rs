//! # Undo/Redo History
//!
//! Linear log of full page snapshots plus a cursor.
//!
//! ## Design
//!
//! - Every entry is a complete `PageContent`, so undo/redo just swap the
//!   snapshot at the new cursor position into the store
//! - Adding an entry after an undo drops every entry past the cursor
//!   (branch-on-new-edit)
//! - The log is bounded; the oldest entries are evicted first
//!
//! ```text
//! entries: [ s0 ][ s1 ][ s2 ][ s3 ]
//!                        ^ index
//! undo  → index 1     redo → index 3     push(s4) → [ s0 s1 s2 s4 ]
//! ```

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use vinyl_model::PageContent;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One recorded snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub page: PageContent,

    /// Optional description, e.g. "Discarded changes"
    pub label: Option<String>,

    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(page: PageContent, label: Option<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            page,
            label,
            recorded_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,

    /// Cursor into `entries`; `None` only while the log is empty
    index: Option<usize>,

    max_entries: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Log keeping at most `max_entries` snapshots (at least one)
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            index: None,
            max_entries: max_entries.max(1),
        }
    }

    /// Append a snapshot, discarding any redo branch
    pub fn push(&mut self, entry: HistoryEntry) {
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push_back(entry);

        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }

        self.index = Some(self.entries.len() - 1);
    }

    /// Replace the whole log with a single entry
    pub fn reset_to(&mut self, entry: HistoryEntry) {
        self.entries.clear();
        self.entries.push_back(entry);
        self.index = Some(0);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }

    /// Step the cursor back; returns the snapshot now under it
    pub fn undo(&mut self) -> Option<&PageContent> {
        if !self.can_undo() {
            return None;
        }
        let index = self.index? - 1;
        self.index = Some(index);
        self.entries.get(index).map(|e| &e.page)
    }

    /// Step the cursor forward; returns the snapshot now under it
    pub fn redo(&mut self) -> Option<&PageContent> {
        if !self.can_redo() {
            return None;
        }
        let index = self.index? + 1;
        self.index = Some(index);
        self.entries.get(index).map(|e| &e.page)
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Labels of every entry, oldest first
    pub fn labels(&self) -> Vec<Option<&str>> {
        self.entries.iter().map(|e| e.label.as_deref()).collect()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
