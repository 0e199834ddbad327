//! Bounded undo/redo history with dirty tracking
//!
//! The history always holds at least one snapshot and the cursor always
//! points at a stored entry. A push discards everything after the cursor,
//! appends, then evicts from the front once the limit is exceeded.

use crate::constants::DEFAULT_HISTORY_LIMIT;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    cursor: usize,
    limit: usize,
    saved: T,
}

impl<T: Clone + PartialEq> History<T> {
    /// Start a history whose only entry is also the saved baseline
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// A limit of zero is treated as one
    pub fn with_limit(initial: T, limit: usize) -> Self {
        let mut entries = VecDeque::with_capacity(limit.clamp(1, DEFAULT_HISTORY_LIMIT));
        entries.push_back(initial.clone());
        Self {
            entries,
            cursor: 0,
            limit: limit.max(1),
            saved: initial,
        }
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, snapshot: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
            log::debug!("History limit {} reached, evicted oldest entry", self.limit);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. Returns false (and does nothing) at the start.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns false (and does nothing) at the tail.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Whether the current snapshot differs from the last committed one
    pub fn is_dirty(&self) -> bool {
        *self.current() != self.saved
    }

    /// Record the current snapshot as the saved baseline.
    /// Does not add a history entry.
    pub fn commit(&mut self) {
        self.saved = self.current().clone();
    }

    pub fn saved(&self) -> &T {
        &self.saved
    }

    /// Replace everything with a single clean snapshot, e.g. after loading
    pub fn reset(&mut self, snapshot: T) {
        self.entries.clear();
        self.entries.push_back(snapshot.clone());
        self.cursor = 0;
        self.saved = snapshot;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Stored snapshots, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
