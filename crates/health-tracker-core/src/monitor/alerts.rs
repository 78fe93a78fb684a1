//! Bounded rolling alert log.

use std::collections::VecDeque;

/// Most-recent-first log that drops its oldest entries past capacity.
#[derive(Debug, Clone)]
pub struct AlertLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl AlertLog {
    /// Create an empty log. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an alert, discarding the oldest beyond capacity.
    pub fn push(&mut self, alert: String) {
        self.entries.push_front(alert);
        self.entries.truncate(self.capacity);
    }

    /// The alert the banner shows.
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
