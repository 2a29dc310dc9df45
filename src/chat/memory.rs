//! Rolling memory of recent parameter summaries.

use std::collections::VecDeque;

use crate::config::MemoryConfig;

/// Default number of summaries kept.
pub const DEFAULT_MEMORY_CAPACITY: usize = 10;

/// Bounded FIFO of parameter summaries; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct ParameterMemory {
    capacity: usize,
    entries: VecDeque<String>,
}

impl Default for ParameterMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CAPACITY)
    }
}

impl From<&MemoryConfig> for ParameterMemory {
    fn from(config: &MemoryConfig) -> Self {
        Self::new(config.capacity)
    }
}

impl ParameterMemory {
    /// Memory holding at most `capacity` summaries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Remember a summary, evicting the oldest when full.
    pub fn push(&mut self, summary: impl Into<String>) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(summary.into());
    }

    /// The newest `n` summaries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&str> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(String::as_str).collect()
    }

    /// Number of summaries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of summaries held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
