//! Bounded stack of fragments the application has navigated away from.

use crate::intent::Fragment;
use std::collections::VecDeque;

/// Default number of fragments retained before the oldest is evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Ordered record of fragments left behind by successful pushes.
///
/// The top of the stack is always the fragment the application would return
/// to on the next browser "back". Access is LIFO, but once the stack grows past
/// its capacity the *oldest* entry is dropped so memory stays bounded.
///
/// # Example
///
/// ```
/// use navigator_intercept::HistoryStack;
///
/// let mut stack = HistoryStack::with_capacity(2);
/// stack.push("/a".to_string());
/// stack.push("/b".to_string());
/// stack.push("/c".to_string());
///
/// assert_eq!(stack.len(), 2);
/// assert_eq!(stack.peek_top(), Some("/c"));
/// assert_eq!(stack.iter().next(), Some("/b"));
/// ```
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<Fragment>,
    capacity: usize,
}

impl HistoryStack {
    /// Create an empty stack with [`DEFAULT_HISTORY_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty stack that keeps at most `capacity` fragments.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY) + 1),
            capacity,
        }
    }

    /// Append a fragment, evicting the oldest entry if the cap is exceeded.
    pub fn push(&mut self, fragment: Fragment) {
        self.entries.push_back(fragment);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// The most recently pushed fragment, if any.
    pub fn peek_top(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Remove and discard the most recent fragment. No-op when empty.
    pub fn pop(&mut self) {
        self.entries.pop_back();
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
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

    /// Iterate oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}
