//! Bounded sliding window used by the text and click-rhythm recognizers.

use std::collections::VecDeque;

/// FIFO window of the most recent input units.
///
/// Pushing beyond capacity evicts the oldest unit. Recognizers clear the
/// window whenever it produces a match.
///
/// # Examples
///
/// ```
/// use voidgate::detectors::DetectorBuffer;
///
/// let mut buffer = DetectorBuffer::new(4);
/// for c in "xhell".chars() {
///     buffer.push(c);
/// }
/// assert_eq!(buffer.text(), "hell");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorBuffer<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> DetectorBuffer<T> {
    /// Creates an empty window. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T: PartialEq> DetectorBuffer<T> {
    /// Exact, full-window equality with `pattern`.
    #[must_use]
    pub fn matches_exactly(&self, pattern: &[T]) -> bool {
        self.items.len() == pattern.len() && self.items.iter().eq(pattern.iter())
    }
}

impl DetectorBuffer<char> {
    /// Window contents as a string, oldest first.
    #[must_use]
    pub fn text(&self) -> String {
        self.items.iter().collect()
    }

    /// Whether `word` occurs as a contiguous substring of the window.
    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        !word.is_empty() && self.text().contains(word)
    }
}
