// src/history.rs
use std::collections::VecDeque;

/// Fixed-capacity FIFO buffer of the most recent items.
///
/// Backs both the packet audit log and the chart series: once full, every
/// push evicts the oldest entry, so memory stays bounded no matter how long
/// the engine runs. Readers only ever get independent copies via
/// [`History::snapshot`], never references into the live deque.
#[derive(Debug)]
pub struct History<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> Self {
        History {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an item, evicting the oldest entry if the buffer is full.
    /// A zero-capacity buffer accepts nothing.
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> History<T> {
    /// Returns the most recent `limit` items in insertion order, cloned out.
    pub fn snapshot(&self, limit: usize) -> Vec<T> {
        let skip = self.items.len().saturating_sub(limit);
        self.items.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_everything_under_capacity() {
        let mut h = History::new(5);
        for i in 0..3 {
            h.push(i);
        }
        assert_eq!(h.snapshot(usize::MAX), vec![0, 1, 2]);
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut h = History::new(3);
        for i in 0..10 {
            h.push(i);
        }
        assert_eq!(h.snapshot(usize::MAX), vec![7, 8, 9]);
    }

    #[test]
    fn snapshot_limit_takes_most_recent() {
        let mut h = History::new(10);
        for i in 0..10 {
            h.push(i);
        }
        assert_eq!(h.snapshot(4), vec![6, 7, 8, 9]);
        assert_eq!(h.snapshot(0), Vec::<i32>::new());
    }

    #[test]
    fn length_is_min_of_appends_and_capacity() {
        for (appends, capacity) in [(0usize, 4usize), (4, 4), (9, 4), (2, 7), (5, 0)] {
            let mut h = History::new(capacity);
            for i in 0..appends {
                h.push(i);
            }
            assert_eq!(h.snapshot(usize::MAX).len(), appends.min(capacity));
        }
    }

    #[test]
    fn zero_capacity_buffer_holds_nothing() {
        let mut h = History::new(0);
        for i in 0..50 {
            h.push(i);
        }
        assert_eq!(h.snapshot(usize::MAX), Vec::<i32>::new());
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut h = History::new(3);
        h.push(1);
        h.clear();
        assert_eq!(h.snapshot(usize::MAX), Vec::<i32>::new());
    }
}
