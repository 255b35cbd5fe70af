//! Fixed-capacity FIFO queue used by breadth-first traversal

use std::collections::VecDeque;
use std::fmt;

/// Returned by [`BoundedQueue::enqueue`] when the queue is at capacity.
/// Hands the rejected item back to the caller.
#[derive(Debug, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

impl<T> fmt::Display for QueueFull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is full")
    }
}

impl<T: fmt::Debug> std::error::Error for QueueFull<T> {}

/// A FIFO queue that never grows past the capacity it was created with
#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    capacity: usize,
    items: VecDeque<T>,
}

impl<T> BoundedQueue<T> {
    /// Create an empty queue holding at most `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Append an item at the back, failing when the queue is full
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueFull<T>> {
        if self.is_full() {
            return Err(QueueFull(item));
        }
        self.items.push_back(item);
        Ok(())
    }

    /// Remove the item at the front; `None` when empty
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Look at the item at the front without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// True if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if another `enqueue` would fail
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Maximum number of items the queue holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
