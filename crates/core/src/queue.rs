//! Min-priority queue used by the tree builder.
//!
//! Equal priorities are dequeued in insertion order (first in, first out).
//! The shape of a Huffman tree depends on how ties are broken, so this rule is
//! part of the compressed format: two implementations agree on the bytes they
//! produce only if they agree on it.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Min-priority queue ADT.
pub trait PriorityQueue<T> {
    fn enqueue(&mut self, item: T, priority: u64);

    /// Remove and return the item with the lowest priority.
    fn dequeue(&mut self) -> Option<T>;

    /// The item `dequeue` would return next.
    fn peek(&self) -> Option<&T>;

    fn size(&self) -> usize;
}

/// An item with its priority and insertion sequence number.
#[derive(Debug)]
struct Entry<T> {
    priority: u64,
    sequence: u64,
    item: T,
}

// Ordering for the heap (min-heap: lowest priority, then oldest, first)
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Binary-heap priority queue with FIFO tie-breaking.
#[derive(Debug)]
pub struct StableMinQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_sequence: u64,
}

impl<T> StableMinQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for StableMinQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> for StableMinQueue<T> {
    fn enqueue(&mut self, item: T, priority: u64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Entry {
            priority,
            sequence,
            item,
        });
    }

    fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|entry| &entry.item)
    }

    fn size(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_priority_first() {
        let mut queue = StableMinQueue::new();
        queue.enqueue("c", 30);
        queue.enqueue("a", 10);
        queue.enqueue("b", 20);

        assert_eq!(queue.size(), 3);
        assert_eq!(queue.peek(), Some(&"a"));
        assert_eq!(queue.dequeue(), Some("a"));
        assert_eq!(queue.dequeue(), Some("b"));
        assert_eq!(queue.dequeue(), Some("c"));
        assert_eq!(queue.dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut queue = StableMinQueue::new();
        for (i, name) in ["first", "second", "third", "fourth"].iter().enumerate() {
            queue.enqueue(*name, if i == 2 { 0 } else { 5 });
        }

        assert_eq!(queue.dequeue(), Some("third"));
        assert_eq!(queue.dequeue(), Some("first"));
        assert_eq!(queue.dequeue(), Some("second"));
        assert_eq!(queue.dequeue(), Some("fourth"));
    }

    #[test]
    fn test_reinserted_item_goes_behind_existing_ties() {
        let mut queue = StableMinQueue::new();
        queue.enqueue(1, 2);
        queue.enqueue(2, 2);
        let first = queue.dequeue().unwrap();
        queue.enqueue(first, 2);

        assert_eq!(queue.dequeue(), Some(2));
        assert_eq!(queue.dequeue(), Some(1));
    }
}
