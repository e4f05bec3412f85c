//! [`Frontier`] – min-priority queue of discovered, unexpanded nodes.
//!
//! Entries are `(key, node index)` pairs ordered by ascending key.  Equal
//! keys pop in insertion order, so a search over an unchanged grid always
//! expands nodes in the same order.
//!
//! The queue never updates an entry in place.  When a node's key improves
//! the planner pushes a second entry; the older one stays in the heap and is
//! discarded on pop because the node is already closed by then.
//!
//! # Example
//!
//! ```rust
//! use gridnav_planner::frontier::Frontier;
//!
//! let mut frontier = Frontier::new();
//! frontier.push(2.0, 7);
//! frontier.push(1.0, 3);
//! frontier.push(1.0, 4);
//!
//! assert_eq!(frontier.pop(), Some((1.0, 3)));
//! assert_eq!(frontier.pop(), Some((1.0, 4)));
//! assert_eq!(frontier.pop(), Some((2.0, 7)));
//! assert_eq!(frontier.pop(), None);
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of `(key, node index)` pairs with FIFO tie-breaking.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `node` with priority `key`.  Lower keys pop first.
    pub fn push(&mut self, key: f64, node: usize) {
        debug_assert!(!key.is_nan(), "frontier key must not be NaN");
        self.heap.push(Entry {
            key,
            seq: self.next_seq,
            node,
        });
        self.next_seq += 1;
    }

    /// Remove and return the entry with the lowest key.
    pub fn pop(&mut self) -> Option<(f64, usize)> {
        self.heap.pop().map(|e| (e.key, e.node))
    }

    /// Number of queued entries, stale duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes since construction.
    pub fn pushes(&self) -> u64 {
        self.next_seq
    }
}
