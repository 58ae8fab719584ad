// src/plan/ready_queue.rs

//! Max-priority queue of edges whose inputs are all ready.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::EdgeIdx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    priority: u64,
    edge: EdgeIdx,
}

impl Entry {
    /// Ordering key. Encoded priorities are unique, so the edge index only
    /// matters if a caller pushes hand-made duplicates.
    fn key(&self) -> (u64, std::cmp::Reverse<EdgeIdx>) {
        (self.priority, std::cmp::Reverse(self.edge))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pops edges in descending priority order.
///
/// No deduplication: the readiness tracker pushes each edge once.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<Entry>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edge: EdgeIdx, priority: u64) {
        self.heap.push(Entry { priority, edge });
    }

    pub fn pop(&mut self) -> Option<EdgeIdx> {
        self.heap.pop().map(|entry| entry.edge)
    }

    /// Highest-priority edge without removing it.
    pub fn peek(&self) -> Option<EdgeIdx> {
        self.heap.peek().map(|entry| entry.edge)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
