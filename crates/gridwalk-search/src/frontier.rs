use std::collections::{BinaryHeap, HashSet};

use gridwalk_core::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    f: i32,
    seq: u64,
    pos: Pos,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The A* open set: a min-heap keyed by `(f_score, insertion sequence)` with a
/// membership set kept in lock-step.
///
/// Priorities are fixed at insertion. A position already queued is never
/// queued again, so an improved score does not move its entry.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    members: HashSet<Pos>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with priority `f` and return its sequence number. The first
    /// push gets 0.
    pub fn push(&mut self, pos: Pos, f: i32) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { f, seq, pos });
        self.members.insert(pos);
        seq
    }

    /// Remove and return the position with the smallest `(f, seq)`.
    pub fn pop(&mut self) -> Option<Pos> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.pos);
        Some(entry.pos)
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.members.contains(&pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
