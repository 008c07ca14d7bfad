//! A priority queue backed by an AVL tree map.
//!
//! Entries are keyed by `(priority, sequence)`, where the sequence number is
//! taken from a per-queue counter on every push. Equal priorities therefore
//! never collide in the tree and are popped in insertion order. The same
//! payload may be pushed any number of times with different priorities; the
//! queue does not deduplicate.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use crate::compare::{Comparator, Natural};
use crate::map::{self, AvlTreeMap};

/// A priority queue that pops the entry with the least priority first.
///
/// The notion of "least" is the queue's comparator, fixed at construction:
/// a [`Reversed`](crate::Reversed) comparator turns it into a max-queue.
///
/// ```
/// use avl_dijkstra::PriorityQueue;
/// let mut queue = PriorityQueue::new();
/// queue.push(3, "c");
/// queue.push(1, "a");
/// queue.push(1, "b");
/// assert_eq!(queue.pop(), Some((1, "a")));
/// assert_eq!(queue.pop(), Some((1, "b")));
/// assert_eq!(queue.pop(), Some((3, "c")));
/// assert_eq!(queue.pop(), None);
/// ```
#[derive(Clone)]
pub struct PriorityQueue<P, T, C = Natural> {
    map: AvlTreeMap<QueueKey<P>, T, SequenceOrder<C>>,
    next_seq: u64,
}

/// An iterator over the entries of a queue, in the order they would be popped.
pub struct Iter<'a, P, T> {
    map_iter: map::Iter<'a, QueueKey<P>, T>,
}

#[derive(Debug, Clone)]
struct QueueKey<P> {
    priority: P,
    seq: u64,
}

// Orders by priority first, then by push order.
#[derive(Debug, Clone, Default)]
struct SequenceOrder<C>(C);

impl<P, C: Comparator<P>> Comparator<QueueKey<P>> for SequenceOrder<C> {
    fn compare(&self, lhs: &QueueKey<P>, rhs: &QueueKey<P>) -> Ordering {
        self.0
            .compare(&lhs.priority, &rhs.priority)
            .then_with(|| lhs.seq.cmp(&rhs.seq))
    }
}

impl<P: Ord, T> PriorityQueue<P, T> {
    /// Creates an empty min-queue.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<P, T, C> PriorityQueue<P, T, C> {
    /// Creates an empty queue ordered by the given comparator.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            map: AvlTreeMap::with_comparator(SequenceOrder(cmp)),
            next_seq: 0,
        }
    }

    /// Returns true if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of entries in the queue, stale or not.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the entry that would be popped next, without removing it.
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.map
            .first_key_value()
            .map(|(key, payload)| (&key.priority, payload))
    }

    /// Removes and returns the entry with the least priority.
    /// Among equal priorities the earliest pushed entry comes first.
    /// Returns `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<(P, T)> {
        self.map
            .pop_first()
            .map(|(key, payload)| (key.priority, payload))
    }

    /// Gets an iterator over the entries in pop order.
    pub fn iter(&self) -> Iter<'_, P, T> {
        Iter {
            map_iter: self.map.iter(),
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self)
    where
        C: Comparator<P>,
    {
        self.map.check_consistency()
    }
}

impl<P, T, C: Comparator<P>> PriorityQueue<P, T, C> {
    /// Adds an entry to the queue.
    pub fn push(&mut self, priority: P, payload: T) {
        let key = QueueKey {
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let replaced = self.map.insert(key, payload);
        debug_assert!(replaced.is_none());
    }
}

impl<P: Ord, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug, T: fmt::Debug, C> fmt::Debug for PriorityQueue<P, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<P: Ord, T> FromIterator<(P, T)> for PriorityQueue<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<P, T, C: Comparator<P>> Extend<(P, T)> for PriorityQueue<P, T, C> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |(priority, payload)| {
            self.push(priority, payload);
        });
    }
}

impl<'a, P, T, C> IntoIterator for &'a PriorityQueue<P, T, C> {
    type Item = (&'a P, &'a T);
    type IntoIter = Iter<'a, P, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P, T> Clone for Iter<'_, P, T> {
    fn clone(&self) -> Self {
        Self {
            map_iter: self.map_iter.clone(),
        }
    }
}

impl<'a, P, T> Iterator for Iter<'a, P, T> {
    type Item = (&'a P, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter
            .next()
            .map(|(key, payload)| (&key.priority, payload))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_iter.size_hint()
    }
}

impl<P, T> ExactSizeIterator for Iter<'_, P, T> {}
