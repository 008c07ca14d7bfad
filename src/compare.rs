//! Ordering strategies for maps, sets and queues.
//!
//! A comparator is chosen once, when the collection is created, and used for
//! every comparison afterwards.

use std::cmp::Ordering;

/// A total order over values of type `T`.
pub trait Comparator<T: ?Sized> {
    /// Compares two values.
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

/// Orders values by their `Ord` implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

/// Orders values in reverse of their `Ord` implementation.
///
/// A [`PriorityQueue`](crate::PriorityQueue) using this comparator pops the
/// largest priority first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<T: Ord + ?Sized> Comparator<T> for Reversed {
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        rhs.cmp(lhs)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}
