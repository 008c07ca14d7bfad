//! An ordered set implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::RangeBounds;

use crate::compare::{Comparator, Natural};
use crate::map::{self, AvlTreeMap, Order};

/// An ordered set implemented with an AVL tree.
///
/// Values double as keys. Inserting a value equal to one already in the set
/// leaves the set unchanged.
///
/// ```
/// use avl_dijkstra::AvlTreeSet;
/// let mut set = AvlTreeSet::new();
/// set.insert(0);
/// set.insert(1);
/// set.insert(2);
/// assert_eq!(set.get(&1), Some(&1));
/// set.remove(&1);
/// assert!(set.get(&1).is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AvlTreeSet<T, C = Natural> {
    map: AvlTreeMap<T, (), C>,
}

/// An iterator over the values of a set.
pub struct Iter<'a, T> {
    map_iter: map::Iter<'a, T, ()>,
}

/// A depth-first walk over the values of a set.
pub struct Traverse<'a, T> {
    map_traverse: map::Traverse<'a, T, ()>,
}

/// An iterator over a range of values of a set.
pub struct Range<'a, T> {
    map_range: map::Range<'a, T, ()>,
}

/// An owning iterator over the values of a set.
pub struct IntoIter<T> {
    map_into_iter: map::IntoIter<T, ()>,
}

/// A lazy iterator for the values in the union of two sets.
///
/// This `struct` is created by the [`union`] method on [`AvlTreeSet`].
///
/// [`union`]: AvlTreeSet::union
pub struct Union<'a, T, C> {
    lhs_peek: Option<&'a T>,
    rhs_peek: Option<&'a T>,
    lhs_iter: Iter<'a, T>,
    rhs_iter: Iter<'a, T>,
    cmp: &'a C,
}

/// A lazy iterator for the values in the intersection of two sets.
///
/// This `struct` is created by the [`intersection`] method on [`AvlTreeSet`].
///
/// [`intersection`]: AvlTreeSet::intersection
pub struct Intersection<'a, T, C> {
    lhs_peek: Option<&'a T>,
    rhs_peek: Option<&'a T>,
    lhs_iter: Iter<'a, T>,
    rhs_iter: Iter<'a, T>,
    cmp: &'a C,
}

impl<T: Ord> AvlTreeSet<T> {
    /// Creates an empty set.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            map: AvlTreeMap::new(),
        }
    }
}

impl<T, C: Comparator<T>> AvlTreeSet<T, C> {
    /// Creates an empty set ordered by the given comparator.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            map: AvlTreeMap::with_comparator(cmp),
        }
    }

    /// Inserts a value into the set.
    /// Returns false, leaving the stored value in place, if an equal value was present.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Moves all values from other into self, leaving other empty.
    pub fn append(&mut self, other: &mut Self) {
        self.map.append(&mut other.map);
    }

    /// Gets an iterator over the values of the union set,
    /// i.e., all values in `self` or `other`, without duplicates,
    /// in ascending order.
    pub fn union<'a>(&'a self, other: &'a Self) -> Union<'a, T, C> {
        let mut lhs_iter = self.iter();
        let mut rhs_iter = other.iter();
        Union {
            lhs_peek: lhs_iter.next(),
            rhs_peek: rhs_iter.next(),
            lhs_iter,
            rhs_iter,
            cmp: self.map.comparator(),
        }
    }

    /// Gets an iterator over the values of the intersection set,
    /// i.e., all values that are both in `self` and `other`,
    /// in ascending order.
    pub fn intersection<'a>(&'a self, other: &'a Self) -> Intersection<'a, T, C> {
        let mut lhs_iter = self.iter();
        let mut rhs_iter = other.iter();
        Intersection {
            lhs_peek: lhs_iter.next(),
            rhs_peek: rhs_iter.next(),
            lhs_iter,
            rhs_iter,
            cmp: self.map.comparator(),
        }
    }

    /// Returns `true` if `self` has no elements in common with `other`.
    /// This is equivalent to checking for an empty intersection.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).next().is_none()
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.map.check_consistency()
    }
}

impl<T, C> AvlTreeSet<T, C> {
    /// Returns a reference to the value in the set that is equal to the given value.
    ///
    /// The value may be any borrowed form of the set's value type.
    ///
    /// ```
    /// use avl_dijkstra::AvlTreeSet;
    /// let set: AvlTreeSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    /// assert_eq!(set.get("b").map(String::as_str), Some("b"));
    /// assert!(!set.contains("c"));
    /// ```
    pub fn get<Q: ?Sized>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.map.get_key_value(value).map(|kv| kv.0)
    }

    /// Returns true if the set contains a value.
    pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.map.contains_key(value)
    }

    /// Removes a value from the set.
    /// Returns whether the value was previously in the set.
    pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.map.remove(value).is_some()
    }

    /// Removes a value from the set.
    /// Returns the value if it was previously in the set.
    pub fn take<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.map.remove_entry(value).map(|(k, _)| k)
    }

    /// Gets an iterator over a sub-range of values in the set in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    pub fn range<Q: ?Sized, R>(&self, range: R) -> Range<'_, T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        R: RangeBounds<Q>,
    {
        Range {
            map_range: self.map.range(range),
        }
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns the height of the underlying tree.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the number of leaves of the underlying tree.
    pub fn leaf_count(&self) -> usize {
        self.map.leaf_count()
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the minimum value of the set.
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|kv| kv.0)
    }

    /// Returns the maximum value of the set.
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|kv| kv.0)
    }

    /// Removes and returns the minimum value of the set.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|kv| kv.0)
    }

    /// Removes and returns the maximum value of the set.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|kv| kv.0)
    }

    /// Gets an iterator over the values of the set in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            map_iter: self.map.iter(),
        }
    }

    /// Gets a lazy iterator over the values of the set in the given order.
    pub fn traverse(&self, order: Order) -> Traverse<'_, T> {
        Traverse {
            map_traverse: self.map.traverse(order),
        }
    }
}

impl<T: Ord> Default for AvlTreeSet<T> {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: fmt::Debug, C> fmt::Debug for AvlTreeSet<T, C> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a AvlTreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for AvlTreeSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            map_into_iter: self.map.into_iter(),
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for AvlTreeSet<T, C> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<'a, T, C> Extend<&'a T> for AvlTreeSet<T, C>
where
    T: Copy + 'a,
    C: Comparator<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}

// Auto derived clone seems to have an invalid type bound of T: Clone
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            map_iter: self.map_iter.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map_iter.next_back().map(|(k, _)| k)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Traverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            map_traverse: self.map_traverse.clone(),
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.map_traverse.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_traverse.size_hint()
    }
}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Self {
            map_range: self.map_range.clone(),
        }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.map_range.next().map(|(k, _)| k)
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.map_into_iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.map_into_iter.size_hint()
    }
}

impl<'a, T, C: Comparator<T>> Iterator for Union<'a, T, C> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        match (self.lhs_peek, self.rhs_peek) {
            (None, None) => None,
            (Some(lhs), None) => {
                self.lhs_peek = self.lhs_iter.next();
                Some(lhs)
            }
            (None, Some(rhs)) => {
                self.rhs_peek = self.rhs_iter.next();
                Some(rhs)
            }
            (Some(lhs), Some(rhs)) => match self.cmp.compare(lhs, rhs) {
                Ordering::Less => {
                    self.lhs_peek = self.lhs_iter.next();
                    Some(lhs)
                }
                Ordering::Equal => {
                    self.lhs_peek = self.lhs_iter.next();
                    self.rhs_peek = self.rhs_iter.next();
                    Some(lhs)
                }
                Ordering::Greater => {
                    self.rhs_peek = self.rhs_iter.next();
                    Some(rhs)
                }
            },
        }
    }
}

impl<'a, T, C: Comparator<T>> Iterator for Intersection<'a, T, C> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match (self.lhs_peek, self.rhs_peek) {
                (None, _) | (_, None) => return None,
                (Some(lhs), Some(rhs)) => match self.cmp.compare(lhs, rhs) {
                    Ordering::Equal => {
                        self.lhs_peek = self.lhs_iter.next();
                        self.rhs_peek = self.rhs_iter.next();
                        return Some(lhs);
                    }
                    Ordering::Less => {
                        self.lhs_peek = self.lhs_iter.next();
                    }
                    Ordering::Greater => {
                        self.rhs_peek = self.rhs_iter.next();
                    }
                },
            }
        }
    }
}
