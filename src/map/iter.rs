use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};
use std::ptr;

use super::{Link, Node};
use crate::compare::Comparator;

/// Depth-first traversal orders accepted by [`AvlTreeMap::traverse`](super::AvlTreeMap::traverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. This is sorted order.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

/// An iterator over the entries of a map, in sorted order.
pub struct Iter<'a, K, V> {
    front: Vec<&'a Node<K, V>>,
    back: Vec<&'a Node<K, V>>,
    remaining: usize,
}

/// An iterator over the keys of a map, in sorted order.
pub struct Keys<'a, K, V> {
    pub(super) iter: Iter<'a, K, V>,
}

/// An iterator over the values of a map, in order by key.
pub struct Values<'a, K, V> {
    pub(super) iter: Iter<'a, K, V>,
}

/// A lazy depth-first walk over the entries of a map.
pub struct Traverse<'a, K, V> {
    // Second field marks nodes whose children have already been scheduled
    stack: Vec<(&'a Node<K, V>, bool)>,
    order: Order,
    remaining: usize,
}

/// An iterator over a range of entries of a map, in sorted order.
pub struct Range<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    last: Option<&'a Node<K, V>>,
}

/// An owning iterator over the entries of a map, in sorted order.
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            front: Vec::new(),
            back: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter.push_right_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.front.push(node);
            current = node.left.as_deref();
        }
    }

    fn push_right_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.back.push(node);
            current = node.right.as_deref();
        }
    }
}

// Auto derived clone seems to have an invalid type bound of K: Clone
impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.push_right_spine(node.left.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<'a, K, V> Traverse<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>, order: Order, len: usize) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = root {
            stack.push((root, false));
        }
        Self {
            stack,
            order,
            remaining: len,
        }
    }

    /// Returns the order of this traversal.
    pub fn order(&self) -> Order {
        self.order
    }

    // Schedules node and children so that pops come out in traversal order.
    fn expand(&mut self, node: &'a Node<K, V>) {
        let left = node.left.as_deref().map(|left| (left, false));
        let right = node.right.as_deref().map(|right| (right, false));
        let this = Some((node, true));
        let scheduled = match self.order {
            Order::PreOrder => [right, left, this],
            Order::InOrder => [right, this, left],
            Order::PostOrder => [this, right, left],
        };
        self.stack.extend(scheduled.into_iter().flatten());
    }
}

impl<K, V> Clone for Traverse<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            order: self.order,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Traverse<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.order)?;
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Traverse<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            self.expand(node);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Traverse<'_, K, V> {}

impl<K, V> FusedIterator for Traverse<'_, K, V> {}

impl<'a, K, V> Range<'a, K, V> {
    pub(super) fn new<Q, R, C>(root: Option<&'a Node<K, V>>, range: R, cmp: &C) -> Self
    where
        Q: ?Sized,
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        C: Comparator<Q>,
    {
        let start = range.start_bound();
        let end = range.end_bound();
        match (start, end) {
            (Bound::Excluded(s), Bound::Excluded(e)) if cmp.compare(s, e) == Ordering::Equal => {
                panic!("range start and end are equal and excluded")
            }
            (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e))
                if cmp.compare(s, e) == Ordering::Greater =>
            {
                panic!("range start is greater than range end")
            }
            _ => {}
        }

        // Path to first node not before start
        let mut stack = Vec::new();
        let mut current = root;
        while let Some(node) = current {
            let after_start = match start {
                Bound::Included(s) => cmp.compare(node.key.borrow(), s) != Ordering::Less,
                Bound::Excluded(s) => cmp.compare(node.key.borrow(), s) == Ordering::Greater,
                Bound::Unbounded => true,
            };
            if after_start {
                stack.push(node);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }

        // Last node not after end
        let mut last = None;
        let mut current = root;
        while let Some(node) = current {
            let before_end = match end {
                Bound::Included(e) => cmp.compare(node.key.borrow(), e) != Ordering::Greater,
                Bound::Excluded(e) => cmp.compare(node.key.borrow(), e) == Ordering::Less,
                Bound::Unbounded => true,
            };
            if before_end {
                last = Some(node);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }

        let is_empty = match (stack.last(), last) {
            (Some(first), Some(last)) => {
                cmp.compare(first.key.borrow(), last.key.borrow()) == Ordering::Greater
            }
            _ => true,
        };
        if is_empty {
            stack.clear();
            last = None;
        }
        Self { stack, last }
    }
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            last: self.last,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if self.last.map_or(false, |last| ptr::eq(node, last)) {
            self.stack.clear();
            self.last = None;
        } else {
            let mut current = node.right.as_deref();
            while let Some(child) = current {
                self.stack.push(child);
                current = child.left.as_deref();
            }
        }
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(root: Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.push_left_spine(right);
        self.remaining -= 1;
        Some(node.into_entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
