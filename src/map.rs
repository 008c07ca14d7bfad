//! An ordered map implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Index, RangeBounds};

use crate::compare::{Comparator, Natural};

mod iter;
pub use iter::{IntoIter, Iter, Keys, Order, Range, Traverse, Values};

/// An ordered map implemented with an AVL tree.
///
/// Nodes own their children; there are no parent links. Every mutation
/// rebuilds the path from the root to the mutation point, rebalancing each
/// node on the way back up.
///
/// An insert with a key that is already present keeps the stored key and
/// replaces its value, so the keys of a map are always strictly increasing
/// in traversal order.
///
/// ```
/// use avl_dijkstra::AvlTreeMap;
/// let mut map = AvlTreeMap::new();
/// map.insert(0, "zero");
/// map.insert(1, "one");
/// map.insert(2, "two");
/// assert_eq!(map.get(&1), Some(&"one"));
/// map.remove(&1);
/// assert!(map.get(&1).is_none());
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K, V, C = Natural> {
    root: Link<K, V>,
    num_nodes: usize,
    cmp: C,
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: usize,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Creates an empty map ordered by `K: Ord`.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> AvlTreeMap<K, V, C> {
    /// Creates an empty map ordered by the given comparator.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            cmp,
        }
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree: 0 if empty, 1 for a single entry.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Returns the number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            match (node.left.as_deref(), node.right.as_deref()) {
                (None, None) => count += 1,
                (left, right) => stack.extend(left.into_iter().chain(right)),
            }
        }
        count
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns the comparator ordering this map.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the first key-value pair in the map, i.e. the minimum.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Returns the last key-value pair in the map, i.e. the maximum.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Removes and returns the first key-value pair in the map.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (root, min_node) = Node::unlink_min(root);
        self.root = root;
        self.num_nodes -= 1;
        Some(min_node.into_entry())
    }

    /// Removes and returns the last key-value pair in the map.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (root, max_node) = Node::unlink_max(root);
        self.root = root;
        self.num_nodes -= 1;
        Some(max_node.into_entry())
    }

    /// Gets an iterator over the entries of the map in sorted order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.num_nodes)
    }

    /// Gets an iterator over the keys of the map in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    /// Gets a lazy iterator over the entries of the map in the given
    /// depth-first order.
    ///
    /// The iterator is `Clone`; cloning it or calling `traverse` again
    /// restarts the walk.
    pub fn traverse(&self, order: Order) -> Traverse<'_, K, V> {
        Traverse::new(self.root.as_deref(), order, self.num_nodes)
    }

    /// Visits all entries in level order (breadth first), left to right.
    pub fn traverse_level_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            f(&node.key, &node.value);
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, as long as
    /// the comparator orders the borrowed form consistently with `K`.
    ///
    /// ```
    /// use avl_dijkstra::AvlTreeMap;
    /// let mut map = AvlTreeMap::new();
    /// map.insert(String::from("one"), 1);
    /// assert_eq!(map.get("one"), Some(&1));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.find(key).map(|node| &node.value)
    }

    /// Returns references to the key-value pair corresponding to the key.
    pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.find(key).map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match self.cmp.compare(key, node.key.borrow()) {
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// Returns true if the map contains a value for the key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.find(key).is_some()
    }

    /// Removes a key from the map.
    /// Returns the value at the key if the key was previously in the map.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map.
    /// Returns the stored key and value if the key was previously in the map.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        let (root, removed) = Node::remove(self.root.take(), key, &self.cmp);
        self.root = root;
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Gets an iterator over a sub-range of entries in the map in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    pub fn range<Q: ?Sized, R>(&self, range: R) -> Range<'_, K, V>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
        R: RangeBounds<Q>,
    {
        Range::new(self.root.as_deref(), range, &self.cmp)
    }

    fn find<Q: ?Sized>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.cmp.compare(key, node.key.borrow()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }
}

impl<K, V, C: Comparator<K>> AvlTreeMap<K, V, C> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map already held the key, the stored key is kept, the value
    /// is replaced and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old_value) = Node::insert(self.root.take(), key, value, &self.cmp);
        self.root = Some(root);
        if old_value.is_none() {
            self.num_nodes += 1;
        }
        old_value
    }

    /// Moves all entries from other into self, leaving other empty.
    pub fn append(&mut self, other: &mut Self) {
        let mut other_root = other.root.take();
        other.num_nodes = 0;
        while let Some(root) = other_root {
            let (root, min_node) = Node::unlink_min(root);
            other_root = root;
            let (key, value) = min_node.into_entry();
            self.insert(key, value);
        }
    }

    /// Asserts that the internal tree structure is consistent:
    /// AVL balance, cached heights, key order and node count.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check_node<K, V, C: Comparator<K>>(node: &Node<K, V>, cmp: &C) -> (usize, usize) {
            let mut left_height = 0;
            let mut right_height = 0;
            let mut num_nodes = 1;

            // Check left child node
            if let Some(left) = node.left.as_deref() {
                assert_eq!(cmp.compare(&left.key, &node.key), Ordering::Less);
                let (height, count) = check_node(left, cmp);
                left_height = height;
                num_nodes += count;
            }

            // Check right child node
            if let Some(right) = node.right.as_deref() {
                assert_eq!(cmp.compare(&right.key, &node.key), Ordering::Greater);
                let (height, count) = check_node(right, cmp);
                right_height = height;
                num_nodes += count;
            }

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            (node.height, num_nodes)
        }

        let num_nodes = match self.root.as_deref() {
            None => 0,
            Some(root) => check_node(root, &self.cmp).1,
        };
        assert_eq!(num_nodes, self.num_nodes);

        // Check strict order of all keys, not only between parent and child
        let mut keys = self.keys();
        if let Some(mut prev) = keys.next() {
            for key in keys {
                assert_eq!(self.cmp.compare(prev, key), Ordering::Less);
                prev = key;
            }
        }
    }
}

fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<K, V> Node<K, V> {
    fn create(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn into_entry(self: Box<Self>) -> (K, V) {
        (self.key, self.value)
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    // Inserts into the subtree rooted at `link` and returns its new root.
    fn insert<C: Comparator<K>>(
        link: Link<K, V>,
        key: K,
        value: V,
        cmp: &C,
    ) -> (Box<Self>, Option<V>) {
        let mut node = match link {
            None => return (Node::create(key, value), None),
            Some(node) => node,
        };
        let old_value = match cmp.compare(&key, &node.key) {
            Ordering::Equal => {
                let old_value = mem::replace(&mut node.value, value);
                // Shape unchanged, no rebalancing needed
                return (node, Some(old_value));
            }
            Ordering::Less => {
                let (left, old_value) = Node::insert(node.left.take(), key, value, cmp);
                node.left = Some(left);
                old_value
            }
            Ordering::Greater => {
                let (right, old_value) = Node::insert(node.right.take(), key, value, cmp);
                node.right = Some(right);
                old_value
            }
        };
        (Node::rebalance(node), old_value)
    }

    // Removes `key` from the subtree rooted at `link` and returns its new root.
    fn remove<Q, C>(link: Link<K, V>, key: &Q, cmp: &C) -> (Link<K, V>, Option<(K, V)>)
    where
        Q: ?Sized,
        K: Borrow<Q>,
        C: Comparator<Q>,
    {
        let mut node = match link {
            None => return (None, None),
            Some(node) => node,
        };
        match cmp.compare(key, node.key.borrow()) {
            Ordering::Less => {
                let (left, removed) = Node::remove(node.left.take(), key, cmp);
                node.left = left;
                (Some(Node::rebalance(node)), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Node::remove(node.right.take(), key, cmp);
                node.right = right;
                (Some(Node::rebalance(node)), removed)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => (None, Some(node.into_entry())),
                (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.into_entry())),
                (Some(left), Some(right)) => {
                    // Replace by smallest node of right sub tree (in-order successor)
                    let (right, mut successor) = Node::unlink_min(right);
                    successor.left = Some(left);
                    successor.right = right;
                    (Some(Node::rebalance(successor)), Some(node.into_entry()))
                }
            },
        }
    }

    // Detaches the leftmost node of the subtree.
    // Returns the rebalanced remainder and the detached node.
    fn unlink_min(mut node: Box<Self>) -> (Link<K, V>, Box<Self>) {
        match node.left.take() {
            None => {
                let right = node.right.take();
                (right, node)
            }
            Some(left) => {
                let (left, min_node) = Node::unlink_min(left);
                node.left = left;
                (Some(Node::rebalance(node)), min_node)
            }
        }
    }

    // Detaches the rightmost node of the subtree.
    fn unlink_max(mut node: Box<Self>) -> (Link<K, V>, Box<Self>) {
        match node.right.take() {
            None => {
                let left = node.left.take();
                (left, node)
            }
            Some(right) => {
                let (right, max_node) = Node::unlink_max(right);
                node.right = right;
                (Some(Node::rebalance(node)), max_node)
            }
        }
    }

    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            Some(mut right) => {
                node.right = right.left.take();
                node.adjust_height();
                right.left = Some(node);
                right.adjust_height();
                right
            }
            None => node,
        }
    }

    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            Some(mut left) => {
                node.left = left.right.take();
                node.adjust_height();
                left.right = Some(node);
                left.adjust_height();
                left
            }
            None => node,
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    /// Returns the root of the rebalanced subtree.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        node.adjust_height();
        let balance = node.balance_factor();
        debug_assert!((-2..=2).contains(&balance));
        if balance > 1 {
            // Left heavy, rotate right
            if let Some(left) = node.left.take() {
                node.left = Some(if left.balance_factor() < 0 {
                    Node::rotate_left(left)
                } else {
                    left
                });
            }
            Node::rotate_right(node)
        } else if balance < -1 {
            // Right heavy, rotate left
            if let Some(right) = node.right.take() {
                node.right = Some(if right.balance_factor() > 0 {
                    Node::rotate_right(right)
                } else {
                    right
                });
            }
            Node::rotate_left(node)
        } else {
            node
        }
    }
}

impl<K: Ord, V> Default for AvlTreeMap<K, V> {
    /// Creates an empty map.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for AvlTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for AvlTreeMap<K, V, C> {}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for AvlTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, Q: ?Sized, V, C> Index<&Q> for AvlTreeMap<K, V, C>
where
    K: Borrow<Q>,
    C: Comparator<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for AvlTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |(key, value)| {
            self.insert(key, value);
        });
    }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for AvlTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.num_nodes)
    }
}
