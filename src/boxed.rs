//! A BST whose nodes own their children outright. Every node sits in its own `Box` and
//! is reachable from exactly one place: its parent's `left`/`right`, or the tree's root.
//!
//! The tree never rebalances. Keys are kept unique: inserting a key that is already
//! present leaves the tree untouched.
//!
//! # Examples
//!
//! ```
//! use search_tree::boxed::Tree;
//! use search_tree::Order;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&16).is_none());
//!
//! for key in [16, 93, -35, 62] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.width(), 2);
//!
//! // Inserting a key twice is a no-op.
//! assert!(!tree.insert(62));
//! assert_eq!(tree.len(), 4);
//!
//! let mut prefix = Vec::new();
//! tree.apply(|node| prefix.push(*node.key()), Order::DfsPrefix);
//! assert_eq!(prefix, [16, -35, 93, 62]);
//!
//! // Erasing reports whether anything was removed.
//! assert!(tree.erase(&16));
//! assert!(!tree.erase(&16));
//! assert_eq!(tree.to_sorted_vec(), [-35, 62, 93]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use log::trace;

use crate::export::SortedSink;
use crate::traversal::{self, Binary, Inorder, Order};

type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree of unique keys.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

/// A node of a [`Tree`]: a key and up to two subtrees. Everything in the left subtree
/// is smaller than the key and everything in the right subtree is larger.
pub struct Node<T> {
    key: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn boxed(key: T) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &T {
        &self.key
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<T> Binary for &Node<T> {
    fn left_child(self) -> Option<Self> {
        self.left.as_deref()
    }

    fn right_child(self) -> Option<Self> {
        self.right.as_deref()
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        let mut root = None;
        {
            // Pairs of (node to copy, empty slot its copy goes into).
            let mut pending = Vec::new();
            if let Some(source) = self.root.as_deref() {
                pending.push((source, &mut root));
            }

            while let Some((source, slot)) = pending.pop() {
                let copy = slot.insert(Node::boxed(source.key.clone()));
                let Node { left, right, .. } = &mut **copy;
                if let Some(child) = source.left.as_deref() {
                    pending.push((child, left));
                }
                if let Some(child) = source.right.as_deref() {
                    pending.push((child, right));
                }
            }
        }

        Self {
            root,
            len: self.len,
        }
    }
}

/// Two trees are equal when they have the same shape and equal keys in the same places.
/// Trees holding the same keys but built in a different insertion order usually differ.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && traversal::same_shape(self.root(), other.root(), |l, r| l.key == r.key)
    }
}

impl<T: Eq> Eq for Tree<T> {}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys in the tree. This is tracked, not counted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Inserts `key` into the tree. Returns `false`, leaving the tree as it was, if an equal
    /// key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_tree::boxed::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let slot = locate(&mut self.root, &key);
        if slot.is_some() {
            trace!("insert: key already present, ignoring");
            return false;
        }

        *slot = Some(Node::boxed(key));
        self.len += 1;
        trace!("insert: attached new node, len = {}", self.len);
        true
    }

    /// Finds the node holding a key equal to `key`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_tree::boxed::Tree;
    ///
    /// let tree: Tree<i32> = [42, 17, 69].into();
    ///
    /// assert_eq!(tree.find(&17).map(|node| *node.key()), Some(17));
    /// assert!(tree.find(&-42).is_none());
    /// ```
    pub fn find(&self, key: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }

    /// Whether a key equal to `key` is in the tree.
    pub fn contains(&self, key: &T) -> bool
    where
        T: Ord,
    {
        self.find(key).is_some()
    }

    /// Removes the key equal to `key` from the tree and returns it. If the tree has no such
    /// key, nothing happens and `None` is returned.
    ///
    /// When the removed node has two children, its in-order predecessor (the largest key of
    /// its left subtree) moves up into its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_tree::boxed::Tree;
    ///
    /// let mut tree: Tree<i32> = [42, 17, 69, 95, 62, 10, 99].into();
    ///
    /// assert_eq!(tree.take(&42), Some(42));
    /// assert_eq!(tree.root().map(|root| *root.key()), Some(17));
    /// assert_eq!(tree.take(&42), None);
    /// ```
    pub fn take(&mut self, key: &T) -> Option<T>
    where
        T: Ord,
    {
        let slot = locate(&mut self.root, key);
        let node = slot.take()?;
        let (removed, replacement) = unlink(node);
        *slot = replacement;
        self.len -= 1;

        Some(removed)
    }

    /// Removes the key equal to `key` from the tree. Returns whether anything was removed.
    pub fn erase(&mut self, key: &T) -> bool
    where
        T: Ord,
    {
        self.take(key).is_some()
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        // Nodes are detached from their children before they drop so dropping never
        // recurses, however tall the tree is. `released` fills in node, right, left
        // order; popping it back releases children before their parent.
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        let mut released = Vec::with_capacity(self.len);
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            released.push(node);
        }
        while let Some(node) = released.pop() {
            drop(node);
        }

        if self.len > 0 {
            trace!("clear: released {} nodes", self.len);
        }
        self.len = 0;
    }

    /// The smallest key in the tree.
    pub fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// The largest key in the tree.
    pub fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    /// The number of levels in the tree: 0 when empty, 1 for a lone root.
    pub fn height(&self) -> usize {
        traversal::height(self.root())
    }

    /// The largest number of nodes found on any single level of the tree.
    pub fn width(&self) -> usize {
        traversal::width(self.root())
    }

    /// Calls `visitor` on every node of the tree in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_tree::boxed::Tree;
    /// use search_tree::Order;
    ///
    /// let tree: Tree<i32> = [16, 93, -35, 62].into();
    ///
    /// let mut levels = Vec::new();
    /// tree.apply(|node| levels.push(*node.key()), Order::Bfs);
    /// assert_eq!(levels, [16, -35, 93, 62]);
    /// ```
    pub fn apply<F>(&self, visitor: F, order: Order)
    where
        F: FnMut(&Node<T>),
    {
        traversal::walk(self.root(), order, visitor);
    }

    /// An iterator over the keys, smallest first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: Inorder::new(self.root()),
            remaining: self.len,
        }
    }

    /// Appends a copy of every key, smallest first, to `sink`.
    pub fn export_sorted<S>(&self, sink: &mut S)
    where
        S: SortedSink<T>,
        T: Clone,
    {
        sink.reserve_hint(self.len);
        self.apply(|node| sink.append(node.key.clone()), Order::DfsInfix);
    }

    /// A copy of every key, smallest first.
    pub fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        self.export_sorted(&mut keys);
        keys
    }
}

/// Descends from `slot` towards `key` and returns the slot that holds it, or the empty
/// slot where it would be attached.
fn locate<'a, T: Ord>(mut slot: &'a mut Link<T>, key: &T) -> &'a mut Link<T> {
    loop {
        let ordering = slot.as_deref().map(|node| key.cmp(&node.key));
        slot = match (ordering, slot) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, found) => return found,
        };
    }
}

/// Takes `node` apart, returning its key and the subtree that should take its place.
fn unlink<T: Ord>(mut node: Box<Node<T>>) -> (T, Link<T>) {
    if node.right.is_some() {
        if let Some(predecessor) = take_max(&mut node.left) {
            trace!("erase: two children, promoting the predecessor");
            let removed = mem::replace(&mut node.key, predecessor);

            if cfg!(debug_assertions) {
                if let Some(left) = node.left() {
                    debug_assert!(node.key > left.key);
                }
                if let Some(right) = node.right() {
                    debug_assert!(node.key < right.key);
                }
            }
            return (removed, Some(node));
        }
    }

    let Node { key, left, right } = *node;
    if left.is_none() && right.is_none() {
        trace!("erase: removing a leaf");
    } else {
        trace!("erase: splicing in the only child");
    }
    (key, left.or(right))
}

/// Detaches the largest node under `slot`, splicing its left child into its place, and
/// returns its key. That node has no right child by construction.
fn take_max<T>(mut slot: &mut Link<T>) -> Option<T> {
    while slot.as_ref().map_or(false, |node| node.right.is_some()) {
        slot = &mut slot.as_mut()?.right;
    }

    let max = slot.take()?;
    let Node { key, left, .. } = *max;
    *slot = left;
    Some(key)
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Builds a tree by inserting the keys in array order.
impl<T: Ord, const N: usize> From<[T; N]> for Tree<T> {
    fn from(keys: [T; N]) -> Self {
        keys.into_iter().collect()
    }
}

/// An iterator over the keys of a [`Tree`], smallest first.
pub struct Iter<'a, T> {
    nodes: Inorder<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.nodes.next()?;
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// An owning iterator over the keys of a [`Tree`], smallest first.
pub struct IntoIter<T> {
    // Nodes whose left subtree has already been detached and queued.
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn descend_left(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let mut node = self.stack.pop()?;
        self.descend_left(node.right.take());
        self.remaining -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Draining keeps dropping a tall right spine from recursing.
        for _ in self.by_ref() {}
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: mem::take(&mut self.len),
        };
        iter.descend_left(self.root.take());
        iter
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of keys in both.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    assert_eq!(bst.insert(k.clone()), set.insert(k.clone()));
                }
                Op::Remove(k) => {
                    assert_eq!(bst.take(k), set.take(k));
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
            assert_eq!(bst.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|key| tree.contains(key))
                && tree.iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.iter().copied().collect();

            xs.iter().all(|x| tree.find(x).map(Node::key) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn owned_iteration_matches_borrowed(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.into_iter().collect();
            let borrowed: Vec<i8> = tree.iter().copied().collect();

            tree.into_iter().eq(borrowed)
        }
    }
}
