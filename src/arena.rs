//! A BST whose nodes live side by side in one `Vec` and refer to each other by
//! [`NodeId`]. Besides its children, every node records the id of its parent. The
//! parent id never owns anything: it only lets a node step upwards in O(1), which is
//! what [`NodeRef::predecessor`] and [`NodeRef::successor`] need to walk the keys in
//! order without a stack, and what `erase` uses to unlink a node without searching
//! for it a second time.
//!
//! Slots freed by `erase` are remembered and handed out again by later inserts.
//!
//! # Examples
//!
//! ```
//! use search_tree::arena::Tree;
//!
//! let mut tree: Tree<i32> = [42, 17, 69, 95, 62, 10, 99].into();
//!
//! let sixty_two = tree.find(&62).unwrap();
//! assert_eq!(sixty_two.parent().map(|p| *p.key()), Some(69));
//! assert_eq!(sixty_two.predecessor().map(|p| *p.key()), Some(42));
//! assert_eq!(sixty_two.successor().map(|s| *s.key()), Some(69));
//!
//! assert!(tree.erase(&42));
//! assert_eq!(tree.root().map(|root| *root.key()), Some(17));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [10, 17, 62, 69, 95, 99]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use log::{debug, trace};

use crate::export::SortedSink;
use crate::traversal::{self, Binary, Order};

/// The position of a node in its tree's arena.
///
/// Ids stay valid until the node they name is erased (or the tree cleared), after which
/// the slot may be reused for a different key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The index of the slot this id refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    key: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

/// An unbalanced Binary Search Tree of unique keys with parent links, stored in an arena.
#[derive(Clone)]
pub struct Tree<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
}

/// A read-only handle onto one node of a [`Tree`].
pub struct NodeRef<'a, T> {
    tree: &'a Tree<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", self.key())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    fn at(self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self { id, ..self })
    }

    fn node(self) -> &'a Node<T> {
        self.tree.node(self.id)
    }

    /// The id of this node.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn key(self) -> &'a T {
        &self.node().key
    }

    /// The root of the left subtree, if any.
    pub fn left(self) -> Option<Self> {
        self.at(self.node().left)
    }

    /// The root of the right subtree, if any.
    pub fn right(self) -> Option<Self> {
        self.at(self.node().right)
    }

    /// The node this one hangs from. `None` for the root.
    pub fn parent(self) -> Option<Self> {
        self.at(self.node().parent)
    }

    /// The node holding the next smaller key.
    pub fn predecessor(self) -> Option<Self> {
        if let Some(mut node) = self.left() {
            while let Some(right) = node.right() {
                node = right;
            }
            return Some(node);
        }

        // Climb until we arrive at a parent from its right side.
        let mut child = self;
        while let Some(parent) = child.parent() {
            if parent.node().right == Some(child.id) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// The node holding the next larger key.
    pub fn successor(self) -> Option<Self> {
        if let Some(mut node) = self.right() {
            while let Some(left) = node.left() {
                node = left;
            }
            return Some(node);
        }

        let mut child = self;
        while let Some(parent) = child.parent() {
            if parent.node().left == Some(child.id) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }
}

impl<T> Binary for NodeRef<'_, T> {
    fn left_child(self) -> Option<Self> {
        self.left()
    }

    fn right_child(self) -> Option<Self> {
        self.right()
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

/// Two trees are equal when they have the same shape and equal keys in the same places.
/// Where the nodes happen to sit in the arena doesn't matter.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && traversal::same_shape(self.root(), other.root(), |l, r| l.key() == r.key())
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
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
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
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.handle(self.root)
    }

    /// The node with the given id, or `None` if that slot is currently free.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.slots.get(id.0)?.as_ref()?;
        Some(NodeRef { tree: self, id })
    }

    fn handle(&self, id: Option<NodeId>) -> Option<NodeRef<'_, T>> {
        id.map(|id| NodeRef { tree: self, id })
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.slots[id.0]
            .as_ref()
            .expect("A linked NodeId refers to an occupied slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id.0]
            .as_mut()
            .expect("A linked NodeId refers to an occupied slot")
    }

    fn allocate(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                debug!("reusing arena slot {}", id.0);
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<T> {
        let node = self.slots[id.0]
            .take()
            .expect("Releasing a node implies it was occupied");
        self.free.push(id);
        node
    }

    /// Points whatever referred to `old` (its parent's link, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
        }
    }

    fn locate(&self, key: &T) -> Option<NodeId>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }

        None
    }

    /// Inserts `key` into the tree. Returns `false`, leaving the tree as it was, if an equal
    /// key is already present.
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        // The last node visited and the side of it the descent left through.
        let mut attach_to = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            let ordering = key.cmp(&node.key);
            current = match ordering {
                Ordering::Less => node.left,
                Ordering::Equal => {
                    trace!("insert: key already present, ignoring");
                    return false;
                }
                Ordering::Greater => node.right,
            };
            attach_to = Some((id, ordering));
        }

        let id = self.allocate(Node {
            key,
            left: None,
            right: None,
            parent: attach_to.map(|(parent, _)| parent),
        });
        match attach_to {
            None => self.root = Some(id),
            Some((parent, Ordering::Less)) => self.node_mut(parent).left = Some(id),
            Some((parent, _)) => self.node_mut(parent).right = Some(id),
        }
        self.len += 1;

        if cfg!(debug_assertions) {
            if let Some((parent, _)) = attach_to {
                let (parent, child) = (self.node(parent), self.node(id));
                debug_assert!(parent.left == Some(id) || parent.right == Some(id));
                debug_assert!(parent.key != child.key);
            }
        }
        trace!("insert: attached node {}, len = {}", id.0, self.len);
        true
    }

    /// Finds the node holding a key equal to `key`, if there is one.
    pub fn find(&self, key: &T) -> Option<NodeRef<'_, T>>
    where
        T: Ord,
    {
        self.handle(self.locate(key))
    }

    /// Whether a key equal to `key` is in the tree.
    pub fn contains(&self, key: &T) -> bool
    where
        T: Ord,
    {
        self.locate(key).is_some()
    }

    /// Removes the key equal to `key` from the tree and returns it. If the tree has no such
    /// key, nothing happens and `None` is returned.
    ///
    /// When the removed node has two children, its in-order predecessor (the largest key of
    /// its left subtree) moves up into its place and the predecessor's slot is freed.
    pub fn take(&mut self, key: &T) -> Option<T>
    where
        T: Ord,
    {
        let found = self.locate(key)?;

        // `doomed` is the node whose slot gets freed. It always has at most one child.
        let (doomed, keeper) = match (self.node(found).left, self.node(found).right) {
            (Some(left), Some(_)) => {
                let mut predecessor = left;
                while let Some(right) = self.node(predecessor).right {
                    predecessor = right;
                }
                trace!("erase: two children, promoting the predecessor");
                (predecessor, Some(found))
            }
            (None, None) => {
                trace!("erase: removing a leaf");
                (found, None)
            }
            _ => {
                trace!("erase: splicing in the only child");
                (found, None)
            }
        };

        let node = self.release(doomed);
        let child = node.left.or(node.right);
        self.replace_child(node.parent, doomed, child);
        if let Some(child) = child {
            self.node_mut(child).parent = node.parent;
        }
        self.len -= 1;

        let removed = match keeper {
            Some(keeper) => mem::replace(&mut self.node_mut(keeper).key, node.key),
            None => node.key,
        };
        if self.len == 0 {
            // Nothing left to recycle, start the arena over.
            self.slots.clear();
            self.free.clear();
        }

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
        // Children are released before their parent.
        let mut doomed = Vec::with_capacity(self.len);
        traversal::walk(self.root(), Order::DfsSuffix, |node| doomed.push(node.id()));
        for id in doomed {
            drop(self.slots[id.0].take());
        }

        if self.len > 0 {
            trace!("clear: released {} nodes", self.len);
        }
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    fn first_node(&self) -> Option<NodeRef<'_, T>> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(node)
    }

    fn last_node(&self) -> Option<NodeRef<'_, T>> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(node)
    }

    /// The smallest key in the tree.
    pub fn first(&self) -> Option<&T> {
        self.first_node().map(NodeRef::key)
    }

    /// The largest key in the tree.
    pub fn last(&self) -> Option<&T> {
        self.last_node().map(NodeRef::key)
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
    pub fn apply<F>(&self, visitor: F, order: Order)
    where
        F: FnMut(NodeRef<'_, T>),
    {
        traversal::walk(self.root(), order, visitor);
    }

    /// An iterator over the keys, smallest first. It steps from node to node through
    /// [`NodeRef::successor`] and so needs no stack.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.first_node(),
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
        self.apply(|node| sink.append(node.key().clone()), Order::DfsInfix);
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
    next: Option<NodeRef<'a, T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        self.next = node.successor();
        self.remaining -= 1;
        Some(node.key())
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
