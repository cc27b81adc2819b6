//! The traversal engine shared by both tree flavours.
//!
//! Trees in this crate never rebalance, so inserting sorted keys produces what is
//! really a linked list leaning to one side. Everything in here therefore walks the
//! tree with an explicit, heap-allocated stack or queue instead of recursing, and
//! works the same on a tree one node tall or a hundred thousand nodes tall.
//!
//! The engine is generic over [`Binary`], a copyable handle onto a node that can
//! step to its children. [`boxed`](crate::boxed) implements it for `&Node<T>` and
//! [`arena`](crate::arena) for `NodeRef<'_, T>`.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

/// The order in which `apply` hands nodes to a visitor.
///
/// # Examples
///
/// ```
/// use search_tree::boxed::Tree;
/// use search_tree::Order;
///
/// let tree: Tree<i32> = [16, 93, -35, 62].into();
///
/// let mut keys = Vec::new();
/// tree.apply(|node| keys.push(*node.key()), Order::DfsInfix);
/// assert_eq!(keys, [-35, 16, 62, 93]);
///
/// let order: Order = "bfs".parse().unwrap();
/// assert_eq!(order, Order::Bfs);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Depth-first, root first: node, left subtree, right subtree.
    #[default]
    DfsPrefix,
    /// Depth-first, root in the middle: left subtree, node, right subtree. Keys come out
    /// in ascending order.
    DfsInfix,
    /// Depth-first, root last: left subtree, right subtree, node.
    DfsSuffix,
    /// Breadth-first: level by level from the root, left to right within a level.
    Bfs,
}

impl Order {
    /// Every order, in declaration order.
    pub const ALL: [Order; 4] = [
        Order::DfsPrefix,
        Order::DfsInfix,
        Order::DfsSuffix,
        Order::Bfs,
    ];

    fn name(self) -> &'static str {
        match self {
            Order::DfsPrefix => "prefix",
            Order::DfsInfix => "infix",
            Order::DfsSuffix => "suffix",
            Order::Bfs => "bfs",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Order::ALL
            .into_iter()
            .find(|order| order.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseOrderError(s.to_owned()))
    }
}

/// The error returned when parsing an [`Order`] from a name it doesn't know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOrderError(String);

impl fmt::Display for ParseOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown traversal order `{}` (expected prefix, infix, suffix or bfs)",
            self.0
        )
    }
}

impl std::error::Error for ParseOrderError {}

/// A cheap, copyable handle onto a tree node that can step to its children.
pub(crate) trait Binary: Copy {
    fn left_child(self) -> Option<Self>;
    fn right_child(self) -> Option<Self>;
}

/// Hands every node reachable from `root` to `visit` in the given order.
pub(crate) fn walk<N, F>(root: Option<N>, order: Order, mut visit: F)
where
    N: Binary,
    F: FnMut(N),
{
    let Some(root) = root else {
        return;
    };

    match order {
        Order::DfsPrefix => prefix(root, &mut visit),
        Order::DfsInfix => Inorder::new(Some(root)).for_each(visit),
        Order::DfsSuffix => suffix(root, &mut visit),
        Order::Bfs => breadth_first(root, &mut visit),
    }
}

fn prefix<N: Binary>(root: N, visit: &mut impl FnMut(N)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node);
        // Right goes on first so the left subtree is popped (and finished) first.
        stack.extend(node.right_child());
        stack.extend(node.left_child());
    }
}

fn suffix<N: Binary>(root: N, visit: &mut impl FnMut(N)) {
    // Collect node/right/left and replay it backwards to get left/right/node.
    let mut pending = vec![root];
    let mut reversed = Vec::new();
    while let Some(node) = pending.pop() {
        pending.extend(node.left_child());
        pending.extend(node.right_child());
        reversed.push(node);
    }

    reversed.into_iter().rev().for_each(visit);
}

fn breadth_first<N: Binary>(root: N, visit: &mut impl FnMut(N)) {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        visit(node);
        queue.extend(node.left_child());
        queue.extend(node.right_child());
    }
}

/// An in-order iterator over node handles driven by an explicit stack of the nodes
/// whose left subtrees are being visited.
pub(crate) struct Inorder<N> {
    stack: Vec<N>,
}

impl<N: Binary> Inorder<N> {
    pub(crate) fn new(root: Option<N>) -> Self {
        let mut inorder = Self { stack: Vec::new() };
        inorder.descend_left(root);
        inorder
    }

    fn descend_left(&mut self, mut next: Option<N>) {
        while let Some(node) = next {
            self.stack.push(node);
            next = node.left_child();
        }
    }
}

impl<N: Binary> Iterator for Inorder<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.stack.pop()?;
        self.descend_left(node.right_child());
        Some(node)
    }
}

/// Yields how many nodes sit on each level of the tree, root level first.
///
/// Each call consumes one level of the queue and refills it with the next one.
pub(crate) struct LevelWidths<N> {
    level: Vec<N>,
    next: Vec<N>,
}

impl<N: Binary> Iterator for LevelWidths<N> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.level.is_empty() {
            return None;
        }

        let width = self.level.len();
        for node in self.level.drain(..) {
            self.next.extend(node.left_child());
            self.next.extend(node.right_child());
        }
        std::mem::swap(&mut self.level, &mut self.next);

        Some(width)
    }
}

pub(crate) fn level_widths<N: Binary>(root: Option<N>) -> LevelWidths<N> {
    LevelWidths {
        level: root.into_iter().collect(),
        next: Vec::new(),
    }
}

/// The number of levels under `root`. An empty tree has height 0, a lone root height 1.
pub(crate) fn height<N: Binary>(root: Option<N>) -> usize {
    level_widths(root).count()
}

/// The node count of the most populated level under `root`.
pub(crate) fn width<N: Binary>(root: Option<N>) -> usize {
    level_widths(root).max().unwrap_or(0)
}

/// Compares two trees node by node: they match when they have the same shape and
/// `same_key` holds for every pair of nodes in the same position.
pub(crate) fn same_shape<A, B, F>(lhs: Option<A>, rhs: Option<B>, same_key: F) -> bool
where
    A: Binary,
    B: Binary,
    F: Fn(A, B) -> bool,
{
    let mut pending = vec![(lhs, rhs)];
    while let Some(pair) = pending.pop() {
        match pair {
            (None, None) => {}
            (Some(l), Some(r)) => {
                if !same_key(l, r) {
                    return false;
                }
                pending.push((l.right_child(), r.right_child()));
                pending.push((l.left_child(), r.left_child()));
            }
            _ => return false,
        }
    }

    true
}
