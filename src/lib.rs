//! This crate exposes an unbalanced Binary Search Tree (BST) in two storage flavours
//! that share one contract.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` comparisons, where `height` is the number of levels
//! between the root and the deepest leaf. The trees here never rebalance, so inserting
//! keys in sorted order gives a tree as tall as it has keys. Every traversal, query,
//! copy and drop therefore runs on an explicit stack or queue rather than recursion.
//!
//! ## Flavours
//!
//! - [`boxed::Tree`]: each node owns its children through a `Box`.
//! - [`arena::Tree`]: nodes live in a `Vec` and name each other by [`arena::NodeId`],
//!   including a back-link to their parent, which allows stepping to a node's
//!   predecessor or successor without a stack.
//!
//! Both visit their nodes in any [`Order`] through `apply`, report `height` and
//! `width`, compare by shape with `==`, and export their keys in ascending order into
//! any [`SortedSink`].
//!
//! ```
//! use search_tree::{arena, boxed, Order};
//!
//! let keys = [42, 17, 69, 95, 62, 10, 99];
//! let owned: boxed::Tree<i32> = keys.into();
//! let indexed: arena::Tree<i32> = keys.into();
//!
//! let mut levels = Vec::new();
//! owned.apply(|node| levels.push(*node.key()), Order::Bfs);
//! assert_eq!(levels, [42, 17, 69, 10, 62, 95, 99]);
//!
//! assert_eq!(owned.to_sorted_vec(), indexed.to_sorted_vec());
//! assert_eq!((owned.height(), owned.width()), (indexed.height(), indexed.width()));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod arena;
pub mod boxed;
pub mod export;
pub mod traversal;

pub use export::SortedSink;
pub use traversal::Order;
