//! Destinations for an ordered export of a tree's keys.
//!
//! Both trees can copy their keys, smallest first, into anything implementing
//! [`SortedSink`]. The tree announces how many keys are coming before it starts
//! appending, so sinks that can preallocate do so once.

use std::collections::{LinkedList, VecDeque};

/// A sequence that keys can be appended to in order.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
///
/// use search_tree::boxed::Tree;
///
/// let tree: Tree<i32> = [42, 17, 69].into();
///
/// let mut keys = VecDeque::new();
/// tree.export_sorted(&mut keys);
/// assert_eq!(keys, [17, 42, 69]);
/// ```
pub trait SortedSink<T> {
    /// Called once, before the first [`append`](SortedSink::append), with the number of keys
    /// about to be appended. The default does nothing.
    fn reserve_hint(&mut self, additional: usize) {
        let _ = additional;
    }

    /// Appends `key` after everything already in the sink.
    fn append(&mut self, key: T);
}

impl<T> SortedSink<T> for Vec<T> {
    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional);
    }

    fn append(&mut self, key: T) {
        self.push(key);
    }
}

impl<T> SortedSink<T> for VecDeque<T> {
    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional);
    }

    fn append(&mut self, key: T) {
        self.push_back(key);
    }
}

// Nodes are allocated one at a time, there is nothing to reserve.
impl<T> SortedSink<T> for LinkedList<T> {
    fn append(&mut self, key: T) {
        self.push_back(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the calls a tree makes so the protocol can be checked.
    #[derive(Default)]
    struct Recorder {
        hints: Vec<usize>,
        keys: Vec<u8>,
    }

    impl SortedSink<u8> for Recorder {
        fn reserve_hint(&mut self, additional: usize) {
            assert!(self.keys.is_empty(), "hint must come before any key");
            self.hints.push(additional);
        }

        fn append(&mut self, key: u8) {
            self.keys.push(key);
        }
    }

    #[test]
    fn hint_precedes_keys() {
        let tree: crate::boxed::Tree<u8> = [5, 3, 8, 1].into();
        let mut recorder = Recorder::default();

        tree.export_sorted(&mut recorder);

        assert_eq!(recorder.hints, [4]);
        assert_eq!(recorder.keys, [1, 3, 5, 8]);
    }

    #[test]
    fn appends_after_existing_contents() {
        let tree: crate::arena::Tree<u8> = [2, 1].into();

        let mut list = LinkedList::from([0]);
        tree.export_sorted(&mut list);
        assert_eq!(list.into_iter().collect::<Vec<_>>(), [0, 1, 2]);

        let mut vec = vec![9];
        tree.export_sorted(&mut vec);
        assert_eq!(vec, [9, 1, 2]);
    }
}
