//! Property tests against the public API of both trees. The properties that don't
//! depend on how a tree stores its nodes are written once in [`properties!`] and
//! stamped out for each flavour.

#[macro_use]
extern crate quickcheck_macros;

use std::collections::BTreeSet;

/// Installs the test logger so `RUST_LOG=search_tree=trace` shows what the trees do.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Inserts every element of `xs` then removes every element of `deletes`, returning
/// the keys that should remain.
pub fn expected_after(xs: &[i16], deletes: &[i16]) -> BTreeSet<i16> {
    let mut expected: BTreeSet<i16> = xs.iter().copied().collect();
    for delete in deletes {
        expected.remove(delete);
    }
    expected
}

/// Generates the shared properties for a tree type with the common contract.
macro_rules! properties {
    ($tree:ty) => {
        use search_tree::Order;

        use std::collections::BTreeSet;

        use crate::expected_after;

        type Tree = $tree;

        fn keys_in(tree: &Tree, order: Order) -> Vec<i16> {
            let mut keys = Vec::new();
            tree.apply(|node| keys.push(*node.key()), order);
            keys
        }

        fn build(xs: &[i16], deletes: &[i16]) -> Tree {
            crate::init_logging();
            let mut tree: Tree = xs.iter().copied().collect();
            for delete in deletes {
                tree.erase(delete);
            }
            tree
        }

        #[quickcheck]
        fn inorder_is_strictly_ascending(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
            let tree = build(&xs, &deletes);

            let inorder = keys_in(&tree, Order::DfsInfix);
            inorder.windows(2).all(|w| w[0] < w[1])
                && inorder.iter().eq(expected_after(&xs, &deletes).iter())
        }

        #[quickcheck]
        fn len_matches_every_traversal(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
            let tree = build(&xs, &deletes);

            tree.len() == expected_after(&xs, &deletes).len()
                && tree.iter().len() == tree.len()
                && Order::ALL
                    .into_iter()
                    .all(|order| keys_in(&tree, order).len() == tree.len())
        }

        #[quickcheck]
        fn insert_is_idempotent(xs: Vec<i16>, x: i16) -> bool {
            let mut tree = build(&xs, &[]);
            tree.insert(x);
            let once = tree.clone();

            !tree.insert(x)
                && tree == once
                && keys_in(&tree, Order::DfsPrefix) == keys_in(&once, Order::DfsPrefix)
        }

        #[quickcheck]
        fn erase_undoes_fresh_insert(xs: Vec<i16>, x: i16) -> bool {
            let mut tree = build(&xs, &[x]);
            let len = tree.len();

            tree.insert(x)
                && tree.erase(&x)
                && tree.find(&x).is_none()
                && tree.len() == len
                && !tree.erase(&x)
        }

        #[quickcheck]
        fn clone_is_independent(xs: Vec<i16>, ys: Vec<i16>) -> bool {
            let mut original = build(&xs, &[]);
            let before = keys_in(&original, Order::DfsPrefix);

            let mut copy = original.clone();
            let equal_at_first = copy == original;
            for y in &ys {
                if !copy.erase(y) {
                    copy.insert(*y);
                }
            }
            let original_untouched = original.len() == xs.iter().collect::<BTreeSet<_>>().len()
                && keys_in(&original, Order::DfsPrefix) == before;

            let copied = keys_in(&copy, Order::DfsPrefix);
            for y in ys.iter().chain(&xs) {
                if !original.erase(y) {
                    original.insert(*y);
                }
            }

            equal_at_first
                && original_untouched
                && copy.len() == copied.len()
                && keys_in(&copy, Order::DfsPrefix) == copied
        }

        #[quickcheck]
        fn prefix_order_rebuilds_the_same_shape(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
            let tree = build(&xs, &deletes);
            let rebuilt: Tree = keys_in(&tree, Order::DfsPrefix).into_iter().collect();

            rebuilt == tree
                && keys_in(&rebuilt, Order::DfsSuffix) == keys_in(&tree, Order::DfsSuffix)
                && keys_in(&rebuilt, Order::Bfs) == keys_in(&tree, Order::Bfs)
        }

        #[quickcheck]
        fn height_and_width_bound_the_size(xs: Vec<i16>) -> bool {
            let tree = build(&xs, &[]);
            let (len, height, width) = (tree.len(), tree.height(), tree.width());

            if len == 0 {
                return height == 0 && width == 0;
            }
            height <= len
                && width <= len
                && width * height >= len
                && (height >= 127 || (len as u128) < (1u128 << height))
        }

        #[quickcheck]
        fn export_matches_a_sorted_set(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
            let tree = build(&xs, &deletes);
            let expected: Vec<i16> = expected_after(&xs, &deletes).into_iter().collect();

            let mut deque = std::collections::VecDeque::new();
            tree.export_sorted(&mut deque);

            tree.to_sorted_vec() == expected && deque.into_iter().eq(expected.iter().copied())
        }

        #[quickcheck]
        fn first_and_last_are_the_extremes(xs: Vec<i16>) -> bool {
            let tree = build(&xs, &[]);

            tree.first() == xs.iter().min() && tree.last() == xs.iter().max()
        }
    };
}

mod arena;
mod boxed;
