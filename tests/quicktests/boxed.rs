properties!(search_tree::boxed::Tree<i16>);

#[quickcheck]
fn owned_iteration_is_sorted(xs: Vec<i16>) -> bool {
    let tree = build(&xs, &[]);
    let expected = expected_after(&xs, &[]);

    tree.into_iter().eq(expected)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = search_tree::boxed::Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.erase(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}
