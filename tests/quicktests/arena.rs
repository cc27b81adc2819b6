properties!(search_tree::arena::Tree<i16>);

use search_tree::arena::NodeRef;

#[quickcheck]
fn neighbours_follow_the_sorted_order(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let tree = build(&xs, &deletes);
    let sorted = tree.to_sorted_vec();

    sorted.windows(2).all(|pair| {
        let (lower, upper) = (tree.find(&pair[0]), tree.find(&pair[1]));
        lower.and_then(NodeRef::successor).map(NodeRef::id) == upper.map(NodeRef::id)
            && upper.and_then(NodeRef::predecessor).map(NodeRef::id) == lower.map(NodeRef::id)
    })
}

#[quickcheck]
fn every_child_points_back_at_its_parent(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let tree = build(&xs, &deletes);
    let mut consistent = tree.root().map_or(true, |root| root.parent().is_none());

    tree.apply(
        |node| {
            for child in [node.left(), node.right()].into_iter().flatten() {
                consistent &= child.parent().map(NodeRef::id) == Some(node.id());
            }
        },
        Order::DfsPrefix,
    );
    consistent
}

#[quickcheck]
fn ids_resolve_to_their_own_node(xs: Vec<i16>) -> bool {
    let tree = build(&xs, &[]);

    xs.iter().all(|x| {
        let id = tree.find(x).map(NodeRef::id);
        id.and_then(|id| tree.get(id)).map(|node| *node.key()) == Some(*x)
    })
}
