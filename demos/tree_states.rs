//! Walks a few trees through a sequence of states and prints them.
//!
//! ```text
//! cargo run --example tree_states [prefix|infix|suffix|bfs]
//! RUST_LOG=search_tree=trace cargo run --example tree_states
//! ```
//!
//! With an order argument only that traversal is printed for each state, otherwise
//! all four are.

use std::fmt::Display;

use search_tree::boxed::Tree;
use search_tree::{arena, Order};

fn print_traversals<T: Display>(tree: &Tree<T>, orders: &[Order]) {
    for &order in orders {
        let mut line = String::new();
        tree.apply(|node| line.push_str(&format!("{} ", node.key())), order);
        println!("( ( ( ( {order} ) ) ) )");
        println!("{}", line.trim_end());
    }
    println!();
}

fn print_dimensions<T>(name: &str, tree: &Tree<T>) {
    println!(
        "{name} size, height and width : {}, {}, {}",
        tree.len(),
        tree.height(),
        tree.width()
    );
}

fn report_find(tree: &Tree<i32>, key: i32) {
    let verdict = if tree.contains(&key) { "found" } else { "not found" };
    println!("key = {key} is {verdict}");
}

fn main() {
    env_logger::init();

    let orders = match std::env::args().nth(1) {
        Some(name) => match name.parse::<Order>() {
            Ok(order) => vec![order],
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        },
        None => Order::ALL.to_vec(),
    };

    let mut tree = Tree::new();
    for key in [16, 93, -35, 62] {
        tree.insert(key);
    }

    println!("[Tree state 1]\n");
    print_traversals(&tree, &orders);

    let self_equal = tree == tree.clone();
    println!("tree is {}equal to itself\n", if self_equal { "" } else { "not " });

    let mut tree2 = tree.clone();
    tree2.insert(-66);
    tree2.insert(-40);
    let verdict = if tree == tree2 { "equal" } else { "not equal" };
    println!("tree is {verdict} to tree2\n");

    tree = tree2.clone();

    println!("[Tree state 2]\n");
    print_traversals(&tree, &orders);

    let mut tree3: Tree<i32> = [42, 17, 69, 95, 62, 10, 99].into();
    tree = tree3.clone();

    println!("[Tree state 3]\n");
    print_dimensions("tree", &tree);
    print_traversals(&tree, &orders);
    report_find(&tree, 62);
    report_find(&tree, -42);
    println!();

    for key in [42, 10, 69, -6] {
        let verdict = if tree.erase(&key) { "erased" } else { "absent" };
        println!("key = {key} {verdict}");
    }

    println!("\n[Tree state 4]\n");
    print_dimensions("tree", &tree);
    print_traversals(&tree, &orders);
    report_find(&tree, 42);
    report_find(&tree, 99);
    println!("sorted keys : {:?}\n", tree.to_sorted_vec());

    // The same keys in the parent-linked arena, walked through successor links.
    let indexed: arena::Tree<i32> = [42, 17, 69, 95, 62, 10, 99].into();
    if let Some(sixty_two) = indexed.find(&62) {
        let neighbour = |node: Option<arena::NodeRef<'_, i32>>| {
            node.map_or_else(|| "none".to_owned(), |n| n.key().to_string())
        };
        println!(
            "around 62 : predecessor {}, parent {}, successor {}\n",
            neighbour(sixty_two.predecessor()),
            neighbour(sixty_two.parent()),
            neighbour(sixty_two.successor())
        );
    }

    println!("( ( ( ( Clear tree2, tree3 ) ) ) )");
    tree2.clear();
    tree3.clear();
    print_dimensions("tree2", &tree2);
    print_dimensions("tree3", &tree3);
}
