//! End-to-end selection scenarios run against `TreeModel`, mirroring the
//! fixture tree used throughout the module-level unit tests:
//!
//! root
//!  ├─ 1.1    (→ 1.1.1, 1.1.2)
//!  ├─ 1.2    (→ 1.2.1 (→ 1.2.1.1, 1.2.1.2), 1.2.2, 1.2.3)
//!  └─ 1.3

use tree_selection::{NodeId, Tree, TreeModel};

struct Fixture {
    model: TreeModel,
    n11: NodeId,
    n111: NodeId,
    n112: NodeId,
    n12: NodeId,
    n121: NodeId,
    n1211: NodeId,
    n1212: NodeId,
    n122: NodeId,
    n123: NodeId,
    n13: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = Tree::new();
    let root = tree.root();
    let n11 = tree.add_child(root);
    let n111 = tree.add_child(n11);
    let n112 = tree.add_child(n11);
    let n12 = tree.add_child(root);
    let n121 = tree.add_child(n12);
    let n1211 = tree.add_child(n121);
    let n1212 = tree.add_child(n121);
    let n122 = tree.add_child(n12);
    let n123 = tree.add_child(n12);
    let n13 = tree.add_child(root);
    Fixture {
        model: TreeModel::new(tree),
        n11,
        n111,
        n112,
        n12,
        n121,
        n1211,
        n1212,
        n122,
        n123,
        n13,
    }
}

#[test]
fn s1_four_toggles_then_a_trailing_range() {
    let mut f = fixture();
    f.model.toggle_selection(f.n11);
    f.model.toggle_selection(f.n112);
    f.model.toggle_selection(f.n1211);
    f.model.toggle_selection(f.n12);
    f.model.select_range(f.n13, None, true);

    assert_eq!(
        f.model.selected_nodes(),
        vec![
            f.n13, f.n123, f.n122, f.n1212, f.n1211, f.n121, f.n12, f.n112, f.n11,
        ]
    );
}

// Two successive RANGE gestures (the first popped and replaced by the
// second) are exercised directly against `SelectionState` in
// `selection::mod::tests::s3_...` — `TreeModel::select_range` is a
// higher-level, single-shot convenience built on projections rather than
// raw gesture replay, so chaining two calls with `preserve_selection:
// true` does not reduce to the same stack; it is not meant to.
#[test]
fn select_range_without_preserve_replaces_the_whole_selection() {
    let mut f = fixture();
    f.model.select_node(f.n13, false);
    f.model.select_range(f.n1211, Some(f.n11), false);

    assert_eq!(
        f.model.selected_nodes(),
        vec![f.n1211, f.n121, f.n12, f.n112, f.n111, f.n11],
    );
}

#[test]
fn s5_selection_range_skips_a_collapsed_subtree() {
    let mut f = fixture();
    f.model.collapse_node(f.n121);

    assert_eq!(
        f.model.selection_range(f.n112, f.n13),
        vec![f.n13, f.n123, f.n122, f.n121, f.n12, f.n112],
    );
}

#[test]
fn s6_a_toggle_inside_an_active_range_splits_it() {
    let mut f = fixture();
    f.model.toggle_selection(f.n11);
    f.model.toggle_selection(f.n112);
    f.model.toggle_selection(f.n1212);
    f.model.select_range(f.n123, None, true);
    f.model.toggle_selection(f.n122);

    assert_eq!(
        f.model.selected_nodes(),
        vec![f.n123, f.n1212, f.n112, f.n11]
    );
}

#[test]
fn selection_range_is_reversed_by_swapping_its_endpoints() {
    let f = fixture();
    let forward = f.model.selection_range(f.n13, f.n112);
    let backward = f.model.selection_range(f.n112, f.n13);
    let mut reversed_forward = forward.clone();
    reversed_forward.reverse();
    assert_eq!(backward, reversed_forward);
}

#[test]
fn collapsing_an_ancestor_of_the_selection_reconciles_to_it() {
    let mut f = fixture();
    f.model.select_node(f.n1211, false);
    f.model.collapse_node(f.n121);
    assert_eq!(f.model.selected_nodes(), vec![f.n121]);
}

#[test]
fn collapsing_with_selection_outside_the_subtree_does_nothing() {
    let mut f = fixture();
    f.model.select_node(f.n13, false);
    f.model.collapse_node(f.n121);
    assert_eq!(f.model.selected_nodes(), vec![f.n13]);
}

#[test]
fn keyboard_navigation_walks_collapse_pruned_document_order() {
    let mut f = fixture();
    f.model.collapse_node(f.n121);
    f.model.select_node(f.n12, false);

    f.model.select_next_node(false);
    assert_eq!(f.model.selected_nodes(), vec![f.n121]);

    f.model.select_next_node(false);
    assert_eq!(f.model.selected_nodes(), vec![f.n122]);

    f.model.select_prev_node(false);
    assert_eq!(f.model.selected_nodes(), vec![f.n121]);
}

#[test]
fn open_node_toggles_expansion_of_an_expandable_node() {
    let mut f = fixture();
    assert!(f.model.tree().is_expanded(f.n12));
    f.model.open_node(Some(f.n12));
    assert!(!f.model.tree().is_expanded(f.n12));
}

// Initializes logging the same way a binary consuming this crate would
// (`env_logger::Builder::from_default_env()`), scoped to this test harness
// via `is_test(true)` since a library has no `main.rs` of its own to call it
// from. Run with `RUST_LOG=tree_selection=trace` to see the service's
// `trace!` line for the committed gesture and its `debug!` line for the
// rejected one.
#[test]
fn selection_commits_and_rejections_log_through_env_logger() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();

    let mut tree = Tree::new();
    let root = tree.root();
    let a = tree.add_child(root);
    let mut service = tree_selection::SelectionService::new();

    // Committed: logs at trace!.
    service
        .add_selection(
            &mut tree,
            tree_selection::Input::Gesture(tree_selection::Gesture::toggle(a)),
        )
        .unwrap();
    assert_eq!(service.selected_nodes(&tree), vec![a]);

    // Rejected: the node belongs to a different tree, logs at debug!.
    let mut other = Tree::new();
    let stray = other.add_child(other.root());
    service
        .add_selection(
            &mut tree,
            tree_selection::Input::Gesture(tree_selection::Gesture::toggle(stray)),
        )
        .unwrap();
    assert_eq!(service.selected_nodes(&tree), vec![a]);
}
