//! Tree traversal iterators.
//!
//! Each ordering takes a `prune_collapsed` flag: when set, the children of
//! a node that has children but is not expanded are skipped. All four
//! iterators are finite, single-pass, and yield each node at most once.

use std::collections::VecDeque;

use crate::node::{NodeId, Tree};

fn skip_children(tree: &Tree, node: NodeId, prune_collapsed: bool) -> bool {
    prune_collapsed && tree.is_expandable(node) && !tree.is_expanded(node)
}

/// Pre-order depth-first traversal: `root`, then each child left-to-right,
/// recursively.
pub struct PreOrder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    prune_collapsed: bool,
}

impl<'a> PreOrder<'a> {
    pub fn new(tree: &'a Tree, root: NodeId) -> Self {
        Self::with_options(tree, root, false)
    }

    pub fn with_options(tree: &'a Tree, root: NodeId, prune_collapsed: bool) -> Self {
        Self {
            tree,
            stack: vec![root],
            prune_collapsed,
        }
    }
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        if !skip_children(self.tree, node, self.prune_collapsed) {
            for &child in self.tree.children_of(node).iter().rev() {
                self.stack.push(child);
            }
        }
        Some(node)
    }
}

/// Breadth-first traversal from `root`.
pub struct BreadthFirst<'a> {
    tree: &'a Tree,
    queue: VecDeque<NodeId>,
    prune_collapsed: bool,
}

impl<'a> BreadthFirst<'a> {
    pub fn new(tree: &'a Tree, root: NodeId) -> Self {
        Self::with_options(tree, root, false)
    }

    pub fn with_options(tree: &'a Tree, root: NodeId, prune_collapsed: bool) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        Self {
            tree,
            queue,
            prune_collapsed,
        }
    }
}

impl Iterator for BreadthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.queue.pop_front()?;
        if !skip_children(self.tree, node, self.prune_collapsed) {
            for &child in self.tree.children_of(node) {
                self.queue.push_back(child);
            }
        }
        Some(node)
    }
}

/// Materializes the whole-tree pre-order sequence and returns the position
/// of `start` within it, or `None` if `start` does not appear (either
/// because it isn't part of the tree, or because `prune_collapsed` hides
/// it behind a collapsed ancestor).
fn document_order(tree: &Tree, start: NodeId, prune_collapsed: bool) -> Option<(Vec<NodeId>, usize)> {
    let full: Vec<NodeId> = PreOrder::with_options(tree, tree.root(), prune_collapsed).collect();
    full.iter().position(|&n| n == start).map(|pos| (full, pos))
}

/// Pre-order over the whole tree, skipped forward to `start`: `start`,
/// then its document-order successors (next sibling, next sibling of an
/// ancestor, and so on).
///
/// When `start` is not part of the tree (or is hidden by `prune_collapsed`
/// pruning), the iterator yields only `start`, then terminates.
pub struct TopToBottom {
    items: Vec<NodeId>,
    idx: usize,
}

impl TopToBottom {
    pub fn new(tree: &Tree, start: NodeId) -> Self {
        Self::with_options(tree, start, false)
    }

    pub fn with_options(tree: &Tree, start: NodeId, prune_collapsed: bool) -> Self {
        match document_order(tree, start, prune_collapsed) {
            Some((items, idx)) => Self { items, idx },
            None => Self {
                items: vec![start],
                idx: 0,
            },
        }
    }
}

impl Iterator for TopToBottom {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = *self.items.get(self.idx)?;
        self.idx += 1;
        Some(node)
    }
}

/// The reverse of [`TopToBottom`]: `start`, then its in-order predecessor,
/// and so on toward the root (inclusive of the root).
///
/// Same "not part of the tree" fallback as [`TopToBottom`].
pub struct BottomToTop {
    items: Vec<NodeId>,
    idx: Option<usize>,
}

impl BottomToTop {
    pub fn new(tree: &Tree, start: NodeId) -> Self {
        Self::with_options(tree, start, false)
    }

    pub fn with_options(tree: &Tree, start: NodeId, prune_collapsed: bool) -> Self {
        match document_order(tree, start, prune_collapsed) {
            Some((items, idx)) => Self {
                items,
                idx: Some(idx),
            },
            None => Self {
                items: vec![start],
                idx: Some(0),
            },
        }
    }
}

impl Iterator for BottomToTop {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let idx = self.idx?;
        let node = self.items[idx];
        self.idx = idx.checked_sub(1);
        Some(node)
    }
}

/// The inclusive, contiguous sequence of nodes between `from` and `to` in
/// collapse-pruned pre-order, directed: the result always starts at
/// `from` and ends at `to`, walking ascending tree order when `from`
/// precedes `to` and descending when it follows it.
///
/// Returns an empty vector if either endpoint is not part of `tree`.
pub fn range(tree: &Tree, from: NodeId, to: NodeId) -> Vec<NodeId> {
    let full: Vec<NodeId> = PreOrder::with_options(tree, tree.root(), true).collect();
    let pos_from = full.iter().position(|&n| n == from);
    let pos_to = full.iter().position(|&n| n == to);
    match (pos_from, pos_to) {
        (Some(pf), Some(pt)) => {
            let (lo, hi) = if pf <= pt { (pf, pt) } else { (pt, pf) };
            let slice = full[lo..=hi].to_vec();
            if pf <= pt { slice } else { slice.into_iter().rev().collect() }
        }
        _ => Vec::new(),
    }
}
