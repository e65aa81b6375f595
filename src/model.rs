//! The tree model.
//!
//! `TreeModel` is the thing a consumer actually holds: it owns a [`Tree`],
//! a [`SelectionService`], an [`ExpansionService`] and a
//! [`NavigationHistory`], and exposes the high-level operations a UI wires
//! keyboard/mouse events to directly, instead of making every call site
//! hand-assemble gestures. It also owns the one piece of cross-component
//! behaviour the individual services can't express on their own: collapse
//! reconciliation, which re-selects a collapsing ancestor when one of its
//! descendants was selected.

use log::debug;

use crate::expansion::ExpansionService;
use crate::iter::{range, BottomToTop, TopToBottom};
use crate::navigation::NavigationHistory;
use crate::node::{NodeId, Tree};
use crate::selection::service::SelectionService;
use crate::selection::{Gesture, Input};

pub struct TreeModel {
    tree: Tree,
    selection: SelectionService,
    expansion: ExpansionService,
    history: NavigationHistory,
}

impl TreeModel {
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            selection: SelectionService::new(),
            expansion: ExpansionService::new(),
            history: NavigationHistory::new(),
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.selection.selected_nodes(&self.tree)
    }

    pub fn on_selection_changed(
        &self,
        listener: impl Fn(&Vec<NodeId>) + 'static,
    ) -> crate::event::Disposable {
        self.selection.on_selection_changed(listener)
    }

    pub fn on_expansion_changed(
        &self,
        listener: impl Fn(NodeId) + 'static,
    ) -> crate::event::Disposable {
        self.expansion.on_expansion_changed(listener)
    }

    // ---- selection -----------------------------------------------------

    /// Replace the selection with the given ordered list, most-recent
    /// (`nodes[0]`) first. Built from `Reset` followed by a `Toggle` per
    /// node in reverse order: toggling onto a selection that does not
    /// already contain the node always appends it, so walking the input
    /// back-to-front and toggling each one leaves `nodes[0]` as the final,
    /// most-recent toggle — which is exactly the desired projection. This
    /// is functionally equivalent to, but simpler than, routing through a
    /// `Default` gesture per node: a `Default` always collapses the whole
    /// stack to one entry, so it cannot be chained to build up a
    /// multi-node selection the way the gesture name might suggest.
    pub fn set_selection(&mut self, nodes: &[NodeId]) {
        let _ = self.selection.add_selection(&mut self.tree, Input::Reset);
        for &n in nodes.iter().rev() {
            if self.tree.validate_node(n).is_some() {
                let _ = self
                    .selection
                    .add_selection(&mut self.tree, Input::Gesture(Gesture::toggle(n)));
            }
        }
    }

    /// Select `node`. With `preserve_selection` false, replaces the whole
    /// selection. With it true, moves `node` to the front of the existing
    /// ordered selection (adding it if absent), a no-op if it is already
    /// at the front.
    pub fn select_node(&mut self, node: NodeId, preserve_selection: bool) {
        let Some(node) = self.tree.validate_node(node) else {
            return;
        };
        if !preserve_selection {
            self.set_selection(&[node]);
            return;
        }
        let mut proj = self.selected_nodes();
        if proj.first() == Some(&node) {
            return;
        }
        proj.retain(|&n| n != node);
        proj.insert(0, node);
        self.set_selection(&proj);
    }

    /// Remove `node` from the selection, preserving the order of the rest.
    pub fn unselect_node(&mut self, node: NodeId) {
        let mut proj = self.selected_nodes();
        if !proj.contains(&node) {
            return;
        }
        proj.retain(|&n| n != node);
        self.set_selection(&proj);
    }

    pub fn toggle_selection(&mut self, node: NodeId) {
        if self.tree.is_selected(node) {
            self.unselect_node(node);
        } else {
            self.select_node(node, true);
        }
    }

    /// The inclusive, directed range between `from` and `to`: empty if
    /// either endpoint is missing or they are equal.
    pub fn selection_range(&self, to: NodeId, from: NodeId) -> Vec<NodeId> {
        let (Some(from), Some(to)) = (self.tree.validate_node(from), self.tree.validate_node(to))
        else {
            return Vec::new();
        };
        if from == to {
            return Vec::new();
        }
        range(&self.tree, from, to)
    }

    /// Select the range ending at `to`, anchored at `from` (defaulting to
    /// the current most-recent selection if omitted). With
    /// `preserve_selection`, the range is prepended to whatever of the
    /// prior selection falls outside it; otherwise the range replaces the
    /// selection outright.
    pub fn select_range(&mut self, to: NodeId, from: Option<NodeId>, preserve_selection: bool) {
        let Some(to) = self.tree.validate_node(to) else {
            return;
        };
        let from = from.or_else(|| self.selected_nodes().first().copied());
        let Some(from) = from else {
            return;
        };
        if self.tree.validate_node(from).is_none() {
            return;
        }
        let r = self.selection_range(to, from);
        if r.is_empty() {
            return;
        }
        if preserve_selection {
            // `r` runs from -> to; the range gesture's target (`to`) is the
            // one that ends up most-recent, so reverse it before merging.
            let mut ordered: Vec<NodeId> = r.into_iter().rev().collect();
            let rest: Vec<NodeId> = self
                .selected_nodes()
                .into_iter()
                .filter(|n| !ordered.contains(n))
                .collect();
            ordered.extend(rest);
            self.set_selection(&ordered);
        } else {
            let _ = self.selection.add_selection(&mut self.tree, Input::Reset);
            let _ = self
                .selection
                .add_selection(&mut self.tree, Input::Gesture(Gesture::toggle(from)));
            let _ = self
                .selection
                .add_selection(&mut self.tree, Input::Gesture(Gesture::range(to)));
        }
    }

    fn select_adjacent(&mut self, preserve_selection: bool, backward: bool) {
        let Some(current) = self.selected_nodes().first().copied() else {
            return;
        };
        let found = if backward {
            BottomToTop::with_options(&self.tree, current, true)
                .skip(1)
                .find(|&n| self.tree.is_visible(n))
        } else {
            TopToBottom::with_options(&self.tree, current, true)
                .skip(1)
                .find(|&n| self.tree.is_visible(n))
        };
        if let Some(n) = found {
            self.select_node(n, preserve_selection);
        }
    }

    pub fn select_prev_node(&mut self, preserve_selection: bool) {
        self.select_adjacent(preserve_selection, true);
    }

    pub fn select_next_node(&mut self, preserve_selection: bool) {
        self.select_adjacent(preserve_selection, false);
    }

    /// Select the nearest visible ancestor of the current selection, if
    /// exactly one node is selected.
    pub fn select_parent(&mut self) {
        let proj = self.selected_nodes();
        if proj.len() != 1 {
            return;
        }
        let mut cur = proj[0];
        while let Some(p) = self.tree.parent_of(cur) {
            if self.tree.is_visible(p) {
                self.select_node(p, false);
                return;
            }
            cur = p;
        }
    }

    // ---- expansion -------------------------------------------------------

    pub fn expand_node(&mut self, node: NodeId) {
        if self.tree.validate_node(node).is_none() {
            return;
        }
        self.expansion.expand_node(&mut self.tree, node);
    }

    pub fn collapse_node(&mut self, node: NodeId) {
        if self.tree.validate_node(node).is_none() {
            return;
        }
        self.expansion.collapse_node(&mut self.tree, node);
        self.reconcile_collapse(node);
    }

    pub fn toggle_node_expansion(&mut self, node: NodeId) {
        if self.tree.validate_node(node).is_none() {
            return;
        }
        let was_expanded = self.tree.is_expanded(node);
        self.expansion.toggle_node_expansion(&mut self.tree, node);
        if was_expanded {
            self.reconcile_collapse(node);
        }
    }

    /// Open (or, for an expandable node, toggle-expand) `node`, defaulting
    /// to the current most-recent selection when `node` is `None`.
    pub fn open_node(&mut self, node: Option<NodeId>) {
        let node = node.or_else(|| self.selected_nodes().first().copied());
        let Some(node) = node else {
            return;
        };
        if self.tree.validate_node(node).is_none() {
            return;
        }
        if self.tree.is_expandable(node) {
            self.toggle_node_expansion(node);
        }
    }

    /// When `e` transitions from expanded to collapsed and the selection
    /// contains a descendant of `e`, replace the selection with `[e]` —
    /// provided `e` itself is still visible. Conceptually this is
    /// "subscribe to the expansion change event and react to collapses";
    /// since `TreeModel` is the sole owner of both the expansion service
    /// and the selection service, it is simplest and avoids the
    /// reentrancy of mutating through a subscriber callback to call this
    /// directly from the one place that can collapse a node.
    fn reconcile_collapse(&mut self, e: NodeId) {
        if self.tree.is_expanded(e) {
            return;
        }
        let current = self.selected_nodes();
        let has_hidden_descendant = current.iter().any(|&s| self.tree.is_ancestor(e, s));
        if has_hidden_descendant && self.tree.is_visible(e) {
            debug!("collapse of a selected node's ancestor reset the selection to it");
            self.set_selection(&[e]);
        }
    }

    // ---- navigation ------------------------------------------------------

    /// Zoom the tree's root to `node`, pushing the current root onto the
    /// navigation history.
    pub fn navigate_to(&mut self, node: NodeId) {
        let Some(node) = self.tree.validate_node(node) else {
            return;
        };
        self.history.push(self.tree.root());
        self.apply_navigation_target(node);
    }

    pub fn navigate_forward(&mut self) {
        if let Some(target) = self.history.advance(self.tree.root()) {
            self.apply_navigation_target(target);
        }
    }

    pub fn navigate_backward(&mut self) {
        if let Some(target) = self.history.retreat(self.tree.root()) {
            self.apply_navigation_target(target);
        }
    }

    fn apply_navigation_target(&mut self, node: NodeId) {
        self.tree.navigate_root(node);
        if self.tree.is_expandable(node) {
            self.expansion.expand_node(&mut self.tree, node);
        }
        self.select_node(node, false);
    }
}
