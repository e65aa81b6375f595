//! The selection service.
//!
//! Wraps a [`SelectionState`], diffing successive projections against the
//! tree's cached `selected` flags and firing a change event on every
//! actual change. This is the only place in the crate allowed to write
//! `Tree::set_selected` — every other component only reads it — which is
//! what keeps the cached flag consistent with the projection.

use log::{debug, trace};

use crate::error::SelectionError;
use crate::event::{Disposable, Emitter};
use crate::node::{NodeId, Tree};
use crate::selection::{Input, SelectionState};

/// Fired after every selection change that actually altered the
/// projection, carrying the new projection (most-recent-first).
pub type SelectionChanged = Vec<NodeId>;

pub struct SelectionService {
    state: SelectionState,
    on_changed: Emitter<SelectionChanged>,
}

impl SelectionService {
    pub fn new() -> Self {
        Self {
            state: SelectionState::new(),
            on_changed: Emitter::new(),
        }
    }

    /// The current projection.
    pub fn selected_nodes(&self, tree: &Tree) -> Vec<NodeId> {
        self.state.projection(tree)
    }

    pub fn on_selection_changed(
        &self,
        listener: impl Fn(&SelectionChanged) + 'static,
    ) -> Disposable {
        self.on_changed.subscribe(listener)
    }

    /// Apply a gesture (or `Reset`). Invalid nodes are silently ignored: a
    /// gesture whose node is no longer part of `tree` is a no-op, not an
    /// error. An `InvalidGesture` fault — which should never occur through
    /// this entry point — is propagated, since it signals a genuine
    /// programming bug rather than a stale UI event.
    pub fn add_selection(
        &mut self,
        tree: &mut Tree,
        input: Input,
    ) -> Result<(), SelectionError> {
        if let Input::Gesture(g) = input {
            if tree.validate_node(g.node).is_none() {
                debug!("ignoring selection gesture against a node no longer in the tree");
                return Ok(());
            }
        }

        let old = self.state.projection(tree);
        let new_state = self.state.next(tree, input)?;
        let new = new_state.projection(tree);

        if old == new {
            return Ok(());
        }

        let to_unselect: Vec<NodeId> = old.iter().copied().filter(|n| !new.contains(n)).collect();
        let to_select: Vec<NodeId> = new.iter().copied().filter(|n| !old.contains(n)).collect();

        trace!(
            "selection committed: {} unselected, {} selected, {} total",
            to_unselect.len(),
            to_select.len(),
            new.len()
        );

        for n in to_unselect {
            tree.set_selected(n, false);
        }
        for n in &to_select {
            tree.set_selected(*n, true);
        }

        self.state = new_state;
        self.on_changed.emit(new);
        Ok(())
    }
}

impl Default for SelectionService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Gesture;

    fn chain(root: NodeId, tree: &mut Tree, n: usize) -> Vec<NodeId> {
        (0..n).map(|_| tree.add_child(root)).collect()
    }

    #[test]
    fn add_selection_is_a_no_op_for_a_node_outside_the_tree() {
        let mut tree = Tree::new();
        let root = tree.root();
        let [a] = <[NodeId; 1]>::try_from(chain(root, &mut tree, 1)).unwrap();
        let mut other = Tree::new();
        let stray = other.add_child(other.root());

        let mut service = SelectionService::new();
        service
            .add_selection(&mut tree, Input::Gesture(Gesture::toggle(stray)))
            .unwrap();
        assert_eq!(service.selected_nodes(&tree), Vec::<NodeId>::new());
        assert!(!tree.is_selected(a));
    }

    #[test]
    fn add_selection_keeps_the_selected_flag_consistent_with_the_projection() {
        let mut tree = Tree::new();
        let root = tree.root();
        let nodes = chain(root, &mut tree, 3);
        let mut service = SelectionService::new();

        service
            .add_selection(&mut tree, Input::Gesture(Gesture::toggle(nodes[0])))
            .unwrap();
        service
            .add_selection(&mut tree, Input::Gesture(Gesture::toggle(nodes[1])))
            .unwrap();
        assert!(tree.is_selected(nodes[0]));
        assert!(tree.is_selected(nodes[1]));
        assert!(!tree.is_selected(nodes[2]));

        service
            .add_selection(&mut tree, Input::Gesture(Gesture::toggle(nodes[0])))
            .unwrap();
        assert!(!tree.is_selected(nodes[0]));
        assert!(tree.is_selected(nodes[1]));
    }

    #[test]
    fn add_selection_emits_once_with_the_new_projection() {
        let mut tree = Tree::new();
        let root = tree.root();
        let nodes = chain(root, &mut tree, 2);
        let mut service = SelectionService::new();

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        let _d = service.on_selection_changed(move |proj| seen2.borrow_mut().push(proj.clone()));

        service
            .add_selection(&mut tree, Input::Gesture(Gesture::toggle(nodes[0])))
            .unwrap();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0], vec![nodes[0]]);
    }

    #[test]
    fn a_no_op_transition_emits_no_event() {
        let mut tree = Tree::new();
        let root = tree.root();
        let mut service = SelectionService::new();
        let seen = std::rc::Rc::new(std::cell::RefCell::new(0));
        let seen2 = seen.clone();
        let _d = service.on_selection_changed(move |_| *seen2.borrow_mut() += 1);

        // Reset on an already-empty selection changes nothing.
        service.add_selection(&mut tree, Input::Reset).unwrap();
        assert_eq!(*seen.borrow(), 0);
        let _ = root;
    }
}
