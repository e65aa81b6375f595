//! The expansion collaborator.
//!
//! The selection core only ever needs to ask the expansion service to
//! expand/collapse/toggle a node and to hear about it afterwards; this
//! module ships the one concrete implementation the crate needs to be
//! self-contained; [`crate::model::TreeModel`] owns both this and the
//! [`crate::node::Tree`] it operates on.

use crate::event::{Disposable, Emitter};
use crate::node::{NodeId, Tree};

pub struct ExpansionService {
    on_expansion_changed: Emitter<NodeId>,
}

impl ExpansionService {
    pub fn new() -> Self {
        Self {
            on_expansion_changed: Emitter::new(),
        }
    }

    pub fn expand_node(&self, tree: &mut Tree, node: NodeId) {
        tree.set_expanded(node, true);
        self.on_expansion_changed.emit(node);
    }

    pub fn collapse_node(&self, tree: &mut Tree, node: NodeId) {
        tree.set_expanded(node, false);
        self.on_expansion_changed.emit(node);
    }

    pub fn toggle_node_expansion(&self, tree: &mut Tree, node: NodeId) {
        if tree.is_expanded(node) {
            self.collapse_node(tree, node);
        } else {
            self.expand_node(tree, node);
        }
    }

    pub fn on_expansion_changed(
        &self,
        listener: impl Fn(NodeId) + 'static,
    ) -> Disposable {
        self.on_expansion_changed.subscribe(move |&id| listener(id))
    }
}

impl Default for ExpansionService {
    fn default() -> Self {
        Self::new()
    }
}
