//! The tree data source.
//!
//! The selection core treats the tree as an external collaborator: it only
//! ever looks up nodes by [`NodeId`], asks whether an id is still a member
//! of the current tree, and walks parent/child/expansion state. This module
//! ships one concrete, arena-backed implementation so the rest of the crate
//! (and its test suite) has something to run against without needing a
//! real UI-bound tree wired in.

use std::collections::HashMap;

use crate::event::Emitter;

/// A stable node identity. Equality is identity, never structural —
/// two nodes with the same shape but different ids are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    expanded: bool,
    visible: bool,
    selected: bool,
}

impl NodeData {
    fn new(parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            expanded: true,
            visible: true,
            selected: false,
        }
    }
}

/// An owning arena of tree nodes with a single root.
///
/// Parent links are non-owning indices into the arena; children links
/// are the owning relation, stored as an ordered `Vec<NodeId>`.
#[derive(Debug)]
pub struct Tree {
    nodes: HashMap<NodeId, NodeData>,
    root: NodeId,
    next_id: u64,
    on_changed: Emitter<()>,
    on_node_refreshed: Emitter<NodeId>,
}

impl Tree {
    /// Create a tree containing only a root node.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, NodeData::new(None));
        Self {
            nodes,
            root,
            next_id: 1,
            on_changed: Emitter::new(),
            on_node_refreshed: Emitter::new(),
        }
    }

    /// The current root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new child under `parent`, returning its id.
    ///
    /// Panics if `parent` is not a member of this tree — this is a test/
    /// construction-time helper, not part of the runtime selection surface.
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        assert!(self.nodes.contains_key(&parent), "unknown parent node");
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, NodeData::new(Some(parent)));
        self.nodes.get_mut(&parent).unwrap().children.push(id);
        id
    }

    /// Reassign the root, discarding all other nodes. Callers that hold a
    /// `SelectionState`/`SelectionService` bound to the old root must
    /// reset their selection via [`crate::selection::Input::Reset`].
    pub fn set_root(&mut self) -> NodeId {
        self.nodes.clear();
        self.root = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(self.root, NodeData::new(None));
        self.on_changed.emit(());
        self.root
    }

    /// Retarget the root to an existing node without discarding the rest
    /// of the arena — "zooming" into a subtree while leaving its former
    /// ancestors addressable by id, just no longer reachable through
    /// traversal. Returns `false` if `id` is not a member of this tree.
    pub fn navigate_root(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.root = id;
        self.on_changed.emit(());
        true
    }

    /// Look up a node, returning `None` if it has since been removed from
    /// the tree.
    pub fn get_node(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.contains_key(&id).then_some(id)
    }

    /// Identical to [`Self::get_node`] — a node is valid iff it is still
    /// a member of *this* tree.
    pub fn validate_node(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)
    }

    /// `refresh`: re-validate the tree's internal bookkeeping. This
    /// arena-backed implementation has no external source to resync
    /// against, so refresh only notifies subscribers.
    pub fn refresh(&self) {
        self.on_changed.emit(());
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_expandable(&self, id: NodeId) -> bool {
        !self.children_of(id).is_empty()
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.nodes.get(&id).map(|n| n.expanded).unwrap_or(false)
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.expanded = expanded;
        }
        self.on_node_refreshed.emit(id);
    }

    /// The node's own visibility flag, ignoring ancestor state.
    pub fn own_visible(&self, id: NodeId) -> bool {
        self.nodes.get(&id).map(|n| n.visible).unwrap_or(false)
    }

    pub fn set_own_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.visible = visible;
        }
    }

    /// A selectable node is visible iff it and every ancestor is itself
    /// visible, and every ancestor is expanded where expandable.
    pub fn is_visible(&self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        let mut cur = id;
        loop {
            if !self.own_visible(cur) {
                return false;
            }
            match self.parent_of(cur) {
                Some(p) => {
                    if self.is_expandable(p) && !self.is_expanded(p) {
                        return false;
                    }
                    cur = p;
                }
                None => return true,
            }
        }
    }

    /// Is `ancestor` a (possibly indirect) ancestor of `descendant`?
    /// Defined as the transitive closure of the parent relation.
    pub fn is_ancestor(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut cur = descendant;
        while let Some(p) = self.parent_of(cur) {
            if p == ancestor {
                return true;
            }
            cur = p;
        }
        false
    }

    /// The cached `selected` flag. Never authoritative on its own — it is
    /// maintained solely by [`crate::selection::SelectionService`] as a
    /// diff of successive projections.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.nodes.get(&id).map(|n| n.selected).unwrap_or(false)
    }

    pub(crate) fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.selected = selected;
        }
    }

    pub fn on_changed(&self, listener: impl Fn() + 'static) -> crate::event::Disposable {
        self.on_changed.subscribe(move |_| listener())
    }

    pub fn on_node_refreshed(
        &self,
        listener: impl Fn(NodeId) + 'static,
    ) -> crate::event::Disposable {
        self.on_node_refreshed.subscribe(move |&id| listener(id))
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
