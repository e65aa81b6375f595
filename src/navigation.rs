//! Navigation history.
//!
//! A plain back/forward stack over the sequence of tree roots a
//! [`crate::model::TreeModel`] has zoomed into via `navigateTo`. Kept
//! deliberately separate from [`crate::node::Tree`] — the tree owns the
//! data, this owns only the user's path through it.

use crate::node::NodeId;

#[derive(Debug, Default)]
pub struct NavigationHistory {
    back: Vec<NodeId>,
    forward: Vec<NodeId>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node` as the place navigated away from, and discard the
    /// forward stack: navigating somewhere new invalidates any redo path.
    pub fn push(&mut self, node: NodeId) {
        self.back.push(node);
        self.forward.clear();
    }

    /// Step backward, if there is anywhere to step back to. `current` is
    /// pushed onto the forward stack so a subsequent `advance` can return
    /// to it.
    pub fn retreat(&mut self, current: NodeId) -> Option<NodeId> {
        let target = self.back.pop()?;
        self.forward.push(current);
        Some(target)
    }

    /// Step forward, the mirror of [`Self::retreat`].
    pub fn advance(&mut self, current: NodeId) -> Option<NodeId> {
        let target = self.forward.pop()?;
        self.back.push(current);
        Some(target)
    }

    /// Peek at what `retreat` would return, without consuming it.
    pub fn prev(&self) -> Option<NodeId> {
        self.back.last().copied()
    }

    /// Peek at what `advance` would return, without consuming it.
    pub fn next(&self) -> Option<NodeId> {
        self.forward.last().copied()
    }
}
