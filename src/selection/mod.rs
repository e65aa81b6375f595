//! The selection state machine.
//!
//! A [`SelectionState`] is an immutable value: a persistent stack of
//! [`Gesture`]s. Every transition produces a new state rather than
//! mutating the old one — this is what lets the transition rules be
//! unit-tested in complete isolation from any mutation or rendering
//! concern. The stack is backed by `im::Vector`, a persistent vector
//! (the same reason an accesskit-style consumer reaches for `im`:
//! cheap structural-sharing clones of an otherwise replace-on-every-event
//! value), so cloning a state to branch off a new one is O(1) rather than
//! O(n).

pub mod service;

use im::Vector;

use crate::error::SelectionError;
use crate::iter::range;
use crate::node::{NodeId, Tree};

/// The three gesture kinds a caller may send. `Default` is always
/// normalized away immediately: it never survives into a stored stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// A plain click: replace the whole selection with a single node.
    /// Normalized to `[Toggle(node)]` the moment it is applied.
    Default,
    /// A ctrl-click: add or remove one node from the selection.
    Toggle,
    /// A shift-click: extend/replace the most recent range.
    Range,
}

/// A user-intent record `(node, kind)` — the unit of state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    pub node: NodeId,
    pub kind: GestureKind,
}

impl Gesture {
    pub fn default_click(node: NodeId) -> Self {
        Self {
            node,
            kind: GestureKind::Default,
        }
    }

    pub fn toggle(node: NodeId) -> Self {
        Self {
            node,
            kind: GestureKind::Toggle,
        }
    }

    pub fn range(node: NodeId) -> Self {
        Self {
            node,
            kind: GestureKind::Range,
        }
    }
}

/// What can be fed into [`SelectionState::next`]: a normal gesture, or the
/// `RESET` sentinel that clears the state entirely (e.g. when the tree's
/// root is reassigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Gesture(Gesture),
    Reset,
}

/// An immutable ordered sequence of gestures. See the module doc for why
/// it is persistent rather than mutated in place.
#[derive(Debug, Clone)]
pub struct SelectionState {
    stack: Vector<Gesture>,
}

impl SelectionState {
    /// The empty state.
    pub fn new() -> Self {
        Self {
            stack: Vector::new(),
        }
    }

    /// Build a state directly from a gesture stack, rejecting anything
    /// that violates the stack invariants: no `Default` entries, and
    /// every `Range` gesture (besides the documented no-anchor exception
    /// of a lone `Range` as the whole stack) must be immediately preceded
    /// by a `Toggle` gesture, which serves as its anchor.
    ///
    /// Used internally by every transition and exposed for tests that
    /// want to assemble a state by hand.
    pub fn from_stack(stack: Vec<Gesture>) -> Result<Self, SelectionError> {
        for (i, g) in stack.iter().enumerate() {
            match g.kind {
                GestureKind::Default => {
                    return Err(SelectionError::InvalidGesture(
                        "Default gestures may not appear in a stored stack".into(),
                    ));
                }
                GestureKind::Range => {
                    if i == 0 {
                        if stack.len() != 1 {
                            return Err(SelectionError::InvalidGesture(
                                "a Range gesture may only be the sole element of a stack, never merely the first".into(),
                            ));
                        }
                    } else if stack[i - 1].kind != GestureKind::Toggle {
                        return Err(SelectionError::InvalidGesture(
                            "a Range gesture must be immediately preceded by its Toggle anchor".into(),
                        ));
                    }
                }
                GestureKind::Toggle => {}
            }
        }
        Ok(Self {
            stack: stack.into_iter().collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pure transition function. Never mutates `self`.
    pub fn next(&self, tree: &Tree, input: Input) -> Result<SelectionState, SelectionError> {
        let gesture = match input {
            Input::Reset => return Ok(SelectionState::new()),
            Input::Gesture(g) => g,
        };
        match gesture.kind {
            GestureKind::Default => {
                let mut stack = Vector::new();
                stack.push_back(Gesture::toggle(gesture.node));
                Ok(Self { stack })
            }
            GestureKind::Toggle => self.apply_toggle(tree, gesture.node),
            GestureKind::Range => self.apply_range(tree, gesture.node),
        }
    }

    /// Locate the topmost `Range` gesture, if any, and resolve its anchor
    /// and tree-order range.
    fn topmost_range(&self, tree: &Tree) -> Result<Option<(usize, NodeId, Vec<NodeId>)>, SelectionError> {
        let Some(idx) = self
            .stack
            .iter()
            .enumerate()
            .rev()
            .find(|(_, g)| g.kind == GestureKind::Range)
            .map(|(i, _)| i)
        else {
            return Ok(None);
        };
        if idx == 0 {
            // The documented no-anchor exception: a lone Range contributes
            // nothing, so it can never be the range a Toggle might split.
            return Ok(None);
        }
        let anchor_gesture = self.stack[idx - 1];
        if anchor_gesture.kind != GestureKind::Toggle {
            return Err(SelectionError::InvalidGesture(
                "range anchor must be a toggle gesture".into(),
            ));
        }
        let range_node = self.stack[idx].node;
        let nodes = range(tree, anchor_gesture.node, range_node);
        Ok(Some((idx, anchor_gesture.node, nodes)))
    }

    fn apply_toggle(&self, tree: &Tree, n: NodeId) -> Result<SelectionState, SelectionError> {
        // Step 1: range split.
        if let Some((range_idx, anchor, range_nodes)) = self.topmost_range(tree)? {
            if range_nodes.contains(&n) {
                let replacement: Vec<Gesture> = range_nodes
                    .iter()
                    .filter(|&&m| m != anchor && m != n)
                    .map(|&m| Gesture::toggle(m))
                    .collect();
                let mut stack = self.stack.clone();
                stack.remove(range_idx);
                for (offset, g) in replacement.into_iter().enumerate() {
                    stack.insert(range_idx + offset, g);
                }
                return Ok(Self { stack });
            }
        }

        // Step 2: toggle merge — scan top-to-bottom until the first Range,
        // removing any Toggle(n) found in that prefix.
        let mut removed_any = false;
        let mut hit_range = false;
        let mut rebuilt: Vector<Gesture> = Vector::new();
        for g in self.stack.iter().rev() {
            if hit_range {
                rebuilt.push_front(*g);
                continue;
            }
            if g.kind == GestureKind::Range {
                hit_range = true;
                rebuilt.push_front(*g);
                continue;
            }
            if g.kind == GestureKind::Toggle && g.node == n {
                removed_any = true;
                continue;
            }
            rebuilt.push_front(*g);
        }

        if removed_any {
            Ok(Self { stack: rebuilt })
        } else {
            let mut stack = self.stack.clone();
            stack.push_back(Gesture::toggle(n));
            Ok(Self { stack })
        }
    }

    fn apply_range(&self, tree: &Tree, n: NodeId) -> Result<SelectionState, SelectionError> {
        // Step 1: if the topmost gesture is itself a Range, pop it.
        let mut stack = self.stack.clone();
        if matches!(stack.back(), Some(g) if g.kind == GestureKind::Range) {
            stack.pop_back();
        }

        // Step 2: the node at the new top is the anchor. An empty stack
        // degrades to an anchorless range: no contribution.
        let Some(anchor_gesture) = stack.back().copied() else {
            stack.push_back(Gesture::range(n));
            return Ok(Self { stack });
        };
        if anchor_gesture.kind != GestureKind::Toggle {
            return Err(SelectionError::InvalidGesture(
                "range anchor must be a toggle gesture".into(),
            ));
        }
        let anchor = anchor_gesture.node;

        // Step 3: subsume overlapping toggles, stopping at the next Range.
        let r = range(tree, anchor, n);
        let mut hit_range = false;
        let mut rebuilt: Vector<Gesture> = Vector::new();
        for g in stack.iter().rev() {
            if hit_range {
                rebuilt.push_front(*g);
                continue;
            }
            if g.kind == GestureKind::Range {
                hit_range = true;
                rebuilt.push_front(*g);
                continue;
            }
            if g.kind == GestureKind::Toggle && g.node != anchor && r.contains(&g.node) {
                continue;
            }
            rebuilt.push_front(*g);
        }

        // Step 4: push the new Range gesture.
        rebuilt.push_back(Gesture::range(n));
        Ok(Self { stack: rebuilt })
    }

    /// The ordered list of distinct selected nodes, most-recent-first.
    pub fn projection(&self, tree: &Tree) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        let mut prev: Option<Gesture> = None;
        for g in self.stack.iter() {
            match g.kind {
                GestureKind::Toggle => out.push(g.node),
                GestureKind::Range => {
                    if let Some(p) = prev {
                        if p.kind == GestureKind::Toggle {
                            out.pop();
                        }
                        out.extend(range(tree, p.node, g.node));
                    }
                    // else: no-anchor Range, empty contribution.
                }
                GestureKind::Default => unreachable!("Default never enters a stored stack"),
            }
            prev = Some(*g);
        }
        out.reverse();
        out
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
