//! A multi-selection state machine for a hierarchical tree view.
//!
//! The crate is layered as follows:
//!
//! - [`iter`] — collapse-pruned traversal orders over an external tree
//!   (pre-order, breadth-first, and the two document-order walks that
//!   keyboard navigation and range selection are built on).
//! - [`selection`] — the pure gesture-stack state machine (`SelectionState`)
//!   and the [`selection::service::SelectionService`] that drives it
//!   against a real tree, keeping a cached `selected` flag in sync.
//! - [`node`] — the one concrete, arena-backed `Tree` implementation the
//!   rest of the crate (and its tests) run against.
//! - [`event`] — the synchronous subscriber-list primitive every change
//!   notification in the crate is built on.
//! - [`expansion`] and [`navigation`] — the two remaining external
//!   collaborators, each with a concrete implementation.
//! - [`model`] — `TreeModel`, which binds all of the above into the
//!   high-level operations a UI actually calls.

pub mod error;
pub mod event;
pub mod expansion;
pub mod iter;
pub mod model;
pub mod navigation;
pub mod node;
pub mod selection;

pub use error::SelectionError;
pub use event::{Disposable, Emitter};
pub use expansion::ExpansionService;
pub use model::TreeModel;
pub use navigation::NavigationHistory;
pub use node::{NodeId, Tree};
pub use selection::service::SelectionService;
pub use selection::{Gesture, GestureKind, Input, SelectionState};
