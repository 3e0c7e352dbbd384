//! Focus state and directional navigation.
//!
//! One component per window holds focus. Directional moves work without any
//! widget knowing its neighbors: starting at the focused component, each
//! ancestor level asks its parent's layout manager for the siblings lying in
//! the requested direction (nearest first) and searches each candidate's
//! subtree for the best interactive component. If no sibling yields one and
//! the parent is itself interactive, the parent wins. Otherwise the walk
//! climbs one level, until the window is reached.
//!
//! The subtree search is per direction:
//!
//! - **Up**: children bottom to top, recursing, then the candidate itself
//! - **Down**: the candidate itself, then children top to bottom
//! - **Left**: children right to left, recursing, then the candidate itself
//! - **Right**: the candidate itself, then children left to right
//!
//! The input reader thread reads the focused component through a
//! [`FocusSnapshot`] without touching the tree.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::component::{ComponentId, Tree};
use crate::error::{Error, Result};
use crate::types::Direction;

const NO_FOCUS: u64 = u64::MAX;

/// Lock-free copy of the focused component, readable from any thread.
///
/// May lag the pump by one update; a stale read only misroutes or drops a
/// keystroke.
#[derive(Debug, Clone)]
pub struct FocusSnapshot(Arc<AtomicU64>);

impl Default for FocusSnapshot {
    fn default() -> Self {
        Self(Arc::new(AtomicU64::new(NO_FOCUS)))
    }
}

impl FocusSnapshot {
    pub fn get(&self) -> Option<ComponentId> {
        match self.0.load(Ordering::Acquire) {
            NO_FOCUS => None,
            bits => Some(ComponentId::from_bits(bits)),
        }
    }

    fn set(&self, id: Option<ComponentId>) {
        let bits = id.map_or(NO_FOCUS, ComponentId::to_bits);
        self.0.store(bits, Ordering::Release);
    }
}

/// A completed focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTransition {
    pub lost: Option<ComponentId>,
    pub gained: ComponentId,
}

/// The focused component of one window.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<ComponentId>,
    snapshot: FocusSnapshot,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.focused
    }

    /// A handle for other threads.
    pub fn snapshot(&self) -> FocusSnapshot {
        self.snapshot.clone()
    }

    fn set(&mut self, id: Option<ComponentId>) {
        self.focused = id;
        self.snapshot.set(id);
    }

    /// Focus `id` directly.
    ///
    /// Fails for components that are not in the window's tree or are not
    /// interactive. Returns `None` if `id` already has focus.
    pub fn assign(&mut self, tree: &Tree, id: ComponentId) -> Result<Option<FocusTransition>> {
        if !tree.is_reachable(id) {
            return Err(Error::invalid(format!("{id:?} is not part of the window")));
        }
        if !tree.is_interactive(id) {
            return Err(Error::invalid(format!("{id:?} can not hold focus")));
        }
        Ok(self.transition_to(id))
    }

    fn transition_to(&mut self, id: ComponentId) -> Option<FocusTransition> {
        if self.focused == Some(id) {
            return None;
        }
        let lost = self.focused;
        self.set(Some(id));
        Some(FocusTransition { lost, gained: id })
    }

    /// Drop focus if the focused component left the tree or stopped being
    /// interactive. Returns true if focus was dropped.
    pub fn prune(&mut self, tree: &Tree) -> bool {
        match self.focused {
            Some(id) if !tree.is_reachable(id) || !tree.is_interactive(id) => {
                tracing::debug!(?id, "focused component left the tree");
                self.set(None);
                true
            }
            _ => false,
        }
    }

    /// First interactive component in pre-order from the root.
    pub fn first_interactive(tree: &Tree) -> Option<ComponentId> {
        tree.preorder(tree.root())
            .into_iter()
            .find(|id| tree.is_interactive(*id))
    }

    /// Move focus one step in `direction`. `None` when focus stays put.
    pub fn navigate(&mut self, tree: &Tree, direction: Direction) -> Option<FocusTransition> {
        let start = self.focused.filter(|id| tree.is_reachable(*id))?;
        let target = find_target(tree, start, direction)?;
        tracing::debug!(?direction, from = ?start, to = ?target, "focus moved");
        self.transition_to(target)
    }
}

fn find_target(tree: &Tree, start: ComponentId, direction: Direction) -> Option<ComponentId> {
    let root = tree.root();
    let mut current = start;
    while current != root {
        let parent = tree.parent(current)?;
        let layout = tree.layout(parent)?;
        let found = layout
            .neighbors(current, direction)
            .into_iter()
            .find_map(|candidate| search(tree, candidate, direction));
        if found.is_some() {
            return found;
        }
        if tree.is_interactive(parent) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

/// Best interactive component inside `candidate`'s subtree for `direction`.
fn search(tree: &Tree, candidate: ComponentId, direction: Direction) -> Option<ComponentId> {
    let own = tree.is_interactive(candidate).then_some(candidate);
    let Some(layout) = tree.layout(candidate) else {
        return own;
    };
    match direction {
        Direction::Up => layout
            .ordered_ttb()
            .into_iter()
            .rev()
            .find_map(|c| search(tree, c, direction))
            .or(own),
        Direction::Left => layout
            .ordered_ltr()
            .into_iter()
            .rev()
            .find_map(|c| search(tree, c, direction))
            .or(own),
        Direction::Down => own.or_else(|| {
            layout
                .ordered_ttb()
                .into_iter()
                .find_map(|c| search(tree, c, direction))
        }),
        Direction::Right => own.or_else(|| {
            layout
                .ordered_ltr()
                .into_iter()
                .find_map(|c| search(tree, c, direction))
        }),
    }
}
