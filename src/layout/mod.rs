//! Layout managers.
//!
//! A layout manager owns the child list of one component and computes each
//! child's rectangle inside the owner's area. Three algorithms exist:
//!
//! - [`BorderLayout`]: five slots, top/bottom/left/right sized from preferences,
//!   center takes the rest
//! - [`GridLayout`]: fixed rows × columns, remainder spread over leading cells
//! - [`StackLayout`]: one axis, first-come-first-served truncation on overflow
//!
//! Layouts never touch components directly. Preferred sizes come in through a
//! lookup closure and children are addressed by [`ComponentId`]; the tree
//! owns recursion (invalidate propagation, validate top-down).
//!
//! Geometry queries are meaningful only between a `validate` and the next
//! `invalidate`.

pub mod border;
pub mod grid;
pub mod stack;

pub use border::{BorderLayout, Slot};
pub use grid::GridLayout;
pub use stack::StackLayout;

use crate::component::ComponentId;
use crate::error::{Error, Result};
use crate::types::{Axis, Direction, Point, Size};

/// Placement hint passed when adding a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Constraint {
    /// Layout picks: border center, first free grid slot, end of stack.
    #[default]
    None,
    /// A border slot.
    Border(Slot),
    /// A grid cell (column, row), zero-based.
    Cell { column: i32, row: i32 },
}

impl From<Slot> for Constraint {
    fn from(slot: Slot) -> Self {
        Self::Border(slot)
    }
}

/// Preferred-size lookup for children.
pub type PreferredSizeFn<'a> = &'a dyn Fn(ComponentId) -> Size;

/// The closed set of layout algorithms.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutManager {
    Border(BorderLayout),
    Grid(GridLayout),
    Stack(StackLayout),
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::border()
    }
}

impl From<BorderLayout> for LayoutManager {
    fn from(layout: BorderLayout) -> Self {
        Self::Border(layout)
    }
}

impl From<GridLayout> for LayoutManager {
    fn from(layout: GridLayout) -> Self {
        Self::Grid(layout)
    }
}

impl From<StackLayout> for LayoutManager {
    fn from(layout: StackLayout) -> Self {
        Self::Stack(layout)
    }
}

macro_rules! dispatch {
    ($self:expr, $layout:ident => $body:expr) => {
        match $self {
            LayoutManager::Border($layout) => $body,
            LayoutManager::Grid($layout) => $body,
            LayoutManager::Stack($layout) => $body,
        }
    };
}

impl LayoutManager {
    pub fn border() -> Self {
        Self::Border(BorderLayout::new())
    }

    /// Grid with the given rows and columns; one of them may be zero.
    pub fn grid(rows: i32, cols: i32) -> Result<Self> {
        GridLayout::new(rows, cols).map(Self::Grid)
    }

    pub fn stack(axis: Axis) -> Self {
        Self::Stack(StackLayout::new(axis))
    }

    /// Reject a constraint this layout cannot honor, without mutating.
    pub fn check(&self, constraint: Constraint) -> Result<()> {
        match self {
            Self::Border(layout) => layout.check(constraint),
            Self::Grid(layout) => layout.check(constraint),
            Self::Stack(_) => match constraint {
                Constraint::None => Ok(()),
                other => Err(Error::invalid(format!(
                    "stack layout takes no constraint, got {other:?}"
                ))),
            },
        }
    }

    /// Add a child. Returns children displaced from an occupied slot.
    pub fn add(&mut self, child: ComponentId, constraint: Constraint) -> Result<Vec<ComponentId>> {
        self.check(constraint)?;
        match self {
            Self::Border(layout) => layout.add(child, constraint),
            Self::Grid(layout) => layout.add(child, constraint),
            Self::Stack(layout) => {
                layout.add(child);
                Ok(Vec::new())
            }
        }
    }

    /// Remove a child. Returns false if it was not managed here.
    pub fn remove(&mut self, child: ComponentId) -> bool {
        dispatch!(self, layout => layout.remove(child))
    }

    /// Remove every child, returning them in component order.
    pub fn remove_all(&mut self) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.remove_all())
    }

    /// Children in this layout's defined order (also the paint order).
    pub fn components(&self) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.components())
    }

    pub fn contains(&self, child: ComponentId) -> bool {
        self.components().contains(&child)
    }

    pub fn is_empty(&self) -> bool {
        self.components().is_empty()
    }

    pub fn size_of(&self, child: ComponentId) -> Size {
        dispatch!(self, layout => layout.size_of(child))
    }

    pub fn location_of(&self, child: ComponentId) -> Point {
        dispatch!(self, layout => layout.location_of(child))
    }

    /// Mark the computed geometry stale.
    pub fn invalidate(&mut self) {
        dispatch!(self, layout => layout.invalidate())
    }

    pub fn is_valid(&self) -> bool {
        dispatch!(self, layout => layout.is_valid())
    }

    /// Recompute every child's rectangle inside `area`.
    pub fn validate(&mut self, area: Size, preferred: PreferredSizeFn<'_>) {
        dispatch!(self, layout => layout.validate(area, preferred))
    }

    /// Intrinsic size from the children's preferred sizes.
    pub fn preferred_size(&self, preferred: PreferredSizeFn<'_>) -> Size {
        dispatch!(self, layout => layout.preferred_size(preferred))
    }

    pub fn above(&self, child: ComponentId) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.above(child))
    }

    pub fn below(&self, child: ComponentId) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.below(child))
    }

    pub fn left_of(&self, child: ComponentId) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.left_of(child))
    }

    pub fn right_of(&self, child: ComponentId) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.right_of(child))
    }

    /// Siblings strictly in `direction` from `child`, nearest first.
    pub fn neighbors(&self, child: ComponentId, direction: Direction) -> Vec<ComponentId> {
        match direction {
            Direction::Up => self.above(child),
            Direction::Down => self.below(child),
            Direction::Left => self.left_of(child),
            Direction::Right => self.right_of(child),
        }
    }

    /// Children ordered left to right.
    pub fn ordered_ltr(&self) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.ordered_ltr())
    }

    /// Children ordered top to bottom.
    pub fn ordered_ttb(&self) -> Vec<ComponentId> {
        dispatch!(self, layout => layout.ordered_ttb())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    use crate::component::ComponentId;
    use crate::types::Size;

    pub fn id(n: u32) -> ComponentId {
        ComponentId::new(n, 0)
    }

    /// Preferred sizes keyed by id; missing ids prefer zero.
    pub fn prefs(entries: &[(ComponentId, Size)]) -> impl Fn(ComponentId) -> Size + use<> {
        let map: HashMap<ComponentId, Size> = entries.iter().copied().collect();
        move |c| map.get(&c).copied().unwrap_or(Size::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_stack_rejects_constraints() {
        let mut layout = LayoutManager::stack(Axis::Vertical);
        assert!(layout.add(id(1), Constraint::Border(Slot::Top)).is_err());
        assert!(layout.add(id(1), Constraint::Cell { column: 0, row: 0 }).is_err());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_validate_twice_is_idempotent() {
        let prefs = prefs(&[(id(1), Size::new(3, 2)), (id(2), Size::new(4, 5))]);
        let mut layouts = vec![
            LayoutManager::border(),
            LayoutManager::grid(2, 0).unwrap(),
            LayoutManager::stack(Axis::Horizontal),
        ];
        for layout in &mut layouts {
            let second = match layout {
                LayoutManager::Border(_) => Constraint::Border(Slot::Left),
                _ => Constraint::None,
            };
            layout.add(id(1), Constraint::None).unwrap();
            layout.add(id(2), second).unwrap();

            layout.validate(Size::new(11, 7), &prefs);
            let first: Vec<_> = layout
                .components()
                .into_iter()
                .map(|c| (layout.size_of(c), layout.location_of(c)))
                .collect();
            layout.validate(Size::new(11, 7), &prefs);
            let again: Vec<_> = layout
                .components()
                .into_iter()
                .map(|c| (layout.size_of(c), layout.location_of(c)))
                .collect();
            assert_eq!(first, again);
            assert!(layout.is_valid());
        }
    }

    #[test]
    fn test_invalidate_clears_validity() {
        let mut layout = LayoutManager::border();
        layout.validate(Size::new(4, 4), &|_| Size::ZERO);
        assert!(layout.is_valid());
        layout.invalidate();
        assert!(!layout.is_valid());
    }
}
