//! Border layout: five slots around a center.
//!
//! ```text
//! +-----------------------+
//! |          top          |
//! +------+--------+-------+
//! | left | center | right |
//! +------+--------+-------+
//! |         bottom        |
//! +-----------------------+
//! ```
//!
//! Top and bottom span the full width; left, center and right share the
//! middle band. Opposing sides are sized from their preferences, with an
//! overflow policy when they don't both fit.

use super::{Constraint, PreferredSizeFn};
use crate::component::ComponentId;
use crate::error::{Error, Result};
use crate::types::{Point, Size};

/// A border slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Slot {
    Top,
    Right,
    Bottom,
    Left,
    #[default]
    Center,
}

impl Slot {
    /// Component order of the slots.
    pub const ALL: [Slot; 5] = [Slot::Top, Slot::Right, Slot::Bottom, Slot::Left, Slot::Center];

    const fn index(self) -> usize {
        match self {
            Slot::Top => 0,
            Slot::Right => 1,
            Slot::Bottom => 2,
            Slot::Left => 3,
            Slot::Center => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderLayout {
    slots: [Option<ComponentId>; 5],
    area: Size,
    top_height: i32,
    bottom_height: i32,
    left_width: i32,
    right_width: i32,
    valid: bool,
}

impl BorderLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupant of a slot.
    pub fn get(&self, slot: Slot) -> Option<ComponentId> {
        self.slots[slot.index()]
    }

    /// Slot holding `child`.
    pub fn slot_of(&self, child: ComponentId) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| self.get(*s) == Some(child))
    }

    pub(crate) fn check(&self, constraint: Constraint) -> Result<()> {
        match constraint {
            Constraint::None | Constraint::Border(_) => Ok(()),
            other => Err(Error::invalid(format!(
                "border layout takes a slot, got {other:?}"
            ))),
        }
    }

    pub(crate) fn add(&mut self, child: ComponentId, constraint: Constraint) -> Result<Vec<ComponentId>> {
        let slot = match constraint {
            Constraint::None => Slot::Center,
            Constraint::Border(slot) => slot,
            other => {
                return Err(Error::invalid(format!(
                    "border layout takes a slot, got {other:?}"
                )));
            }
        };
        let displaced = self.slots[slot.index()].replace(child);
        self.invalidate();
        Ok(displaced.filter(|old| *old != child).into_iter().collect())
    }

    pub(crate) fn remove(&mut self, child: ComponentId) -> bool {
        let mut found = false;
        for slot in self.slots.iter_mut() {
            if *slot == Some(child) {
                *slot = None;
                found = true;
            }
        }
        if found {
            self.invalidate();
        }
        found
    }

    pub(crate) fn remove_all(&mut self) -> Vec<ComponentId> {
        let removed = self.components();
        self.slots = [None; 5];
        self.invalidate();
        removed
    }

    /// Occupied slots in top, right, bottom, left, center order.
    pub fn components(&self) -> Vec<ComponentId> {
        self.slots.iter().flatten().copied().collect()
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn validate(&mut self, area: Size, preferred: PreferredSizeFn<'_>) {
        let pref = |slot: Slot| self.get(slot).map(preferred).unwrap_or(Size::ZERO);
        let left = pref(Slot::Left).width;
        let right = pref(Slot::Right).width;
        let top = pref(Slot::Top).height;
        let bottom = pref(Slot::Bottom).height;

        (self.left_width, self.right_width) = split(left, right, area.width);
        (self.top_height, self.bottom_height) = split(top, bottom, area.height);
        self.area = area;
        self.valid = true;
    }

    pub fn preferred_size(&self, preferred: PreferredSizeFn<'_>) -> Size {
        let pref = |slot: Slot| self.get(slot).map(preferred).unwrap_or(Size::ZERO);
        let (top, right, bottom, left, center) = (
            pref(Slot::Top),
            pref(Slot::Right),
            pref(Slot::Bottom),
            pref(Slot::Left),
            pref(Slot::Center),
        );
        let middle_width = left.width + center.width + right.width;
        let middle_height = left.height.max(center.height).max(right.height);
        Size::new(
            top.width.max(bottom.width).max(middle_width),
            middle_height + top.height + bottom.height,
        )
    }

    pub fn size_of(&self, child: ComponentId) -> Size {
        let middle = self.area.height - self.top_height - self.bottom_height;
        match self.slot_of(child) {
            Some(Slot::Top) => Size::new(self.area.width, self.top_height),
            Some(Slot::Bottom) => Size::new(self.area.width, self.bottom_height),
            Some(Slot::Left) => Size::new(self.left_width, middle),
            Some(Slot::Right) => Size::new(self.right_width, middle),
            Some(Slot::Center) => Size::new(
                self.area.width - self.left_width - self.right_width,
                middle,
            ),
            None => Size::ZERO,
        }
    }

    pub fn location_of(&self, child: ComponentId) -> Point {
        match self.slot_of(child) {
            Some(Slot::Top) | None => Point::ORIGIN,
            Some(Slot::Bottom) => Point::new(0, self.area.height - self.bottom_height),
            Some(Slot::Left) => Point::new(0, self.top_height),
            Some(Slot::Right) => Point::new(self.area.width - self.right_width, self.top_height),
            Some(Slot::Center) => Point::new(self.left_width, self.top_height),
        }
    }

    // =========================================================================
    // Spatial queries
    // =========================================================================

    fn collect(&self, slots: &[Slot]) -> Vec<ComponentId> {
        slots.iter().filter_map(|s| self.get(*s)).collect()
    }

    pub fn left_of(&self, child: ComponentId) -> Vec<ComponentId> {
        match self.slot_of(child) {
            Some(Slot::Right) => self.collect(&[Slot::Center, Slot::Left]),
            Some(Slot::Center) => self.collect(&[Slot::Left]),
            _ => Vec::new(),
        }
    }

    pub fn right_of(&self, child: ComponentId) -> Vec<ComponentId> {
        match self.slot_of(child) {
            Some(Slot::Left) => self.collect(&[Slot::Center, Slot::Right]),
            Some(Slot::Center) => self.collect(&[Slot::Right]),
            _ => Vec::new(),
        }
    }

    pub fn above(&self, child: ComponentId) -> Vec<ComponentId> {
        match self.slot_of(child) {
            Some(Slot::Bottom) => self.collect(&[Slot::Right, Slot::Center, Slot::Left, Slot::Top]),
            Some(Slot::Left | Slot::Center | Slot::Right) => self.collect(&[Slot::Top]),
            _ => Vec::new(),
        }
    }

    pub fn below(&self, child: ComponentId) -> Vec<ComponentId> {
        match self.slot_of(child) {
            Some(Slot::Top) => self.collect(&[Slot::Left, Slot::Center, Slot::Right, Slot::Bottom]),
            Some(Slot::Left | Slot::Center | Slot::Right) => self.collect(&[Slot::Bottom]),
            _ => Vec::new(),
        }
    }

    pub fn ordered_ltr(&self) -> Vec<ComponentId> {
        self.collect(&[Slot::Left, Slot::Top, Slot::Center, Slot::Bottom, Slot::Right])
    }

    pub fn ordered_ttb(&self) -> Vec<ComponentId> {
        self.collect(&[Slot::Top, Slot::Left, Slot::Center, Slot::Right, Slot::Bottom])
    }
}

/// Split `span` between two opposing preferences `a` and `b`.
///
/// - both fit: each gets its preference
/// - both exceed half: even split, the odd cell to the larger request
///   (to `a` on a tie)
/// - only one exceeds half: it keeps its preference (capped at the span), the
///   other gets the complement
fn split(a: i32, b: i32, span: i32) -> (i32, i32) {
    let span = span.max(0);
    let (a, b) = (a.max(0), b.max(0));
    if a + b <= span {
        return (a, b);
    }
    let half = span / 2;
    if a > half && b > half {
        if span % 2 == 0 {
            (half, half)
        } else if b > a {
            (half, half + 1)
        } else {
            (half + 1, half)
        }
    } else if b > half {
        let b = b.min(span);
        (span - b, b)
    } else {
        let a = a.min(span);
        (a, span - a)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout_with(entries: &[(u32, Slot)]) -> BorderLayout {
        let mut layout = BorderLayout::new();
        for (n, slot) in entries {
            layout.add(id(*n), Constraint::Border(*slot)).unwrap();
        }
        layout
    }

    #[test]
    fn test_overflow_even_split() {
        let mut layout = layout_with(&[(1, Slot::Top), (2, Slot::Bottom)]);
        let p = prefs(&[(id(1), Size::new(1, 10)), (id(2), Size::new(1, 8))]);
        layout.validate(Size::new(20, 12), &p);
        assert_eq!(layout.size_of(id(1)).height, 6);
        assert_eq!(layout.size_of(id(2)).height, 6);
    }

    #[test]
    fn test_overflow_complement() {
        let mut layout = layout_with(&[(1, Slot::Top), (2, Slot::Bottom)]);
        let p = prefs(&[(id(1), Size::new(1, 3)), (id(2), Size::new(1, 10))]);
        layout.validate(Size::new(20, 12), &p);
        assert_eq!(layout.size_of(id(1)).height, 2);
        assert_eq!(layout.size_of(id(2)).height, 10);
        assert_eq!(layout.location_of(id(2)), Point::new(0, 2));
    }

    #[test]
    fn test_odd_split_favors_larger_request() {
        assert_eq!(split(7, 9, 11), (5, 6));
        assert_eq!(split(9, 7, 11), (6, 5));
        assert_eq!(split(8, 8, 11), (6, 5));
        assert_eq!(split(3, 4, 10), (3, 4));
        assert_eq!(split(2, 30, 10), (0, 10));
    }

    #[test]
    fn test_center_absorbs_remaining_space() {
        let mut layout = layout_with(&[
            (1, Slot::Top),
            (2, Slot::Left),
            (3, Slot::Center),
            (4, Slot::Right),
            (5, Slot::Bottom),
        ]);
        let p = prefs(&[
            (id(1), Size::new(5, 1)),
            (id(2), Size::new(3, 1)),
            (id(4), Size::new(2, 1)),
            (id(5), Size::new(5, 2)),
        ]);
        layout.validate(Size::new(20, 10), &p);

        assert_eq!(layout.size_of(id(1)), Size::new(20, 1));
        assert_eq!(layout.size_of(id(5)), Size::new(20, 2));
        assert_eq!(layout.location_of(id(5)), Point::new(0, 8));
        assert_eq!(layout.size_of(id(2)), Size::new(3, 7));
        assert_eq!(layout.location_of(id(2)), Point::new(0, 1));
        assert_eq!(layout.size_of(id(4)), Size::new(2, 7));
        assert_eq!(layout.location_of(id(4)), Point::new(18, 1));
        assert_eq!(layout.size_of(id(3)), Size::new(15, 7));
        assert_eq!(layout.location_of(id(3)), Point::new(3, 1));
    }

    #[test]
    fn test_preferred_size_composes_bands() {
        let layout = layout_with(&[(1, Slot::Top), (2, Slot::Left), (3, Slot::Center), (4, Slot::Bottom)]);
        let p = prefs(&[
            (id(1), Size::new(4, 1)),
            (id(2), Size::new(3, 5)),
            (id(3), Size::new(6, 2)),
            (id(4), Size::new(12, 2)),
        ]);
        assert_eq!(layout.preferred_size(&p), Size::new(12, 8));
    }

    #[test]
    fn test_component_order_and_displacement() {
        let mut layout = layout_with(&[(5, Slot::Center), (1, Slot::Top), (4, Slot::Left)]);
        assert_eq!(layout.components(), vec![id(1), id(4), id(5)]);

        let displaced = layout.add(id(9), Constraint::None).unwrap();
        assert_eq!(displaced, vec![id(5)]);
        assert_eq!(layout.get(Slot::Center), Some(id(9)));

        assert!(layout.remove(id(1)));
        assert!(!layout.remove(id(1)));
        assert_eq!(layout.remove_all(), vec![id(4), id(9)]);
        assert!(layout.components().is_empty());
    }

    #[test]
    fn test_rejects_cell_constraint() {
        let mut layout = BorderLayout::new();
        assert!(layout.add(id(1), Constraint::Cell { column: 0, row: 0 }).is_err());
    }

    #[test]
    fn test_spatial_queries() {
        let layout = layout_with(&[
            (1, Slot::Top),
            (2, Slot::Left),
            (3, Slot::Center),
            (4, Slot::Right),
            (5, Slot::Bottom),
        ]);
        assert_eq!(layout.left_of(id(4)), vec![id(3), id(2)]);
        assert_eq!(layout.left_of(id(3)), vec![id(2)]);
        assert!(layout.left_of(id(1)).is_empty());
        assert_eq!(layout.right_of(id(2)), vec![id(3), id(4)]);
        assert_eq!(layout.above(id(5)), vec![id(4), id(3), id(2), id(1)]);
        assert_eq!(layout.above(id(3)), vec![id(1)]);
        assert!(layout.above(id(1)).is_empty());
        assert_eq!(layout.below(id(1)), vec![id(2), id(3), id(4), id(5)]);
        assert_eq!(layout.ordered_ltr(), vec![id(2), id(1), id(3), id(5), id(4)]);
        assert_eq!(layout.ordered_ttb(), vec![id(1), id(2), id(3), id(4), id(5)]);
    }
}
