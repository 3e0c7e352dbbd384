//! Stack layout: children one after another along an axis.
//!
//! Each child gets its preferred extent along the axis while the total fits.
//! On overflow the budget is handed out in order: earlier children keep their
//! preference, the child that crosses the budget gets what is left, and every
//! later child gets zero. The cross axis always gets the full extent.

use super::PreferredSizeFn;
use crate::component::ComponentId;
use crate::types::{Axis, Point, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    axis: Axis,
    children: Vec<ComponentId>,
    lengths: Vec<i32>,
    area: Size,
    valid: bool,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::new(Axis::Vertical)
    }
}

impl StackLayout {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            children: Vec::new(),
            lengths: Vec::new(),
            area: Size::ZERO,
            valid: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
        self.invalidate();
    }

    fn index_of(&self, child: ComponentId) -> Option<usize> {
        self.children.iter().position(|c| *c == child)
    }

    pub(crate) fn add(&mut self, child: ComponentId) {
        self.children.push(child);
        self.invalidate();
    }

    pub(crate) fn remove(&mut self, child: ComponentId) -> bool {
        match self.index_of(child) {
            Some(index) => {
                self.children.remove(index);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_all(&mut self) -> Vec<ComponentId> {
        self.invalidate();
        std::mem::take(&mut self.children)
    }

    pub fn components(&self) -> Vec<ComponentId> {
        self.children.clone()
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn validate(&mut self, area: Size, preferred: PreferredSizeFn<'_>) {
        let mut remaining = area.along(self.axis).max(0);
        self.lengths = self
            .children
            .iter()
            .map(|c| {
                let wanted = preferred(*c).along(self.axis).max(0);
                let given = wanted.min(remaining);
                remaining -= given;
                given
            })
            .collect();
        self.area = area;
        self.valid = true;
    }

    /// Sum along the axis, maximum across it.
    pub fn preferred_size(&self, preferred: PreferredSizeFn<'_>) -> Size {
        let (sum, max) = self.children.iter().fold((0, 0), |(sum, max), c| {
            let p = preferred(*c);
            (sum + p.along(self.axis), max.max(p.along(self.axis.cross())))
        });
        match self.axis {
            Axis::Horizontal => Size::new(sum, max),
            Axis::Vertical => Size::new(max, sum),
        }
    }

    pub fn size_of(&self, child: ComponentId) -> Size {
        let length = self
            .index_of(child)
            .and_then(|i| self.lengths.get(i).copied())
            .unwrap_or(0);
        match self.axis {
            Axis::Horizontal => Size::new(length, self.area.height),
            Axis::Vertical => Size::new(self.area.width, length),
        }
    }

    pub fn location_of(&self, child: ComponentId) -> Point {
        let offset: i32 = match self.index_of(child) {
            Some(index) => self.lengths.iter().take(index).sum(),
            None => 0,
        };
        match self.axis {
            Axis::Horizontal => Point::new(offset, 0),
            Axis::Vertical => Point::new(0, offset),
        }
    }

    // =========================================================================
    // Spatial queries
    // =========================================================================

    fn before(&self, child: ComponentId, axis: Axis) -> Vec<ComponentId> {
        match self.index_of(child) {
            Some(index) if axis == self.axis => self.children[..index].iter().rev().copied().collect(),
            _ => Vec::new(),
        }
    }

    fn after(&self, child: ComponentId, axis: Axis) -> Vec<ComponentId> {
        match self.index_of(child) {
            Some(index) if axis == self.axis => self.children[index + 1..].to_vec(),
            _ => Vec::new(),
        }
    }

    pub fn left_of(&self, child: ComponentId) -> Vec<ComponentId> {
        self.before(child, Axis::Horizontal)
    }

    pub fn right_of(&self, child: ComponentId) -> Vec<ComponentId> {
        self.after(child, Axis::Horizontal)
    }

    pub fn above(&self, child: ComponentId) -> Vec<ComponentId> {
        self.before(child, Axis::Vertical)
    }

    pub fn below(&self, child: ComponentId) -> Vec<ComponentId> {
        self.after(child, Axis::Vertical)
    }

    pub fn ordered_ltr(&self) -> Vec<ComponentId> {
        self.components()
    }

    pub fn ordered_ttb(&self) -> Vec<ComponentId> {
        self.components()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use pretty_assertions::assert_eq;

    fn stack(axis: Axis, n: u32) -> StackLayout {
        let mut layout = StackLayout::new(axis);
        for i in 0..n {
            layout.add(id(i));
        }
        layout
    }

    #[test]
    fn test_truncation_is_first_come_first_served() {
        let mut layout = stack(Axis::Vertical, 3);
        let p = prefs(&[
            (id(0), Size::new(2, 5)),
            (id(1), Size::new(2, 5)),
            (id(2), Size::new(2, 5)),
        ]);
        layout.validate(Size::new(10, 8), &p);

        let heights: Vec<i32> = (0..3).map(|i| layout.size_of(id(i)).height).collect();
        assert_eq!(heights, vec![5, 3, 0]);
        let ys: Vec<i32> = (0..3).map(|i| layout.location_of(id(i)).y).collect();
        assert_eq!(ys, vec![0, 5, 8]);
        assert_eq!(layout.size_of(id(1)).width, 10);
    }

    #[test]
    fn test_fits_gives_preferences() {
        let mut layout = stack(Axis::Horizontal, 2);
        let p = prefs(&[(id(0), Size::new(3, 1)), (id(1), Size::new(4, 9))]);
        layout.validate(Size::new(20, 2), &p);
        assert_eq!(layout.size_of(id(0)), Size::new(3, 2));
        assert_eq!(layout.size_of(id(1)), Size::new(4, 2));
        assert_eq!(layout.location_of(id(1)), Point::new(3, 0));
    }

    #[test]
    fn test_preferred_size() {
        let layout = stack(Axis::Vertical, 2);
        let p = prefs(&[(id(0), Size::new(3, 1)), (id(1), Size::new(7, 2))]);
        assert_eq!(layout.preferred_size(&p), Size::new(7, 3));
    }

    #[test]
    fn test_spatial_queries_follow_axis() {
        let layout = stack(Axis::Vertical, 4);
        assert_eq!(layout.above(id(2)), vec![id(1), id(0)]);
        assert_eq!(layout.below(id(2)), vec![id(3)]);
        assert!(layout.left_of(id(2)).is_empty());
        assert!(layout.right_of(id(2)).is_empty());

        let layout = stack(Axis::Horizontal, 3);
        assert_eq!(layout.left_of(id(2)), vec![id(1), id(0)]);
        assert!(layout.above(id(2)).is_empty());
    }

    #[test]
    fn test_remove_shifts_followers() {
        let mut layout = stack(Axis::Vertical, 3);
        assert!(layout.remove(id(0)));
        assert_eq!(layout.components(), vec![id(1), id(2)]);
        assert_eq!(layout.remove_all(), vec![id(1), id(2)]);
        assert!(!layout.remove(id(1)));
    }
}
