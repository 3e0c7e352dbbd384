//! Grid layout: fixed rows × columns of equally sized cells.
//!
//! Children live in a 1-D slot list. When the column count is fixed the list
//! is row-major; when only the row count is fixed (`cols == 0`) it is
//! column-major and the column count follows from the number of slots.
//!
//! Cell size is the available extent divided by the cell count, minus the
//! gap. The integer remainder is spread one cell at a time starting from
//! index 0, so leading cells may be one larger than the rest.

use super::{Constraint, PreferredSizeFn};
use crate::component::ComponentId;
use crate::error::{Error, Result};
use crate::types::{Point, Size};

/// Upper bound on slot indices reachable through a cell constraint.
const MAX_SLOTS: usize = 1 << 16;

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    rows: i32,
    cols: i32,
    hgap: i32,
    vgap: i32,
    slots: Vec<Option<ComponentId>>,
    cell_width: i32,
    cell_height: i32,
    extra_width: i32,
    extra_height: i32,
    valid: bool,
}

impl GridLayout {
    /// Grid without gaps. One dimension may be zero, not both.
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        Self::with_gaps(rows, cols, 0, 0)
    }

    /// Grid with horizontal and vertical gaps between cells.
    pub fn with_gaps(rows: i32, cols: i32, hgap: i32, vgap: i32) -> Result<Self> {
        if rows < 0 || cols < 0 || hgap < 0 || vgap < 0 {
            return Err(Error::invalid(
                "row and column counts and gap sizes must not be negative",
            ));
        }
        if rows == 0 && cols == 0 {
            return Err(Error::invalid("rows and columns may not both be zero"));
        }
        Ok(Self {
            rows,
            cols,
            hgap,
            vgap,
            slots: Vec::new(),
            cell_width: 0,
            cell_height: 0,
            extra_width: 0,
            extra_height: 0,
            valid: false,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn gaps(&self) -> (i32, i32) {
        (self.hgap, self.vgap)
    }

    /// Effective (rows, cols) given the current slot count.
    fn dimensions(&self) -> (i32, i32) {
        let n = self.slots.len() as i32;
        if self.cols == 0 {
            (self.rows, ceil_div(n, self.rows))
        } else if self.rows == 0 {
            (ceil_div(n, self.cols), self.cols)
        } else {
            (self.rows, self.cols)
        }
    }

    /// Cell (column, row) of a slot index.
    fn cell_at(&self, index: usize) -> Point {
        let i = index as i32;
        if self.cols == 0 {
            Point::new(i / self.rows, i % self.rows)
        } else {
            Point::new(i % self.cols, i / self.cols)
        }
    }

    /// Slot index of a cell, `None` past [`MAX_SLOTS`].
    fn index_of_cell(&self, column: i32, row: i32) -> Option<usize> {
        let index = if self.cols == 0 {
            column.checked_mul(self.rows)?.checked_add(row)?
        } else {
            row.checked_mul(self.cols)?.checked_add(column)?
        };
        usize::try_from(index).ok().filter(|i| *i < MAX_SLOTS)
    }

    fn index_of(&self, child: ComponentId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(child))
    }

    /// Slots in index order with their cells.
    fn occupied(&self) -> impl Iterator<Item = (Point, ComponentId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|c| (self.cell_at(i), c)))
    }

    fn is_full(&self) -> bool {
        let capacity = self.rows * self.cols;
        capacity != 0
            && self.slots.len() as i32 >= capacity
            && self.slots.iter().all(Option::is_some)
    }

    pub(crate) fn check(&self, constraint: Constraint) -> Result<()> {
        match constraint {
            Constraint::None => {
                if self.is_full() {
                    return Err(Error::invalid(
                        "the grid is already full; can not add any more components",
                    ));
                }
                Ok(())
            }
            Constraint::Cell { column, row } => {
                if column < 0 || (self.cols != 0 && column >= self.cols) {
                    return Err(Error::invalid(format!("column {column} out of bounds")));
                }
                if row < 0 || (self.rows != 0 && row >= self.rows) {
                    return Err(Error::invalid(format!("row {row} out of bounds")));
                }
                if self.index_of_cell(column, row).is_none() {
                    return Err(Error::invalid(format!(
                        "cell ({column}, {row}) is beyond the grid's capacity"
                    )));
                }
                Ok(())
            }
            other => Err(Error::invalid(format!(
                "grid layout takes a cell, got {other:?}"
            ))),
        }
    }

    pub(crate) fn add(&mut self, child: ComponentId, constraint: Constraint) -> Result<Vec<ComponentId>> {
        self.check(constraint)?;
        let displaced = match constraint {
            Constraint::Cell { column, row } => {
                let index = self
                    .index_of_cell(column, row)
                    .ok_or_else(|| Error::invalid(format!("cell ({column}, {row}) out of range")))?;
                if self.slots.len() <= index {
                    self.slots.resize(index + 1, None);
                }
                self.slots[index].replace(child).filter(|old| *old != child)
            }
            _ => {
                match self.slots.iter().position(Option::is_none) {
                    Some(free) => self.slots[free] = Some(child),
                    None => self.slots.push(Some(child)),
                }
                None
            }
        };
        self.invalidate();
        Ok(displaced.into_iter().collect())
    }

    /// Empty the child's slot; later slots keep their cells.
    pub(crate) fn remove(&mut self, child: ComponentId) -> bool {
        match self.index_of(child) {
            Some(index) => {
                self.slots[index] = None;
                self.invalidate();
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_all(&mut self) -> Vec<ComponentId> {
        let removed = self.components();
        self.slots.clear();
        self.invalidate();
        removed
    }

    /// Children in slot order.
    pub fn components(&self) -> Vec<ComponentId> {
        self.slots.iter().flatten().copied().collect()
    }

    /// Cell (column, row) holding `child`.
    pub fn grid_location_of(&self, child: ComponentId) -> Option<Point> {
        self.index_of(child).map(|i| self.cell_at(i))
    }

    /// Children in row `index`, left to right.
    pub fn row(&self, index: i32) -> Vec<ComponentId> {
        self.occupied()
            .filter(|(cell, _)| cell.y == index)
            .map(|(_, c)| c)
            .collect()
    }

    /// Children in column `index`, top to bottom.
    pub fn column(&self, index: i32) -> Vec<ComponentId> {
        let mut column: Vec<(Point, ComponentId)> =
            self.occupied().filter(|(cell, _)| cell.x == index).collect();
        column.sort_by_key(|(cell, _)| cell.y);
        column.into_iter().map(|(_, c)| c).collect()
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn validate(&mut self, area: Size, _preferred: PreferredSizeFn<'_>) {
        let (rows, cols) = self.dimensions();
        (self.cell_width, self.extra_width) = distribute(area.width.max(0), cols, self.hgap);
        (self.cell_height, self.extra_height) = distribute(area.height.max(0), rows, self.vgap);
        self.valid = true;
    }

    /// Largest child preference times the cell count, plus gaps.
    pub fn preferred_size(&self, preferred: PreferredSizeFn<'_>) -> Size {
        let (rows, cols) = self.dimensions();
        if rows == 0 || cols == 0 {
            return Size::ZERO;
        }
        let max = self
            .slots
            .iter()
            .flatten()
            .map(|c| preferred(*c))
            .fold(Size::ZERO, |acc, s| {
                Size::new(acc.width.max(s.width), acc.height.max(s.height))
            });
        Size::new(
            max.width * cols + self.hgap * (cols - 1),
            max.height * rows + self.vgap * (rows - 1),
        )
    }

    pub fn size_of(&self, child: ComponentId) -> Size {
        match self.grid_location_of(child) {
            Some(cell) => Size::new(
                self.cell_width + i32::from(cell.x < self.extra_width),
                self.cell_height + i32::from(cell.y < self.extra_height),
            ),
            None => Size::ZERO,
        }
    }

    pub fn location_of(&self, child: ComponentId) -> Point {
        match self.grid_location_of(child) {
            Some(cell) => Point::new(
                cell.x * (self.cell_width + self.hgap) + self.extra_width.min(cell.x),
                cell.y * (self.cell_height + self.vgap) + self.extra_height.min(cell.y),
            ),
            None => Point::ORIGIN,
        }
    }

    // =========================================================================
    // Spatial queries
    // =========================================================================

    /// Children from the given columns/rows, nearest cell first.
    ///
    /// The sort is stable, so equally distant cells keep the collection order.
    fn nearest_first(&self, origin: Point, mut found: Vec<(Point, ComponentId)>) -> Vec<ComponentId> {
        found.sort_by_key(|(cell, _)| {
            let (dx, dy) = (cell.x - origin.x, cell.y - origin.y);
            dx * dx + dy * dy
        });
        found.into_iter().map(|(_, c)| c).collect()
    }

    fn collect_columns(&self, columns: impl Iterator<Item = i32>) -> Vec<(Point, ComponentId)> {
        let mut found = Vec::new();
        for x in columns {
            let mut column: Vec<_> = self.occupied().filter(|(cell, _)| cell.x == x).collect();
            column.sort_by_key(|(cell, _)| cell.y);
            found.extend(column);
        }
        found
    }

    fn collect_rows(&self, rows: impl Iterator<Item = i32>) -> Vec<(Point, ComponentId)> {
        let mut found = Vec::new();
        for y in rows {
            let mut row: Vec<_> = self.occupied().filter(|(cell, _)| cell.y == y).collect();
            row.sort_by_key(|(cell, _)| cell.x);
            found.extend(row);
        }
        found
    }

    pub fn left_of(&self, child: ComponentId) -> Vec<ComponentId> {
        let Some(origin) = self.grid_location_of(child) else {
            return Vec::new();
        };
        let found = self.collect_columns((0..origin.x).rev());
        self.nearest_first(origin, found)
    }

    pub fn right_of(&self, child: ComponentId) -> Vec<ComponentId> {
        let Some(origin) = self.grid_location_of(child) else {
            return Vec::new();
        };
        let (_, cols) = self.dimensions();
        let found = self.collect_columns(origin.x + 1..cols);
        self.nearest_first(origin, found)
    }

    pub fn above(&self, child: ComponentId) -> Vec<ComponentId> {
        let Some(origin) = self.grid_location_of(child) else {
            return Vec::new();
        };
        let found = self.collect_rows((0..origin.y).rev());
        self.nearest_first(origin, found)
    }

    pub fn below(&self, child: ComponentId) -> Vec<ComponentId> {
        let Some(origin) = self.grid_location_of(child) else {
            return Vec::new();
        };
        let (rows, _) = self.dimensions();
        let found = self.collect_rows(origin.y + 1..rows);
        self.nearest_first(origin, found)
    }

    /// Column by column, each top to bottom.
    pub fn ordered_ltr(&self) -> Vec<ComponentId> {
        let (_, cols) = self.dimensions();
        self.collect_columns(0..cols).into_iter().map(|(_, c)| c).collect()
    }

    /// Row by row, each left to right.
    pub fn ordered_ttb(&self) -> Vec<ComponentId> {
        let (rows, _) = self.dimensions();
        self.collect_rows(0..rows).into_iter().map(|(_, c)| c).collect()
    }
}

fn ceil_div(n: i32, d: i32) -> i32 {
    (n + d - 1) / d
}

/// Per-cell extent and remainder for `count` cells over `available`.
///
/// Gaps come out of each cell; whatever the gaps leave over is folded back
/// into whole cells before becoming remainder.
fn distribute(available: i32, count: i32, gap: i32) -> (i32, i32) {
    if count <= 0 {
        return (0, 0);
    }
    let mut cell = available / count;
    let mut extra = available - cell * count;
    cell -= gap;
    extra += gap;
    while extra >= count {
        cell += 1;
        extra -= count;
    }
    (cell, extra)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled(rows: i32, cols: i32, n: u32) -> GridLayout {
        let mut grid = GridLayout::new(rows, cols).unwrap();
        for i in 0..n {
            grid.add(id(i), Constraint::None).unwrap();
        }
        grid
    }

    #[test]
    fn test_construction_rejects_bad_dimensions() {
        assert!(GridLayout::new(0, 0).is_err());
        assert!(GridLayout::new(-1, 2).is_err());
        assert!(GridLayout::with_gaps(2, 2, -1, 0).is_err());
        assert!(GridLayout::new(0, 3).is_ok());
    }

    #[test]
    fn test_remainder_goes_to_leading_cells() {
        let mut grid = filled(3, 3, 9);
        grid.validate(Size::new(10, 10), &|_| Size::ZERO);

        let widths: Vec<i32> = (0..3).map(|i| grid.size_of(id(i)).width).collect();
        let heights: Vec<i32> = (0..3).map(|i| grid.size_of(id(i * 3)).height).collect();
        assert_eq!(widths, vec![4, 3, 3]);
        assert_eq!(heights, vec![4, 3, 3]);

        let xs: Vec<i32> = (0..3).map(|i| grid.location_of(id(i)).x).collect();
        assert_eq!(xs, vec![0, 4, 7]);
    }

    #[test]
    fn test_gaps_fold_into_cells() {
        let mut grid = GridLayout::with_gaps(1, 2, 1, 0).unwrap();
        grid.add(id(0), Constraint::None).unwrap();
        grid.add(id(1), Constraint::None).unwrap();
        grid.validate(Size::new(10, 3), &|_| Size::ZERO);

        assert_eq!(grid.size_of(id(0)), Size::new(5, 3));
        assert_eq!(grid.size_of(id(1)), Size::new(4, 3));
        assert_eq!(grid.location_of(id(1)), Point::new(6, 0));
    }

    #[test]
    fn test_column_major_when_cols_are_free() {
        let grid = filled(2, 0, 5);
        assert_eq!(grid.grid_location_of(id(0)), Some(Point::new(0, 0)));
        assert_eq!(grid.grid_location_of(id(1)), Some(Point::new(0, 1)));
        assert_eq!(grid.grid_location_of(id(2)), Some(Point::new(1, 0)));
        assert_eq!(grid.grid_location_of(id(4)), Some(Point::new(2, 0)));
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.row(0), vec![id(0), id(2), id(4)]);
        assert_eq!(grid.column(1), vec![id(2), id(3)]);
    }

    #[test]
    fn test_constrained_add_grows_with_gaps_and_overwrites() {
        let mut grid = GridLayout::new(0, 3).unwrap();
        grid.add(id(1), Constraint::Cell { column: 2, row: 1 }).unwrap();
        assert_eq!(grid.slots.len(), 6);
        assert_eq!(grid.grid_location_of(id(1)), Some(Point::new(2, 1)));

        let displaced = grid.add(id(2), Constraint::Cell { column: 2, row: 1 }).unwrap();
        assert_eq!(displaced, vec![id(1)]);

        grid.add(id(3), Constraint::None).unwrap();
        assert_eq!(grid.grid_location_of(id(3)), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_out_of_range_and_full() {
        let mut grid = filled(2, 2, 4);
        assert!(grid.add(id(9), Constraint::Cell { column: 2, row: 0 }).is_err());
        assert!(grid.add(id(9), Constraint::Cell { column: 0, row: 2 }).is_err());
        assert!(grid.add(id(9), Constraint::Cell { column: -1, row: 0 }).is_err());
        assert!(grid.add(id(9), Constraint::None).is_err());

        grid.remove(id(1));
        grid.add(id(9), Constraint::None).unwrap();
        assert_eq!(grid.grid_location_of(id(9)), Some(Point::new(1, 0)));
    }

    #[test]
    fn test_huge_cell_on_free_axis_is_rejected() {
        let mut by_rows = GridLayout::new(2, 0).unwrap();
        assert!(by_rows.add(id(0), Constraint::Cell { column: i32::MAX, row: 1 }).is_err());
        assert!(by_rows.add(id(0), Constraint::Cell { column: 40_000, row: 0 }).is_err());

        let mut by_cols = GridLayout::new(0, 3).unwrap();
        assert!(by_cols.add(id(0), Constraint::Cell { column: 2, row: i32::MAX }).is_err());
        assert!(by_cols.components().is_empty());

        by_rows.add(id(1), Constraint::Cell { column: 5, row: 1 }).unwrap();
        assert_eq!(by_rows.grid_location_of(id(1)), Some(Point::new(5, 1)));
    }

    #[test]
    fn test_remove_keeps_other_cells() {
        let mut grid = filled(0, 2, 4);
        assert!(grid.remove(id(0)));
        assert_eq!(grid.grid_location_of(id(3)), Some(Point::new(1, 1)));
        assert_eq!(grid.components(), vec![id(1), id(2), id(3)]);
        assert_eq!(grid.remove_all(), vec![id(1), id(2), id(3)]);
        assert!(grid.components().is_empty());
    }

    #[test]
    fn test_preferred_size_uses_largest_child() {
        let mut grid = GridLayout::with_gaps(2, 2, 1, 2).unwrap();
        grid.add(id(0), Constraint::None).unwrap();
        grid.add(id(1), Constraint::None).unwrap();
        grid.add(id(2), Constraint::None).unwrap();
        let p = prefs(&[(id(0), Size::new(3, 1)), (id(2), Size::new(1, 4))]);
        assert_eq!(grid.preferred_size(&p), Size::new(7, 10));
    }

    #[test]
    fn test_empty_grid_validates_to_nothing() {
        let mut grid = GridLayout::new(0, 4).unwrap();
        grid.validate(Size::new(10, 10), &|_| Size::ZERO);
        assert!(grid.is_valid());
        assert_eq!(grid.preferred_size(&|_| Size::new(5, 5)), Size::ZERO);
    }

    #[test]
    fn test_spatial_queries_nearest_first() {
        // 3x3, ids 0..9 row-major
        let grid = filled(3, 3, 9);
        assert_eq!(grid.above(id(7)), vec![id(4), id(3), id(5), id(1), id(0), id(2)]);
        assert_eq!(grid.below(id(1)), vec![id(4), id(3), id(5), id(7), id(6), id(8)]);
        assert_eq!(grid.left_of(id(5)), vec![id(4), id(1), id(7), id(3), id(0), id(6)]);
        assert_eq!(grid.right_of(id(3)), vec![id(4), id(1), id(7), id(5), id(2), id(8)]);
        assert!(grid.left_of(id(0)).is_empty());
        assert!(grid.below(id(8)).is_empty());
    }

    #[test]
    fn test_orderings() {
        let grid = filled(2, 2, 4);
        assert_eq!(grid.ordered_ttb(), vec![id(0), id(1), id(2), id(3)]);
        assert_eq!(grid.ordered_ltr(), vec![id(0), id(2), id(1), id(3)]);
    }
}
