//! FrameBuffer: the render buffer.
//!
//! A 2D grid of Cells that represents what should be displayed on the
//! terminal. Two of them exist while the window is alive: the one being
//! painted and the one last flushed.
//!
//! Writes go through [`FrameBuffer::put`], which always stamps the currently
//! active color pair onto the cell.

use crate::error::{Error, Result};
use crate::types::{Cell, Color};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    active_fg: Color,
    active_bg: Color,
}

impl FrameBuffer {
    /// Create a buffer of blank cells in the given colors.
    pub fn new(width: u16, height: u16, fg: Color, bg: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::blank(fg, bg); size],
            active_fg: fg,
            active_bg: bg,
        }
    }

    /// Get buffer width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) to flat index.
    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get raw cells slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % self.width as usize) as u16;
            let y = (i / self.width as usize) as u16;
            (x, y, cell)
        })
    }

    // =========================================================================
    // Active colors
    // =========================================================================

    #[inline]
    pub fn active_fg(&self) -> Color {
        self.active_fg
    }

    #[inline]
    pub fn active_bg(&self) -> Color {
        self.active_bg
    }

    #[inline]
    pub fn set_active_fg(&mut self, color: Color) {
        self.active_fg = color;
    }

    #[inline]
    pub fn set_active_bg(&mut self, color: Color) {
        self.active_bg = color;
    }

    // =========================================================================
    // Cell writes
    // =========================================================================

    /// Write a glyph, stamping the active color pair.
    ///
    /// Returns false if out of bounds.
    pub fn put(&mut self, x: u16, y: u16, glyph: char) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = Cell::new(glyph, self.active_fg, self.active_bg);
        true
    }

    /// Overwrite only the background of a cell.
    pub fn set_bg_at(&mut self, x: u16, y: u16, color: Color) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx].bg = color;
        true
    }

    /// Overwrite only the foreground of a cell.
    pub fn set_fg_at(&mut self, x: u16, y: u16, color: Color) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx].fg = color;
        true
    }

    /// Background at (x, y), if in bounds.
    pub fn bg_at(&self, x: u16, y: u16) -> Option<Color> {
        self.get(x, y).map(|c| c.bg)
    }

    /// Foreground at (x, y), if in bounds.
    pub fn fg_at(&self, x: u16, y: u16) -> Option<Color> {
        self.get(x, y).map(|c| c.fg)
    }

    /// Reset every cell to a blank in the given colors.
    pub fn clear(&mut self, fg: Color, bg: Color) {
        self.cells.fill(Cell::blank(fg, bg));
    }

    /// Copy every cell into `target`. Sizes must match.
    pub fn copy_to(&self, target: &mut FrameBuffer) -> Result<()> {
        if target.width != self.width || target.height != self.height {
            return Err(Error::invalid(format!(
                "buffer sizes don't match ({}x{} vs {}x{})",
                self.width, self.height, target.width, target.height
            )));
        }
        target.cells.copy_from_slice(&self.cells);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_creation() {
        let buffer = FrameBuffer::new(80, 24, Color::White, Color::Black);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
        assert_eq!(buffer.get(79, 23), Some(&Cell::blank(Color::White, Color::Black)));
        assert_eq!(buffer.get(80, 0), None);
    }

    #[test]
    fn test_put_stamps_active_pair() {
        let mut buffer = FrameBuffer::new(10, 10, Color::White, Color::Black);
        buffer.set_active_fg(Color::Red);
        buffer.set_active_bg(Color::Blue);
        assert!(buffer.put(5, 5, 'X'));

        let cell = buffer.get(5, 5).unwrap();
        assert_eq!(cell.glyph, 'X');
        assert_eq!(cell.fg, Color::Red);
        assert_eq!(cell.bg, Color::Blue);
        assert!(!buffer.put(10, 5, 'Y'));
    }

    #[test]
    fn test_single_channel_writes() {
        let mut buffer = FrameBuffer::new(4, 4, Color::White, Color::Black);
        buffer.set_bg_at(1, 1, Color::Green);
        buffer.set_fg_at(2, 2, Color::Yellow);
        assert_eq!(buffer.bg_at(1, 1), Some(Color::Green));
        assert_eq!(buffer.fg_at(1, 1), Some(Color::White));
        assert_eq!(buffer.fg_at(2, 2), Some(Color::Yellow));
        assert_eq!(buffer.get(2, 2).unwrap().glyph, ' ');
    }

    #[test]
    fn test_copy_to_requires_equal_sizes() {
        let mut source = FrameBuffer::new(3, 3, Color::White, Color::Black);
        source.put(0, 0, 'A');
        let mut same = FrameBuffer::new(3, 3, Color::White, Color::Black);
        source.copy_to(&mut same).unwrap();
        assert_eq!(same.get(0, 0).unwrap().glyph, 'A');

        let mut other = FrameBuffer::new(4, 3, Color::White, Color::Black);
        assert!(matches!(source.copy_to(&mut other), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_iter_coordinates() {
        let buffer = FrameBuffer::new(3, 2, Color::White, Color::Black);
        let coords: Vec<(u16, u16)> = buffer.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
