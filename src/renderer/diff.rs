//! Differential renderer.
//!
//! Keeps the frame last written to the terminal and, on flush, compares the
//! drawing buffer against it cell by cell. Only changed cells are emitted.
//!
//! # Algorithm
//!
//! 1. For each cell of the drawing buffer, in row-major order:
//!    - unchanged against the current frame: skip
//!    - otherwise: move the cursor (only if not sequential), switch colors
//!      (only if different from the last emitted pair), print the glyph
//! 2. Park the cursor at (0, 0) and flush the writer once
//! 3. Copy the drawing buffer into the current frame

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, SetBackgroundColor, SetForegroundColor};

use super::buffer::FrameBuffer;
use crate::types::{Cell, Color};

/// Renders a drawing buffer against the last flushed frame.
pub struct DiffRenderer {
    current: FrameBuffer,
    tracker: CellTracker,
    full_redraw: bool,
}

impl DiffRenderer {
    /// Current frame starts as blanks in the given colors.
    pub fn new(width: u16, height: u16, fg: Color, bg: Color) -> Self {
        Self {
            current: FrameBuffer::new(width, height, fg, bg),
            tracker: CellTracker::new(),
            full_redraw: false,
        }
    }

    /// Last frame written to the terminal.
    pub fn current(&self) -> &FrameBuffer {
        &self.current
    }

    pub fn width(&self) -> u16 {
        self.current.width()
    }

    pub fn height(&self) -> u16 {
        self.current.height()
    }

    /// Replace the current frame with blanks of a new size.
    ///
    /// The screen content is unknown after a resize, so the next flush
    /// rewrites every cell.
    pub fn resize(&mut self, width: u16, height: u16, fg: Color, bg: Color) {
        self.current = FrameBuffer::new(width, height, fg, bg);
        self.invalidate();
    }

    /// Forget what is on screen; the next flush rewrites every cell.
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
        self.tracker.reset();
    }

    /// Emit every cell of `drawing` that differs from the current frame.
    ///
    /// Returns the number of cells written. The drawing buffer must have the
    /// same size as the current frame.
    pub fn flush<W: Write>(&mut self, drawing: &FrameBuffer, out: &mut W) -> io::Result<usize> {
        if drawing.width() != self.current.width() || drawing.height() != self.current.height() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "drawing buffer is {}x{}, current frame is {}x{}",
                    drawing.width(),
                    drawing.height(),
                    self.current.width(),
                    self.current.height()
                ),
            ));
        }

        self.tracker.begin_frame();
        let full = std::mem::take(&mut self.full_redraw);
        let mut changed = 0;
        for ((x, y, cell), previous) in drawing.iter().zip(self.current.cells()) {
            if full || cell != previous {
                self.tracker.render_cell(out, x, y, cell)?;
                changed += 1;
            }
        }

        queue!(out, MoveTo(0, 0))?;
        out.flush()?;

        drawing
            .copy_to(&mut self.current)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

        tracing::trace!(changed, "frame flushed");
        Ok(changed)
    }
}

// =============================================================================
// CellTracker
// =============================================================================

/// Tracks emitted terminal state to skip redundant cursor moves and color
/// switches.
///
/// Colors persist across frames since the terminal keeps them; only the
/// cursor position is forgotten, because every flush parks it at (0, 0).
#[derive(Debug)]
struct CellTracker {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Color>,
    last_bg: Option<Color>,
}

impl CellTracker {
    fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn begin_frame(&mut self) {
        self.last_x = -1;
        self.last_y = -1;
    }

    fn render_cell<W: Write>(&mut self, out: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if y as i32 != self.last_y || x as i32 != self.last_x + 1 {
            queue!(out, MoveTo(x, y))?;
        }
        if self.last_fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(cell.fg.to_terminal()))?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(cell.bg.to_terminal()))?;
            self.last_bg = Some(cell.bg);
        }
        queue!(out, Print(cell.glyph))?;
        self.last_x = x as i32;
        self.last_y = y as i32;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
