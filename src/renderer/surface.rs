//! Drawing surface: a clipped, translatable view over one [`FrameBuffer`].
//!
//! The surface carries a translation offset and a clip extent. Components
//! always draw in their own coordinates; the paint traversal translates the
//! surface into each child's rectangle and back out again.
//!
//! Every primitive validates its rectangle against the current clip before it
//! touches the buffer. Out-of-clip drawing is a programmer error and fails
//! with [`Error::InvalidArgument`] instead of being silently cropped.

use crate::error::{Error, Result};
use crate::renderer::buffer::FrameBuffer;
use crate::types::{Color, Point, Rect, Size};

/// Glyph used by [`Surface::draw_line`].
pub const LINE_GLYPH: char = '█';

/// Clipped, translatable drawing API bound to one buffer.
pub struct Surface<'a> {
    buffer: &'a mut FrameBuffer,
    bounds: Size,
    offset: Point,
    clip: Size,
    color: Color,
}

impl<'a> Surface<'a> {
    /// A surface covering the whole buffer.
    pub fn new(buffer: &'a mut FrameBuffer) -> Self {
        let bounds = Size::new(buffer.width() as i32, buffer.height() as i32);
        Self {
            buffer,
            bounds,
            offset: Point::ORIGIN,
            clip: bounds,
            color: Color::Black,
        }
    }

    /// Current drawing color.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Extent of the current clip window.
    pub fn size(&self) -> Size {
        self.clip
    }

    /// Absolute translation of the current origin.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Read access to the underlying buffer.
    pub fn buffer(&self) -> &FrameBuffer {
        self.buffer
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Move the origin by (dx, dy) and change the clip extent by (dw, dh).
    ///
    /// Two shapes are accepted:
    /// - shrink into a child: `dx, dy >= 0` and `dw, dh <= 0`
    /// - expand back out: `dx, dy <= 0` and `dw, dh >= 0`
    ///
    /// A shrink must leave a positive extent inside the current clip; an
    /// expand must stay inside the original bounds.
    pub fn translate(&mut self, dx: i32, dy: i32, dw: i32, dh: i32) -> Result<()> {
        if dx == 0 && dy == 0 && dw == 0 && dh == 0 {
            return Ok(());
        }
        let clip = Size::new(self.clip.width + dw, self.clip.height + dh);
        let offset = Point::new(self.offset.x + dx, self.offset.y + dy);

        if dx >= 0 && dy >= 0 && dw <= 0 && dh <= 0 {
            if clip.width <= 0 {
                return Err(Error::invalid("remaining space on the x axis is <= 0"));
            }
            if clip.height <= 0 {
                return Err(Error::invalid("remaining space on the y axis is <= 0"));
            }
            if dx + dw > 0 {
                return Err(Error::invalid("translated area leaves the clip on the x axis"));
            }
            if dy + dh > 0 {
                return Err(Error::invalid("translated area leaves the clip on the y axis"));
            }
        } else if dx <= 0 && dy <= 0 && dw >= 0 && dh >= 0 {
            if offset.x < 0 || offset.x + clip.width > self.bounds.width {
                return Err(Error::invalid("outside of bounds on the x axis"));
            }
            if offset.y < 0 || offset.y + clip.height > self.bounds.height {
                return Err(Error::invalid("outside of bounds on the y axis"));
            }
        } else {
            return Err(Error::invalid(format!(
                "invalid translation ({dx}, {dy}, {dw}, {dh})"
            )));
        }

        self.offset = offset;
        self.clip = clip;
        Ok(())
    }

    /// Translate into a child rectangle given in current coordinates.
    pub fn enter(&mut self, child: Rect) -> Result<()> {
        let parent = self.clip;
        self.translate(
            child.x,
            child.y,
            child.width - parent.width,
            child.height - parent.height,
        )
    }

    /// Exact inverse of [`Self::enter`] for the same child and parent extent.
    pub fn leave(&mut self, child: Rect, parent: Size) -> Result<()> {
        self.translate(
            -child.x,
            -child.y,
            parent.width - child.width,
            parent.height - child.height,
        )
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn check(&self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        if x < 0 || y < 0 || width < 0 || height < 0 {
            return Err(Error::invalid(format!(
                "negative rectangle ({x}, {y}, {width}, {height})"
            )));
        }
        if x + width > self.clip.width {
            return Err(Error::invalid(format!(
                "width out of range ({x} + {width} > {})",
                self.clip.width
            )));
        }
        if y + height > self.clip.height {
            return Err(Error::invalid(format!(
                "height out of range ({y} + {height} > {})",
                self.clip.height
            )));
        }
        Ok(())
    }

    /// Absolute buffer coordinates of a validated local point.
    #[inline]
    fn absolute(&self, x: i32, y: i32) -> (u16, u16) {
        ((self.offset.x + x) as u16, (self.offset.y + y) as u16)
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Fill a rectangle with blanks in the current color as background.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        self.check(x, y, width, height)?;
        self.buffer.set_active_bg(self.color);
        for py in y..y + height {
            for px in x..x + width {
                let (ax, ay) = self.absolute(px, py);
                self.buffer.put(ax, ay, ' ');
            }
        }
        Ok(())
    }

    /// Fill a rectangle with a glyph in the current color, keeping backgrounds.
    pub fn fill_rect_with(
        &mut self,
        glyph: char,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<()> {
        self.check(x, y, width, height)?;
        self.buffer.set_active_fg(self.color);
        for py in y..y + height {
            for px in x..x + width {
                let (ax, ay) = self.absolute(px, py);
                self.stamp_keeping_bg(ax, ay, glyph);
            }
        }
        Ok(())
    }

    /// Set only the background of a rectangle.
    pub fn fill_background(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        self.check(x, y, width, height)?;
        for py in y..y + height {
            for px in x..x + width {
                let (ax, ay) = self.absolute(px, py);
                self.buffer.set_bg_at(ax, ay, self.color);
            }
        }
        Ok(())
    }

    /// Set only the foreground of a rectangle.
    pub fn fill_foreground(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        self.check(x, y, width, height)?;
        for py in y..y + height {
            for px in x..x + width {
                let (ax, ay) = self.absolute(px, py);
                self.buffer.set_fg_at(ax, ay, self.color);
            }
        }
        Ok(())
    }

    /// Draw a single line of text in the current color, keeping backgrounds.
    ///
    /// One cell per char.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<()> {
        let width = text.chars().count() as i32;
        self.check(x, y, width, 1)?;
        self.buffer.set_active_fg(self.color);
        for (i, ch) in text.chars().enumerate() {
            let (ax, ay) = self.absolute(x + i as i32, y);
            self.stamp_keeping_bg(ax, ay, ch);
        }
        Ok(())
    }

    /// Draw a line between two points (inclusive) in the current color.
    ///
    /// Rasterizes along the dominant axis so the line has no gaps. Identical
    /// endpoints draw nothing.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<()> {
        let (dx, dy) = ((x2 - x1).abs(), (y2 - y1).abs());
        self.check(x1.min(x2), y1.min(y2), dx + 1, dy + 1)?;
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        self.buffer.set_active_fg(self.color);
        if dx >= dy {
            for x in x1.min(x2)..=x1.max(x2) {
                let y = interpolate(x, x1, y1, x2, y2);
                let (ax, ay) = self.absolute(x, y);
                self.stamp_keeping_bg(ax, ay, LINE_GLYPH);
            }
        } else {
            for y in y1.min(y2)..=y1.max(y2) {
                let x = interpolate(y, y1, x1, y2, x2);
                let (ax, ay) = self.absolute(x, y);
                self.stamp_keeping_bg(ax, ay, LINE_GLYPH);
            }
        }
        Ok(())
    }

    fn stamp_keeping_bg(&mut self, x: u16, y: u16, glyph: char) {
        if let Some(bg) = self.buffer.bg_at(x, y) {
            self.buffer.set_active_bg(bg);
            self.buffer.put(x, y, glyph);
        }
    }
}

/// Value on the line through (a1, b1)-(a2, b2) at `a`, rounded down.
///
/// Slope/intercept in exact integer arithmetic: `b1 + (a - a1) * m`.
/// Requires `a1 != a2`.
fn interpolate(a: i32, a1: i32, b1: i32, a2: i32, b2: i32) -> i32 {
    let mut num = b1 as i64 * (a2 - a1) as i64 + (a - a1) as i64 * (b2 - b1) as i64;
    let mut den = (a2 - a1) as i64;
    if den < 0 {
        num = -num;
        den = -den;
    }
    num.div_euclid(den) as i32
}

// =============================================================================
// Tests
// =============================================================================
