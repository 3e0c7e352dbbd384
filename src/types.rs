//! Core types for console-ui.
//!
//! Geometry, the fixed color palette and the cell that the renderer deals in.
//! Everything else in the crate builds on these.

use crossterm::style::Color as TermColor;

// =============================================================================
// Geometry
// =============================================================================

/// A width/height pair in terminal cells.
///
/// Signed on purpose: layout arithmetic can produce zero or negative extents
/// for components that do not fit, and those are skipped during paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along an axis.
    #[inline]
    pub const fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// True when either extent is zero or negative.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A position in terminal cells, relative to some origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by another.
    #[inline]
    pub const fn offset(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// A rectangle: location plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn from_parts(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    pub const fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

impl Axis {
    /// The other axis.
    pub const fn cross(&self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

// =============================================================================
// Color
// =============================================================================

/// The fixed 16-entry console palette.
///
/// Names follow the classic console palette: the "dark" half is listed first,
/// then the bright half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black = 0,
    Blue = 1,
    Green = 2,
    DarkCyan = 3,
    Red = 4,
    Purple = 5,
    Brown = 6,
    LightGray = 7,
    Gray = 8,
    LightBlue = 9,
    Lime = 10,
    Cyan = 11,
    Pink = 12,
    Magenta = 13,
    Yellow = 14,
    White = 15,
}

impl Color {
    /// All palette entries in index order.
    pub const ALL: [Color; 16] = [
        Self::Black,
        Self::Blue,
        Self::Green,
        Self::DarkCyan,
        Self::Red,
        Self::Purple,
        Self::Brown,
        Self::LightGray,
        Self::Gray,
        Self::LightBlue,
        Self::Lime,
        Self::Cyan,
        Self::Pink,
        Self::Magenta,
        Self::Yellow,
        Self::White,
    ];

    /// Palette index (0-15).
    #[inline]
    pub const fn index(&self) -> u8 {
        *self as u8
    }

    /// The terminal color this palette entry is written as.
    pub const fn to_terminal(&self) -> TermColor {
        match self {
            Self::Black => TermColor::Black,
            Self::Blue => TermColor::DarkBlue,
            Self::Green => TermColor::DarkGreen,
            Self::DarkCyan => TermColor::DarkCyan,
            Self::Red => TermColor::DarkRed,
            Self::Purple => TermColor::DarkMagenta,
            Self::Brown => TermColor::DarkYellow,
            Self::LightGray => TermColor::Grey,
            Self::Gray => TermColor::DarkGrey,
            Self::LightBlue => TermColor::Blue,
            Self::Lime => TermColor::Green,
            Self::Cyan => TermColor::Cyan,
            Self::Pink => TermColor::Red,
            Self::Magenta => TermColor::Magenta,
            Self::Yellow => TermColor::Yellow,
            Self::White => TermColor::White,
        }
    }
}

/// A component's color preference.
///
/// `Inherit` means "use the renderer default"; it is deliberately a separate
/// case rather than an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ColorChoice {
    #[default]
    Inherit,
    Explicit(Color),
}

impl ColorChoice {
    /// Resolve against a default.
    #[inline]
    pub const fn or(self, default: Color) -> Color {
        match self {
            Self::Inherit => default,
            Self::Explicit(color) => color,
        }
    }

    pub const fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        Self::Explicit(color)
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
///
/// This is what the renderer deals with. Nothing more complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const fn new(glyph: char, fg: Color, bg: Color) -> Self {
        Self { glyph, fg, bg }
    }

    /// A blank cell in the given colors.
    pub const fn blank(fg: Color, bg: Color) -> Self {
        Self::new(' ', fg, bg)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Color::White, Color::Black)
    }
}

// =============================================================================
// Tests
// =============================================================================
