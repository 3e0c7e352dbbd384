//! Terminal renderer: the cell-level output layer.
//!
//! The renderer knows only about cells. It doesn't understand components or
//! layout. Components paint into a drawing [`FrameBuffer`] through a
//! [`Surface`]; the [`DiffRenderer`] then writes the cells that differ from
//! the last flushed frame.

pub mod buffer;
pub mod diff;
pub mod surface;
pub mod terminal;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use surface::{Surface, LINE_GLYPH};
pub use terminal::TerminalSetup;
