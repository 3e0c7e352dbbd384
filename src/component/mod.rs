//! Component model.
//!
//! A component is a node in the UI tree. It never computes its own geometry:
//! its rectangle comes from the layout manager of its parent, and its own
//! layout manager (if any) arranges its children.
//!
//! Concrete widgets implement [`Component`], a small capability trait. The
//! tree itself, with parent links, layouts, colors and listener tables, lives
//! in the [`Tree`] arena and is addressed by [`ComponentId`].

mod tree;

pub use tree::{PaintDefaults, Tree};

use std::any::Any;

use crate::error::Result;
use crate::layout::LayoutManager;
use crate::renderer::Surface;
use crate::types::{Color, Size};

// =============================================================================
// ComponentId
// =============================================================================

/// Handle to a node in the [`Tree`].
///
/// Generational: a handle to a destroyed component stays dead even after its
/// slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    index: u32,
    generation: u32,
}

impl ComponentId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }

    /// Packed form, for lock-free snapshots.
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self::new(bits as u32, (bits >> 32) as u32)
    }
}

// =============================================================================
// Component
// =============================================================================

/// Downcasting support for boxed components.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// What the paint traversal knows about the component being painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintContext {
    /// Allocated size; the surface clip has the same extent.
    pub size: Size,
    /// Resolved foreground (explicit or renderer default).
    pub foreground: Color,
    /// Resolved background (explicit or renderer default).
    pub background: Color,
    /// Whether this component currently holds focus.
    pub focused: bool,
    /// True when the component chose its background explicitly.
    pub explicit_background: bool,
}

/// Capability contract every widget implements.
///
/// All methods have defaults, so a plain container is
/// `impl Component for MyPanel {}`.
pub trait Component: AsAny + Send {
    /// Draw this component (not its children) into a surface already
    /// translated and clipped to the allocated rectangle.
    fn paint(&self, ctx: &PaintContext, surface: &mut Surface<'_>) -> Result<()> {
        let _ = (ctx, surface);
        Ok(())
    }

    /// Intrinsic size. `layout_preferred` is what the own layout manager
    /// asks for (zero without one).
    fn preferred_size(&self, layout_preferred: Size) -> Size {
        layout_preferred
    }

    /// Whether this component can hold focus.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Layout manager installed when the component is inserted.
    fn default_layout(&self) -> Option<LayoutManager> {
        Some(LayoutManager::border())
    }

    /// Called after the component's geometry was recomputed.
    fn validated(&mut self, size: Size) {
        let _ = size;
    }
}
