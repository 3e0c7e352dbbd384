use crate::component::{Component, PaintContext};
use crate::error::Result;
use crate::layout::LayoutManager;
use crate::renderer::Surface;
use crate::types::Size;

/// Container that fills its rectangle when it has an explicit background.
///
/// Children are arranged by the panel's layout manager (border by default).
#[derive(Debug, Default)]
pub struct Panel {
    layout: Option<LayoutManager>,
    min_size: Size,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel starting with `layout` instead of a border layout.
    pub fn with_layout(layout: impl Into<LayoutManager>) -> Self {
        Self {
            layout: Some(layout.into()),
            ..Self::default()
        }
    }

    /// Lower bound for the preferred size.
    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = size;
        self
    }
}

impl Component for Panel {
    fn paint(&self, ctx: &PaintContext, surface: &mut Surface<'_>) -> Result<()> {
        if ctx.explicit_background {
            surface.set_color(ctx.background);
            surface.fill_rect(0, 0, ctx.size.width, ctx.size.height)?;
        }
        Ok(())
    }

    fn preferred_size(&self, layout_preferred: Size) -> Size {
        Size::new(
            layout_preferred.width.max(self.min_size.width),
            layout_preferred.height.max(self.min_size.height),
        )
    }

    fn default_layout(&self) -> Option<LayoutManager> {
        Some(self.layout.clone().unwrap_or_default())
    }
}
