use crate::component::{Component, PaintContext};
use crate::error::Result;
use crate::layout::LayoutManager;
use crate::renderer::Surface;
use crate::types::Size;

/// Horizontal placement of a label's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One line of text.
///
/// Text wider than the allocation is cut at the right edge; the vertical
/// position is the middle row.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    align: Align,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn set_align(&mut self, align: Align) {
        self.align = align;
    }

    fn width(&self) -> i32 {
        self.text.chars().count() as i32
    }
}

/// Column where text of `len` cells starts inside `span`.
pub(crate) fn text_origin(align: Align, len: i32, span: i32) -> i32 {
    match align {
        Align::Left => 0,
        Align::Center => ((span - len) / 2).max(0),
        Align::Right => (span - len).max(0),
    }
}

impl Component for Label {
    fn paint(&self, ctx: &PaintContext, surface: &mut Surface<'_>) -> Result<()> {
        if ctx.explicit_background {
            surface.set_color(ctx.background);
            surface.fill_rect(0, 0, ctx.size.width, ctx.size.height)?;
        }
        surface.set_color(ctx.foreground);
        let x = text_origin(self.align, self.width(), ctx.size.width);
        let visible: String = self.text.chars().take((ctx.size.width - x).max(0) as usize).collect();
        surface.draw_text(x, ctx.size.height / 2, &visible)
    }

    fn preferred_size(&self, _: Size) -> Size {
        Size::new(self.width(), 1)
    }

    fn default_layout(&self) -> Option<LayoutManager> {
        None
    }
}
