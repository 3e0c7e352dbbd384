use crate::component::{Component, PaintContext};
use crate::error::Result;
use crate::layout::LayoutManager;
use crate::renderer::Surface;
use crate::types::Size;

use super::label::{text_origin, Align};

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Focusable, bordered button.
///
/// Draws its caption centered inside a single-line frame. While focused the
/// foreground and background swap. Enter or Space on a focused button raises
/// an Action event for it; register with [`crate::window::Ui::on_action`].
#[derive(Debug, Clone, Default)]
pub struct Button {
    caption: String,
}

impl Button {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    fn caption_width(&self) -> i32 {
        self.caption.chars().count() as i32
    }

    fn draw_frame(surface: &mut Surface<'_>, size: Size) -> Result<()> {
        let (right, bottom) = (size.width - 1, size.height - 1);
        surface.fill_rect_with(HORIZONTAL, 1, 0, size.width - 2, 1)?;
        surface.fill_rect_with(HORIZONTAL, 1, bottom, size.width - 2, 1)?;
        surface.fill_rect_with(VERTICAL, 0, 1, 1, size.height - 2)?;
        surface.fill_rect_with(VERTICAL, right, 1, 1, size.height - 2)?;
        surface.fill_rect_with(TOP_LEFT, 0, 0, 1, 1)?;
        surface.fill_rect_with(TOP_RIGHT, right, 0, 1, 1)?;
        surface.fill_rect_with(BOTTOM_LEFT, 0, bottom, 1, 1)?;
        surface.fill_rect_with(BOTTOM_RIGHT, right, bottom, 1, 1)
    }
}

impl Component for Button {
    fn paint(&self, ctx: &PaintContext, surface: &mut Surface<'_>) -> Result<()> {
        let (fg, bg) = if ctx.focused {
            (ctx.background, ctx.foreground)
        } else {
            (ctx.foreground, ctx.background)
        };
        let size = ctx.size;
        surface.set_color(bg);
        surface.fill_rect(0, 0, size.width, size.height)?;
        surface.set_color(fg);

        // Too small for a frame: caption only, first row.
        let framed = size.width >= 2 && size.height >= 2;
        let (inset, span) = if framed { (1, size.width - 2) } else { (0, size.width) };
        if framed {
            Self::draw_frame(surface, size)?;
        }
        let x = text_origin(Align::Center, self.caption_width(), span);
        let visible: String = self.caption.chars().take((span - x).max(0) as usize).collect();
        let y = if framed { size.height / 2 } else { 0 };
        surface.draw_text(inset + x, y, &visible)
    }

    fn preferred_size(&self, _: Size) -> Size {
        Size::new(self.caption_width() + 4, 3)
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn default_layout(&self) -> Option<LayoutManager> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;
    use crate::types::Color;

    fn render(button: &Button, width: u16, height: u16, focused: bool) -> FrameBuffer {
        let mut buffer = FrameBuffer::new(width, height, Color::White, Color::Black);
        let ctx = PaintContext {
            size: Size::new(width as i32, height as i32),
            foreground: Color::White,
            background: Color::Blue,
            focused,
            explicit_background: true,
        };
        button.paint(&ctx, &mut Surface::new(&mut buffer)).unwrap();
        buffer
    }

    fn row(buffer: &FrameBuffer, y: u16) -> String {
        (0..buffer.width())
            .filter_map(|x| buffer.get(x, y).map(|c| c.glyph))
            .collect()
    }

    #[test]
    fn test_framed_caption() {
        let buffer = render(&Button::new("OK"), 6, 3, false);
        assert_eq!(row(&buffer, 0), "┌────┐");
        assert_eq!(row(&buffer, 1), "│ OK │");
        assert_eq!(row(&buffer, 2), "└────┘");
        assert_eq!(buffer.bg_at(2, 1), Some(Color::Blue));
        assert_eq!(buffer.fg_at(2, 1), Some(Color::White));
    }

    #[test]
    fn test_focus_swaps_colors() {
        let buffer = render(&Button::new("OK"), 6, 3, true);
        assert_eq!(buffer.bg_at(2, 1), Some(Color::White));
        assert_eq!(buffer.fg_at(2, 1), Some(Color::Blue));
        assert_eq!(buffer.bg_at(0, 0), Some(Color::White));
    }

    #[test]
    fn test_single_row_draws_caption_only() {
        let buffer = render(&Button::new("Cancel"), 4, 1, false);
        assert_eq!(row(&buffer, 0), "Canc");
    }

    #[test]
    fn test_preferred_size_and_interactivity() {
        let button = Button::new("OK");
        assert_eq!(button.preferred_size(Size::ZERO), Size::new(6, 3));
        assert!(button.is_interactive());
    }
}
