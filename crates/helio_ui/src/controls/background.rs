//! Solid-color background window.

use crate::color::UIRenderColor;
use crate::render::DrawContext;
use crate::window::Window;

/// Fills its arranged rectangle with a color.
///
/// Used as the backdrop of activities and as a plain colored panel.
#[derive(Debug)]
pub struct BackgroundWindow {
    color: UIRenderColor,
}

impl BackgroundWindow {
    /// Creates a background with the given color.
    #[must_use]
    pub fn new(color: UIRenderColor) -> Self {
        Self { color }
    }

    /// Returns the fill color.
    #[must_use]
    pub fn color(&self) -> UIRenderColor {
        self.color
    }

    /// Replaces the fill color.
    pub fn set_color(&mut self, color: UIRenderColor) {
        self.color = color;
    }
}

impl Window for BackgroundWindow {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        ctx.draw_fill(self.color);
    }
}
