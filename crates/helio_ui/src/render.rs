//! Render bridge.
//!
//! The UI core never talks to a GPU API. Windows emit [`DrawCommand`]s
//! through a [`DrawContext`]; the owning application hands those to a
//! [`BasicRenderSystem`] implementation which manages mesh handles and
//! issues the actual draws. Vertices are plain-old-data so a backend can
//! upload command batches without copies.

use bytemuck::{Pod, Zeroable};

use helio_core::math::{PxPoint2, PxRectangle};

use crate::color::UIRenderColor;
use crate::window::WindowId;

/// A pre-baked texture region managed by the (external) sprite manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Versioned handle to a mesh owned by the render system.
///
/// The version lets a backend detect stale handles after a destroy/create
/// pair reuses an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle {
    /// Slot index inside the render system.
    pub index: u32,
    /// Generation counter for the slot.
    pub version: u32,
}

/// A UI vertex, uploadable as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct UIVertex {
    /// Position in pixels.
    pub position: [f32; 2],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// RGBA color.
    pub color: [u8; 4],
}

impl UIVertex {
    /// Creates a vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [u8; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }
}

/// Builds the four vertices of an axis-aligned quad (clockwise from the
/// top left), with the full `[0,1]` UV range.
#[must_use]
pub fn build_quad(rect: PxRectangle, color: UIRenderColor) -> [UIVertex; 4] {
    let (x0, y0) = (rect.x as f32, rect.y as f32);
    let (x1, y1) = (rect.right() as f32, rect.bottom() as f32);
    let c = color.to_array();
    [
        UIVertex::new(x0, y0, 0.0, 0.0, c),
        UIVertex::new(x1, y0, 1.0, 0.0, c),
        UIVertex::new(x1, y1, 1.0, 1.0, c),
        UIVertex::new(x0, y1, 0.0, 1.0, c),
    ]
}

/// Render state applied to subsequent draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawState {
    /// Scissor rectangle; `None` disables clipping.
    pub clip: Option<PxRectangle>,
}

/// The render system the UI core draws through.
///
/// Implemented by the application's graphics backend; the UI core only
/// requests mesh handles and issues state changes and draws.
pub trait BasicRenderSystem {
    /// Allocates a mesh for a sprite with room for `vertex_capacity`
    /// vertices.
    fn create_mesh(&mut self, sprite: SpriteId, vertex_capacity: u32) -> MeshHandle;

    /// Replaces the vertices of a mesh.
    fn update_mesh(&mut self, handle: MeshHandle, vertices: &[UIVertex]);

    /// Releases a mesh.
    fn destroy_mesh(&mut self, handle: MeshHandle);

    /// Applies draw state for subsequent draws.
    fn set_draw_state(&mut self, state: DrawState);

    /// Draws a mesh.
    fn draw_mesh(&mut self, handle: MeshHandle);
}

/// A draw request emitted by a window (screen coordinates).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A solid-color rectangle.
    FillRect {
        /// Bounds.
        rect: PxRectangle,
        /// Fill color.
        color: UIRenderColor,
    },
    /// A sprite quad.
    Sprite {
        /// The sprite to draw.
        sprite: SpriteId,
        /// Bounds.
        rect: PxRectangle,
        /// Tint color.
        color: UIRenderColor,
    },
    /// A text run (glyph layout happens in the backend).
    Text {
        /// Baseline position.
        position: PxPoint2,
        /// The text.
        text: String,
        /// Text color.
        color: UIRenderColor,
    },
}

/// Per-frame command accumulator handed to windows during draw.
///
/// The window manager positions the context on each window before calling
/// [`Window::draw`](crate::window::Window::draw); window code draws in
/// local coordinates and the context translates to screen space.
pub struct DrawContext<'a> {
    commands: &'a mut Vec<DrawCommand>,
    current_window: Option<WindowId>,
    window_rect: PxRectangle,
}

impl<'a> DrawContext<'a> {
    /// Creates a context writing into `commands`.
    #[must_use]
    pub fn new(commands: &'a mut Vec<DrawCommand>) -> Self {
        Self {
            commands,
            current_window: None,
            window_rect: PxRectangle::EMPTY,
        }
    }

    pub(crate) fn begin_window(&mut self, window: WindowId, screen_rect: PxRectangle) {
        self.current_window = Some(window);
        self.window_rect = screen_rect;
    }

    /// Returns the window currently drawing, if any.
    #[must_use]
    pub fn current_window(&self) -> Option<WindowId> {
        self.current_window
    }

    /// Returns the current window's rectangle in screen coordinates.
    #[must_use]
    pub fn window_rect(&self) -> PxRectangle {
        self.window_rect
    }

    /// Fills the current window's rectangle.
    pub fn draw_fill(&mut self, color: UIRenderColor) {
        self.commands.push(DrawCommand::FillRect {
            rect: self.window_rect,
            color,
        });
    }

    /// Fills a rectangle given in window-local coordinates.
    pub fn draw_rect(&mut self, local: PxRectangle, color: UIRenderColor) {
        self.commands.push(DrawCommand::FillRect {
            rect: self.to_screen(local),
            color,
        });
    }

    /// Draws a sprite into a window-local rectangle.
    pub fn draw_sprite(&mut self, sprite: SpriteId, local: PxRectangle, color: UIRenderColor) {
        self.commands.push(DrawCommand::Sprite {
            sprite,
            rect: self.to_screen(local),
            color,
        });
    }

    /// Draws a text run at a window-local position.
    pub fn draw_text(&mut self, local: PxPoint2, text: impl Into<String>, color: UIRenderColor) {
        self.commands.push(DrawCommand::Text {
            position: PxPoint2::new(self.window_rect.x + local.x, self.window_rect.y + local.y),
            text: text.into(),
            color,
        });
    }

    fn to_screen(&self, local: PxRectangle) -> PxRectangle {
        PxRectangle::new(
            self.window_rect.x + local.x,
            self.window_rect.y + local.y,
            local.width(),
            local.height(),
        )
    }
}

/// Recording render system for tests; every call is appended to a log.
#[derive(Debug, Default)]
pub struct NullRenderSystem {
    next_index: u32,
    /// Human-readable call log.
    pub calls: Vec<String>,
}

impl NullRenderSystem {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BasicRenderSystem for NullRenderSystem {
    fn create_mesh(&mut self, sprite: SpriteId, vertex_capacity: u32) -> MeshHandle {
        let handle = MeshHandle {
            index: self.next_index,
            version: 1,
        };
        self.next_index += 1;
        self.calls.push(format!("create_mesh(sprite={}, capacity={vertex_capacity})", sprite.0));
        handle
    }

    fn update_mesh(&mut self, handle: MeshHandle, vertices: &[UIVertex]) {
        self.calls.push(format!("update_mesh(index={}, vertices={})", handle.index, vertices.len()));
    }

    fn destroy_mesh(&mut self, handle: MeshHandle) {
        self.calls.push(format!("destroy_mesh(index={})", handle.index));
    }

    fn set_draw_state(&mut self, state: DrawState) {
        self.calls.push(format!("set_draw_state(clip={:?})", state.clip));
    }

    fn draw_mesh(&mut self, handle: MeshHandle) {
        self.calls.push(format!("draw_mesh(index={})", handle.index));
    }
}
