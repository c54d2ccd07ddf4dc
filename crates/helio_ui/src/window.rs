//! Window node types and the `Window` behavior trait.
//!
//! A window is a node in the tree owned by the
//! [`WindowManager`](crate::tree::WindowManager). The manager stores the
//! per-node bookkeeping ([`WindowFlags`], [`WindowProperties`],
//! [`LayoutCache`]); the behavior lives in a boxed [`Window`]
//! implementation.

use helio_core::math::{PxAvailableSize, PxPoint2, PxRectangle, PxSize2D, PxThickness};
use helio_core::time::TransitionTimeSpan;

use crate::event::{KeyEvent, PointerEvent, WindowContentChangedEvent, WindowSelectEvent};
use crate::render::DrawContext;
use crate::tree::LayoutChildren;

/// Unique identifier for a window in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    /// Creates an id from a raw value.
    #[must_use]
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Window state flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags(u32);

impl Default for WindowFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl WindowFlags {
    /// Window receives input.
    pub const ENABLED: u32 = 1 << 0;
    /// Window (or an ancestor) has been scheduled for close.
    pub const CLOSING: u32 = 1 << 1;
    /// Window needs a fresh measure/arrange pass.
    pub const LAYOUT_DIRTY: u32 = 1 << 2;

    /// Default flags for a new window.
    pub const DEFAULT: Self = Self(Self::ENABLED | Self::LAYOUT_DIRTY);

    /// Creates flags with the default value.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn is_enabled(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn enable(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn disable(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

/// Alignment of a window inside the space its parent assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemAlignment {
    /// Align to the near edge (left/top).
    #[default]
    Near,
    /// Center within the assigned space.
    Center,
    /// Align to the far edge (right/bottom).
    Far,
    /// Consume the full assigned span.
    Stretch,
}

impl ItemAlignment {
    /// Returns the pixel offset for the given leftover space.
    #[must_use]
    pub const fn calc_alignment_px(self, delta_px: i32) -> i32 {
        match self {
            Self::Near | Self::Stretch => 0,
            Self::Center => delta_px / 2,
            Self::Far => delta_px,
        }
    }
}

/// Visibility of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemVisibility {
    /// Drawn and occupies layout space.
    #[default]
    Visible,
    /// Not drawn but still occupies layout space.
    Hidden,
    /// Not drawn and measures to zero.
    Collapsed,
}

/// Layout-facing properties of a window node.
#[derive(Debug, Clone, Default)]
pub struct WindowProperties {
    /// Alignment along the X axis.
    pub alignment_x: ItemAlignment,
    /// Alignment along the Y axis.
    pub alignment_y: ItemAlignment,
    /// Outer margin in pixels.
    pub margin: PxThickness,
    /// Fixed width override.
    pub width: Option<i32>,
    /// Fixed height override.
    pub height: Option<i32>,
    /// Visibility.
    pub visibility: ItemVisibility,
}

impl WindowProperties {
    /// Properties that stretch in both axes.
    #[must_use]
    pub fn stretch() -> Self {
        Self {
            alignment_x: ItemAlignment::Stretch,
            alignment_y: ItemAlignment::Stretch,
            ..Self::default()
        }
    }
}

/// Cached results of the measure and arrange passes.
///
/// The cache also remembers the inputs of the last pass so an unchanged
/// layout request can be skipped entirely (layout is idempotent).
#[derive(Debug, Clone, Default)]
pub struct LayoutCache {
    /// Desired size produced by the measure pass (margin included).
    pub desired_size: PxSize2D,
    /// Final content rectangle, relative to the parent's content origin.
    pub content_rect: PxRectangle,
    /// Content rectangle clipped against the assigned rectangle.
    pub clipped_content_rect: PxRectangle,
    /// Size handed to the window by the arrange pass.
    pub render_size: PxSize2D,
    /// Available size used by the last measure pass.
    pub last_measure_available: Option<PxAvailableSize>,
    /// Final rectangle used by the last arrange pass.
    pub last_arrange_rect: Option<PxRectangle>,
}

/// Behavior of a window node.
///
/// Implementations are stored boxed in the tree. Default methods give a
/// plain container: children are measured with the full budget and
/// arranged to fill the final rectangle.
pub trait Window {
    /// Returns self as [`std::any::Any`] so callers can reach a concrete
    /// window type through the tree (see
    /// [`WindowManager::with_window`](crate::tree::WindowManager::with_window)).
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;

    /// Measures the content and returns the desired content size.
    ///
    /// Composite windows iterate `children`, call
    /// [`LayoutChildren::measure_at`] on each and aggregate the results.
    fn measure_override(&mut self, children: &mut LayoutChildren<'_>, available: PxAvailableSize) -> PxSize2D {
        let mut desired = PxSize2D::ZERO;
        for i in 0..children.len() {
            let child_desired = children.measure_at(i, available);
            desired = desired.max(child_desired);
        }
        desired
    }

    /// Arranges the children inside `final_size` and returns the size
    /// actually consumed.
    fn arrange_override(&mut self, children: &mut LayoutChildren<'_>, final_size: PxSize2D) -> PxSize2D {
        let rect = PxRectangle::new(0, 0, final_size.width(), final_size.height());
        for i in 0..children.len() {
            children.arrange_at(i, rect);
        }
        final_size
    }

    /// Called once when the window is added to the tree.
    fn win_init(&mut self) {}

    /// Handles a key event routed to this window.
    fn on_key_event(&mut self, _event: &KeyEvent) {}

    /// Handles a pointer event; `local` is the pointer position in
    /// window-local pixels.
    ///
    /// Returning true consumes the event. A consumed `Down` captures the
    /// pointer: later `Move`/`Up` events are delivered here until release.
    /// Unconsumed events bubble to the parent window.
    fn on_pointer_event(&mut self, _event: &PointerEvent, _local: PxPoint2) -> bool {
        false
    }

    /// Handles a selection event routed to this window.
    fn on_select(&mut self, _event: &WindowSelectEvent) {}

    /// Handles a content-changed notification routed to this window.
    fn on_content_changed(&mut self, _event: &WindowContentChangedEvent) {}

    /// Advances the window's animations by `delta`.
    fn update_animation(&mut self, _delta: TransitionTimeSpan) {}

    /// Settles animation bookkeeping; returns true while an animation is
    /// still in flight. `force_complete` jumps everything to its target.
    fn update_animation_state(&mut self, _force_complete: bool) -> bool {
        false
    }

    /// Emits draw commands for this window.
    fn draw(&mut self, _ctx: &mut DrawContext<'_>) {}
}

/// A windowless container; pure default behavior.
#[derive(Debug, Default)]
pub struct ContentControl;

impl Window for ContentControl {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_enable_disable() {
        let mut flags = WindowFlags::new();
        assert!(flags.is_enabled(WindowFlags::ENABLED));
        assert!(!flags.is_enabled(WindowFlags::CLOSING));

        flags.enable(WindowFlags::CLOSING);
        assert!(flags.is_enabled(WindowFlags::CLOSING));

        flags.disable(WindowFlags::CLOSING);
        assert!(!flags.is_enabled(WindowFlags::CLOSING));
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(ItemAlignment::Near.calc_alignment_px(10), 0);
        assert_eq!(ItemAlignment::Center.calc_alignment_px(10), 5);
        assert_eq!(ItemAlignment::Far.calc_alignment_px(10), 10);
        assert_eq!(ItemAlignment::Stretch.calc_alignment_px(10), 0);
    }
}
