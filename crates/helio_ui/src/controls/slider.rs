//! Horizontal slider control.

use helio_core::math::{PxAvailableSize, PxPoint2, PxRectangle, PxSize2D};

use crate::color::UIRenderColor;
use crate::event::{KeyEvent, PointerEvent, PointerPhase, VirtualKey};
use crate::render::DrawContext;
use crate::slider::{SliderConstrainedValue, SliderDragLogic, SliderPixelSpanInfo};
use crate::tree::LayoutChildren;
use crate::window::Window;

const DEFAULT_SIZE: PxSize2D = PxSize2D::new(176, 32);
const TRACK_THICKNESS: i32 = 4;
const THUMB_SIZE: i32 = 12;
const KEY_STEP_PERCENT: f32 = 0.05;

/// A horizontal slider over an `f32` range.
///
/// Drags arrive either through routed pointer events or directly through
/// [`Self::try_begin_drag`] / [`Self::try_drag`] / [`Self::end_drag`] in
/// window-local pixels; the drag logic and constrained value stay in sync
/// in both directions.
#[derive(Debug)]
pub struct SliderControl {
    value: SliderConstrainedValue<f32>,
    logic: SliderDragLogic,
    track_color: UIRenderColor,
    thumb_color: UIRenderColor,
    height: i32,
}

impl SliderControl {
    /// Creates a slider over the given range.
    #[must_use]
    pub fn new(value: SliderConstrainedValue<f32>) -> Self {
        let mut logic = SliderDragLogic::default();
        logic.set_percentage(value.get_percentage());
        Self {
            value,
            logic,
            track_color: UIRenderColor::new(0x50, 0x50, 0x50, 0xFF),
            thumb_color: UIRenderColor::WHITE,
            height: DEFAULT_SIZE.height(),
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    /// Sets the value, clamped to the range; returns true on change.
    pub fn set_value(&mut self, value: f32) -> bool {
        let changed = self.value.set(value);
        if changed {
            self.logic.set_percentage(self.value.get_percentage());
        }
        changed
    }

    /// Returns true while the thumb is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.logic.is_dragging()
    }

    /// Enables or disables the slider; disabling cancels a live drag.
    pub fn set_enabled(&mut self, enabled: bool) {
        let flags = self.logic.set_enabled(enabled);
        if flags.is_flagged(crate::slider::SliderResultFlags::DRAG_CANCELLED) {
            self.value.set_percentage(self.logic.get_percentage());
        }
    }

    /// Begins a drag at a window-local pixel position.
    pub fn try_begin_drag(&mut self, position_px: i32) -> bool {
        let accepted = self.logic.try_begin_drag(position_px);
        if accepted {
            self.value.set_percentage(self.logic.get_percentage());
        }
        accepted
    }

    /// Continues a drag.
    pub fn try_drag(&mut self, position_px: i32) -> bool {
        let accepted = self.logic.try_drag(position_px);
        if accepted {
            self.value.set_percentage(self.logic.get_percentage());
        }
        accepted
    }

    /// Ends a drag.
    pub fn end_drag(&mut self, position_px: i32) -> bool {
        let accepted = self.logic.end_drag(position_px);
        if accepted {
            self.value.set_percentage(self.logic.get_percentage());
        }
        accepted
    }

    /// Cancels a drag, restoring the pre-drag value.
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.logic.cancel_drag();
        if cancelled {
            self.value.set_percentage(self.logic.get_percentage());
        }
        cancelled
    }

    fn thumb_rect(&self) -> PxRectangle {
        let center_px = self.logic.get_position_px(self.logic.get_percentage());
        PxRectangle::new(
            center_px - THUMB_SIZE / 2,
            (self.height - THUMB_SIZE) / 2,
            THUMB_SIZE,
            THUMB_SIZE,
        )
    }
}

impl Window for SliderControl {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn measure_override(&mut self, _children: &mut LayoutChildren<'_>, _available: PxAvailableSize) -> PxSize2D {
        DEFAULT_SIZE
    }

    fn arrange_override(&mut self, _children: &mut LayoutChildren<'_>, final_size: PxSize2D) -> PxSize2D {
        self.height = final_size.height();
        // The usable span leaves half a thumb at each end; the percentage
        // survives the span swap (recomputed mid-drag).
        let span = SliderPixelSpanInfo::forward(THUMB_SIZE / 2, (final_size.width() - THUMB_SIZE).max(1));
        if self.logic.set_span_info(span) && !self.logic.is_dragging() {
            self.logic.set_percentage(self.value.get_percentage());
        }
        final_size
    }

    fn on_pointer_event(&mut self, event: &PointerEvent, local: PxPoint2) -> bool {
        match event.phase {
            PointerPhase::Down => self.try_begin_drag(local.x),
            PointerPhase::Move => self.try_drag(local.x),
            PointerPhase::Up => self.end_drag(local.x),
        }
    }

    fn on_key_event(&mut self, event: &KeyEvent) {
        if !event.pressed {
            return;
        }
        let step = match event.key {
            VirtualKey::Left => -KEY_STEP_PERCENT,
            VirtualKey::Right => KEY_STEP_PERCENT,
            VirtualKey::Home => {
                self.set_value(self.value.min());
                return;
            }
            VirtualKey::End => {
                self.set_value(self.value.max());
                return;
            }
            _ => return,
        };
        let percentage = (self.value.get_percentage() + step).clamp(0.0, 1.0);
        self.value.set_percentage(percentage);
        self.logic.set_percentage(self.value.get_percentage());
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let rect = ctx.window_rect();
        let track = PxRectangle::new(
            0,
            (self.height - TRACK_THICKNESS) / 2,
            rect.width(),
            TRACK_THICKNESS,
        );
        ctx.draw_rect(track, self.track_color);
        ctx.draw_rect(self.thumb_rect(), self.thumb_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::WindowManager;
    use crate::window::WindowProperties;

    fn arranged_slider(mgr: &mut WindowManager) -> crate::window::WindowId {
        let slider = SliderControl::new(SliderConstrainedValue::from_range(0.0, 100.0));
        let id = mgr.add(Box::new(slider), WindowProperties::default()).unwrap();
        mgr.perform_layout(PxSize2D::new(400, 100));
        id
    }

    #[test]
    fn drag_moves_the_value() {
        let mut mgr = WindowManager::new();
        let id = arranged_slider(&mut mgr);

        // Arranged at the default desired size: span covers 176 - 12 px.
        mgr.with_window::<SliderControl, _>(id, |slider| {
            let span = PxSize2D::new(176, 32);
            let end = THUMB_SIZE / 2 + (span.width() - THUMB_SIZE) - 1;
            assert!(slider.try_begin_drag(end));
            assert!(slider.is_dragging());
            assert_eq!(slider.value(), 100.0);

            assert!(slider.end_drag(THUMB_SIZE / 2));
            assert_eq!(slider.value(), 0.0);
        })
        .unwrap();
    }

    #[test]
    fn cancel_restores_the_value() {
        let mut mgr = WindowManager::new();
        let id = arranged_slider(&mut mgr);

        mgr.with_window::<SliderControl, _>(id, |slider| {
            slider.set_value(50.0);
            assert!(slider.try_begin_drag(THUMB_SIZE / 2));
            assert_eq!(slider.value(), 0.0);
            assert!(slider.cancel_drag());
            assert_eq!(slider.value(), 50.0);
        })
        .unwrap();
    }

    #[test]
    fn keys_nudge_and_jump() {
        let mut mgr = WindowManager::new();
        let id = arranged_slider(&mut mgr);

        mgr.send_key_event_to(id, &KeyEvent::down(VirtualKey::Right));
        mgr.with_window::<SliderControl, _>(id, |slider| {
            assert_eq!(slider.value(), 5.0);
        })
        .unwrap();

        mgr.send_key_event_to(id, &KeyEvent::down(VirtualKey::End));
        mgr.with_window::<SliderControl, _>(id, |slider| {
            assert_eq!(slider.value(), 100.0);
        })
        .unwrap();
    }

    #[test]
    fn pointer_drag_through_the_tree() {
        let mut mgr = WindowManager::new();
        let id = arranged_slider(&mut mgr);

        // Press at the near end, drag, release past the far end (clamped).
        assert!(mgr.send_pointer_event(&PointerEvent::down(THUMB_SIZE / 2, 16)));
        assert_eq!(mgr.pointer_capture(), Some(id));
        assert!(mgr.send_pointer_event(&PointerEvent::moved(90, 16)));
        assert!(mgr.send_pointer_event(&PointerEvent::up(1000, 16)));
        assert_eq!(mgr.pointer_capture(), None);

        mgr.with_window::<SliderControl, _>(id, |slider| {
            assert_eq!(slider.value(), 100.0);
            assert!(!slider.is_dragging());
        })
        .unwrap();
    }

    #[test]
    fn disabled_slider_ignores_drags() {
        let mut slider = SliderControl::new(SliderConstrainedValue::from_range(0.0, 1.0));
        slider.set_enabled(false);
        assert!(!slider.try_begin_drag(10));
        assert!(!slider.is_dragging());
    }
}
