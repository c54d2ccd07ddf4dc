//! Toggle (checkbox-like) control.

use helio_core::math::{PxAvailableSize, PxPoint2, PxRectangle, PxSize2D};
use helio_core::time::TransitionTimeSpan;

use crate::color::UIRenderColor;
use crate::config::UiConfig;
use crate::event::{KeyEvent, PointerEvent, PointerPhase, VirtualKey};
use crate::render::DrawContext;
use crate::transition::{TransitionColor, TransitionValue};
use crate::tree::LayoutChildren;
use crate::window::Window;

const DEFAULT_SIZE: PxSize2D = PxSize2D::new(48, 24);
const CURSOR_SIZE: i32 = 18;
const OFF_COLOR: UIRenderColor = UIRenderColor::new(0x40, 0x40, 0x40, 0xFF);
const ON_COLOR: UIRenderColor = UIRenderColor::new(0x20, 0x80, 0xE0, 0xFF);

/// An on/off switch with an animated cursor.
#[derive(Debug)]
pub struct ToggleControl {
    checked: bool,
    cursor_position: TransitionValue,
    background: TransitionColor,
    width: i32,
}

impl ToggleControl {
    /// Creates an unchecked toggle using the configured animation timings.
    #[must_use]
    pub fn new(config: &UiConfig) -> Self {
        let time = config.animation.color_change_time();
        let easing = config.animation.easing;
        Self {
            checked: false,
            cursor_position: TransitionValue::new(time, easing),
            background: TransitionColor::with_value(time, easing, OFF_COLOR),
            width: DEFAULT_SIZE.width(),
        }
    }

    /// Returns the checked state.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the checked state; returns true on change.
    pub fn set_checked(&mut self, checked: bool) -> bool {
        if checked == self.checked {
            return false;
        }
        self.checked = checked;
        self.cursor_position.set_value(if checked { 1.0 } else { 0.0 });
        self.background.set_value(if checked { ON_COLOR } else { OFF_COLOR });
        true
    }

    /// Flips the checked state.
    pub fn toggle(&mut self) -> bool {
        self.set_checked(!self.checked)
    }

    fn cursor_rect(&self) -> PxRectangle {
        let travel = (self.width - CURSOR_SIZE - 6).max(0) as f32;
        let x = 3 + (self.cursor_position.value() * travel).round() as i32;
        PxRectangle::new(x, (DEFAULT_SIZE.height() - CURSOR_SIZE) / 2, CURSOR_SIZE, CURSOR_SIZE)
    }
}

impl Window for ToggleControl {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn measure_override(&mut self, _children: &mut LayoutChildren<'_>, _available: PxAvailableSize) -> PxSize2D {
        DEFAULT_SIZE
    }

    fn arrange_override(&mut self, _children: &mut LayoutChildren<'_>, final_size: PxSize2D) -> PxSize2D {
        self.width = final_size.width();
        final_size
    }

    fn on_key_event(&mut self, event: &KeyEvent) {
        if event.pressed && matches!(event.key, VirtualKey::Space | VirtualKey::Enter) {
            self.toggle();
        }
    }

    fn on_pointer_event(&mut self, event: &PointerEvent, _local: PxPoint2) -> bool {
        match event.phase {
            PointerPhase::Down => {
                self.toggle();
                true
            }
            // The release of a captured press lands here; moves pass through.
            PointerPhase::Up => true,
            PointerPhase::Move => false,
        }
    }

    fn update_animation(&mut self, delta: TransitionTimeSpan) {
        self.cursor_position.update(delta);
        self.background.update(delta);
    }

    fn update_animation_state(&mut self, force_complete: bool) -> bool {
        if force_complete {
            self.cursor_position.force_complete();
            self.background.force_complete();
        }
        !(self.cursor_position.is_completed() && self.background.is_completed())
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        ctx.draw_fill(self.background.value());
        ctx.draw_rect(self.cursor_rect(), UIRenderColor::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_starts_an_animation() {
        let mut toggle = ToggleControl::new(&UiConfig::default());
        assert!(!toggle.is_checked());
        assert!(!toggle.update_animation_state(false));

        assert!(toggle.toggle());
        assert!(toggle.is_checked());
        assert!(toggle.update_animation_state(false));

        // Drive to completion.
        for _ in 0..100 {
            toggle.update_animation(TransitionTimeSpan::from_milliseconds(16));
        }
        assert!(!toggle.update_animation_state(false));
        assert_eq!(toggle.background.value(), ON_COLOR);
    }

    #[test]
    fn force_complete_settles_instantly() {
        let mut toggle = ToggleControl::new(&UiConfig::default());
        toggle.toggle();
        assert!(!toggle.update_animation_state(true));
        assert_eq!(toggle.background.value(), ON_COLOR);
    }

    #[test]
    fn space_key_toggles() {
        let mut toggle = ToggleControl::new(&UiConfig::default());
        toggle.on_key_event(&KeyEvent::down(VirtualKey::Space));
        assert!(toggle.is_checked());
        toggle.on_key_event(&KeyEvent::up(VirtualKey::Space));
        assert!(toggle.is_checked());
    }

    #[test]
    fn pointer_press_toggles() {
        let mut toggle = ToggleControl::new(&UiConfig::default());
        assert!(toggle.on_pointer_event(&PointerEvent::down(5, 5), PxPoint2::new(5, 5)));
        assert!(toggle.is_checked());
        assert!(!toggle.on_pointer_event(&PointerEvent::moved(6, 5), PxPoint2::new(6, 5)));
        assert!(toggle.on_pointer_event(&PointerEvent::up(6, 5), PxPoint2::new(6, 5)));
        assert!(toggle.is_checked());
    }

    #[test]
    fn set_checked_same_value_is_a_no_op() {
        let mut toggle = ToggleControl::new(&UiConfig::default());
        assert!(!toggle.set_checked(false));
        assert!(toggle.set_checked(true));
        assert!(!toggle.set_checked(true));
    }
}
