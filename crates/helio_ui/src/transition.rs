//! Time-based value transitions.
//!
//! Every transition runs the same state machine:
//!
//! ```text
//! set_value(target) ──> StartDelay ──> Running ──> Idle
//!                        (t < 0)      (0 <= t < end)   (t >= end)
//! ```
//!
//! The timer starts at `-start_delay` and is clamped to
//! `[-start_delay, end_time]`; `val` always reflects the eased position at
//! the current time, rounded to the value's native precision. There are no
//! panics and no allocation on the update path; malformed (negative)
//! durations are clamped to zero rather than rejected.

use helio_core::easing::TransitionType;
use helio_core::math::PxRectangle;
use helio_core::time::TransitionTimeSpan;

use crate::color::UIRenderColor;

/// The observable state of a transition after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    /// The start delay has not elapsed; the value is unchanged.
    StartDelay,
    /// The value is moving toward the target.
    Running,
    /// The value has reached the target.
    Idle,
}

/// Shared transition timer.
#[derive(Debug, Clone, Copy)]
struct Timeline {
    current: i64,
    end: i64,
    start_delay: i64,
}

enum TimelineStep {
    Delay,
    Weight(f32),
    Done,
}

impl Timeline {
    fn new(time: TransitionTimeSpan) -> Self {
        let end = time.clamp_to_non_negative().ticks();
        // A fresh timeline starts completed; the first set_value restarts it.
        Self {
            current: end,
            end,
            start_delay: 0,
        }
    }

    fn restart(&mut self) {
        self.current = -self.start_delay;
    }

    fn complete(&mut self) {
        self.current = self.end;
    }

    fn is_completed(&self) -> bool {
        self.current >= self.end
    }

    fn set_time(&mut self, time: TransitionTimeSpan) {
        self.end = time.clamp_to_non_negative().ticks();
    }

    fn set_start_delay(&mut self, delay: TransitionTimeSpan) {
        self.start_delay = delay.clamp_to_non_negative().ticks();
        self.current = self.current.clamp(-self.start_delay, self.end);
    }

    fn update(&mut self, delta: TransitionTimeSpan) -> TimelineStep {
        self.current = self.current.saturating_add(delta.ticks()).min(self.end);
        if self.current < 0 {
            TimelineStep::Delay
        } else if self.current >= self.end {
            self.current = self.end;
            TimelineStep::Done
        } else {
            TimelineStep::Weight(self.current as f32 / self.end as f32)
        }
    }
}

/// A transitioned `f32` scalar.
#[derive(Debug, Clone)]
pub struct TransitionValue {
    timeline: Timeline,
    transition_type: TransitionType,
    from: f32,
    target: f32,
    val: f32,
}

impl TransitionValue {
    /// Creates a completed transition holding `0.0`.
    #[must_use]
    pub fn new(time: TransitionTimeSpan, transition_type: TransitionType) -> Self {
        Self {
            timeline: Timeline::new(time),
            transition_type,
            from: 0.0,
            target: 0.0,
            val: 0.0,
        }
    }

    /// Returns the current value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f32 {
        self.val
    }

    /// Returns the target value.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Returns true once the value has reached the target.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.timeline.is_completed()
    }

    /// Starts a transition toward `target`; a no-op when already targeted.
    pub fn set_value(&mut self, target: f32) {
        if target != self.target {
            self.from = self.val;
            self.target = target;
            self.timeline.restart();
        }
    }

    /// Jumps straight to the target, skipping interpolation.
    pub fn force_complete(&mut self) {
        self.timeline.complete();
        self.val = self.target;
    }

    /// Changes the transition duration.
    ///
    /// Restarts the timeline when a transition is in flight, otherwise the
    /// transition stays idle at its target.
    pub fn set_transition_time(&mut self, time: TransitionTimeSpan) {
        self.timeline.set_time(time);
        if self.target != self.val {
            self.timeline.restart();
        } else {
            self.timeline.complete();
        }
    }

    /// Changes the start delay applied when a transition restarts.
    pub fn set_start_delay(&mut self, delay: TransitionTimeSpan) {
        self.timeline.set_start_delay(delay);
        if self.target != self.val {
            self.timeline.restart();
        }
    }

    /// Advances the transition and returns the resulting state.
    pub fn update(&mut self, delta: TransitionTimeSpan) -> TransitionState {
        match self.timeline.update(delta) {
            TimelineStep::Delay => TransitionState::StartDelay,
            TimelineStep::Weight(progress) => {
                let weight = self.transition_type.ease(progress);
                self.val = self.from + (self.target - self.from) * weight;
                TransitionState::Running
            }
            TimelineStep::Done => {
                self.val = self.target;
                TransitionState::Idle
            }
        }
    }
}

/// A transitioned [`UIRenderColor`], interpolated channel-wise with
/// rounding.
#[derive(Debug, Clone)]
pub struct TransitionColor {
    timeline: Timeline,
    transition_type: TransitionType,
    from: UIRenderColor,
    target: UIRenderColor,
    val: UIRenderColor,
}

impl TransitionColor {
    /// Creates a completed transition holding transparent black.
    #[must_use]
    pub fn new(time: TransitionTimeSpan, transition_type: TransitionType) -> Self {
        Self {
            timeline: Timeline::new(time),
            transition_type,
            from: UIRenderColor::TRANSPARENT,
            target: UIRenderColor::TRANSPARENT,
            val: UIRenderColor::TRANSPARENT,
        }
    }

    /// Creates a completed transition holding `color`.
    #[must_use]
    pub fn with_value(time: TransitionTimeSpan, transition_type: TransitionType, color: UIRenderColor) -> Self {
        Self {
            timeline: Timeline::new(time),
            transition_type,
            from: color,
            target: color,
            val: color,
        }
    }

    /// Returns the current color.
    #[inline]
    #[must_use]
    pub fn value(&self) -> UIRenderColor {
        self.val
    }

    /// Returns the target color.
    #[inline]
    #[must_use]
    pub fn target(&self) -> UIRenderColor {
        self.target
    }

    /// Returns true once the color has reached the target.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.timeline.is_completed()
    }

    /// Starts a transition toward `target`; a no-op when already targeted.
    pub fn set_value(&mut self, target: UIRenderColor) {
        if target != self.target {
            self.from = self.val;
            self.target = target;
            self.timeline.restart();
        }
    }

    /// Jumps straight to the target color.
    pub fn force_complete(&mut self) {
        self.timeline.complete();
        self.val = self.target;
    }

    /// Changes the transition duration (see [`TransitionValue::set_transition_time`]).
    pub fn set_transition_time(&mut self, time: TransitionTimeSpan) {
        self.timeline.set_time(time);
        if self.target != self.val {
            self.timeline.restart();
        } else {
            self.timeline.complete();
        }
    }

    /// Changes the start delay applied when a transition restarts.
    pub fn set_start_delay(&mut self, delay: TransitionTimeSpan) {
        self.timeline.set_start_delay(delay);
        if self.target != self.val {
            self.timeline.restart();
        }
    }

    /// Advances the transition and returns the resulting state.
    pub fn update(&mut self, delta: TransitionTimeSpan) -> TransitionState {
        match self.timeline.update(delta) {
            TimelineStep::Delay => TransitionState::StartDelay,
            TimelineStep::Weight(progress) => {
                let weight = self.transition_type.ease(progress);
                self.val = UIRenderColor::lerp(self.from, self.target, weight);
                TransitionState::Running
            }
            TimelineStep::Done => {
                self.val = self.target;
                TransitionState::Idle
            }
        }
    }
}

/// A transitioned pixel rectangle; components round to whole pixels.
#[derive(Debug, Clone)]
pub struct TransitionPxRectangle {
    timeline: Timeline,
    transition_type: TransitionType,
    from: PxRectangle,
    target: PxRectangle,
    val: PxRectangle,
}

impl TransitionPxRectangle {
    /// Creates a completed transition holding the empty rectangle.
    #[must_use]
    pub fn new(time: TransitionTimeSpan, transition_type: TransitionType) -> Self {
        Self {
            timeline: Timeline::new(time),
            transition_type,
            from: PxRectangle::EMPTY,
            target: PxRectangle::EMPTY,
            val: PxRectangle::EMPTY,
        }
    }

    /// Returns the current rectangle.
    #[inline]
    #[must_use]
    pub fn value(&self) -> PxRectangle {
        self.val
    }

    /// Returns the target rectangle.
    #[inline]
    #[must_use]
    pub fn target(&self) -> PxRectangle {
        self.target
    }

    /// Returns true once the rectangle has reached the target.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.timeline.is_completed()
    }

    /// Starts a transition toward `target`; a no-op when already targeted.
    pub fn set_value(&mut self, target: PxRectangle) {
        if target != self.target {
            self.from = self.val;
            self.target = target;
            self.timeline.restart();
        }
    }

    /// Jumps straight to the target rectangle.
    pub fn force_complete(&mut self) {
        self.timeline.complete();
        self.val = self.target;
    }

    /// Changes the transition duration (see [`TransitionValue::set_transition_time`]).
    pub fn set_transition_time(&mut self, time: TransitionTimeSpan) {
        self.timeline.set_time(time);
        if self.target != self.val {
            self.timeline.restart();
        } else {
            self.timeline.complete();
        }
    }

    /// Changes the start delay applied when a transition restarts.
    pub fn set_start_delay(&mut self, delay: TransitionTimeSpan) {
        self.timeline.set_start_delay(delay);
        if self.target != self.val {
            self.timeline.restart();
        }
    }

    /// Advances the transition and returns the resulting state.
    pub fn update(&mut self, delta: TransitionTimeSpan) -> TransitionState {
        match self.timeline.update(delta) {
            TimelineStep::Delay => TransitionState::StartDelay,
            TimelineStep::Weight(progress) => {
                let weight = self.transition_type.ease(progress);
                self.val = PxRectangle::new(
                    lerp_px(self.from.x, self.target.x, weight),
                    lerp_px(self.from.y, self.target.y, weight),
                    lerp_px(self.from.width(), self.target.width(), weight),
                    lerp_px(self.from.height(), self.target.height(), weight),
                );
                TransitionState::Running
            }
            TimelineStep::Done => {
                self.val = self.target;
                TransitionState::Idle
            }
        }
    }
}

fn lerp_px(from: i32, to: i32, weight: f32) -> i32 {
    (from as f32 + (to - from) as f32 * weight).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS100: TransitionTimeSpan = TransitionTimeSpan::from_milliseconds(100);
    const MS10: TransitionTimeSpan = TransitionTimeSpan::from_milliseconds(10);

    #[test]
    fn new_transition_is_idle() {
        let mut t = TransitionValue::new(MS100, TransitionType::Linear);
        assert!(t.is_completed());
        assert_eq!(t.update(MS10), TransitionState::Idle);
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn runs_then_idles() {
        let mut t = TransitionValue::new(MS100, TransitionType::Linear);
        t.set_value(10.0);
        assert!(!t.is_completed());

        assert_eq!(t.update(TransitionTimeSpan::from_milliseconds(50)), TransitionState::Running);
        assert!((t.value() - 5.0).abs() < 1e-4);

        assert_eq!(t.update(TransitionTimeSpan::from_milliseconds(50)), TransitionState::Idle);
        assert_eq!(t.value(), 10.0);
    }

    #[test]
    fn start_delay_defers_movement() {
        let mut t = TransitionValue::new(MS100, TransitionType::Linear);
        t.set_start_delay(TransitionTimeSpan::from_milliseconds(20));
        t.set_value(10.0);

        assert_eq!(t.update(MS10), TransitionState::StartDelay);
        assert_eq!(t.value(), 0.0);

        // The timer reaches exactly zero: running, but no movement yet.
        assert_eq!(t.update(MS10), TransitionState::Running);
        assert_eq!(t.value(), 0.0);

        assert_eq!(t.update(TransitionTimeSpan::from_milliseconds(50)), TransitionState::Running);
        assert!(t.value() > 0.0);
    }

    #[test]
    fn force_complete_is_idempotent_under_update() {
        let mut t = TransitionValue::new(MS100, TransitionType::Smooth);
        t.set_value(42.0);
        t.update(MS10);
        t.force_complete();
        assert_eq!(t.value(), 42.0);
        for _ in 0..3 {
            assert_eq!(t.update(MS10), TransitionState::Idle);
            assert_eq!(t.value(), 42.0);
        }
    }

    #[test]
    fn same_target_does_not_restart() {
        let mut t = TransitionValue::new(MS100, TransitionType::Linear);
        t.set_value(10.0);
        t.update(TransitionTimeSpan::from_milliseconds(100));
        assert!(t.is_completed());

        t.set_value(10.0);
        assert!(t.is_completed());
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        let mut t = TransitionValue::new(TransitionTimeSpan::from_milliseconds(-50), TransitionType::Linear);
        t.set_value(5.0);
        assert_eq!(t.update(MS10), TransitionState::Idle);
        assert_eq!(t.value(), 5.0);
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let mut t = TransitionValue::new(MS100, TransitionType::Linear);
        t.set_value(10.0);
        t.update(TransitionTimeSpan::from_milliseconds(50));
        let mid = t.value();

        t.set_value(0.0);
        assert_eq!(t.update(TransitionTimeSpan::from_milliseconds(50)), TransitionState::Running);
        assert!(t.value() < mid);
    }

    #[test]
    fn color_transition_rounds_channels() {
        let mut t = TransitionColor::new(MS100, TransitionType::Linear);
        t.set_value(UIRenderColor::WHITE);
        t.update(TransitionTimeSpan::from_milliseconds(50));
        assert_eq!(t.value(), UIRenderColor::new(128, 128, 128, 128));

        t.update(TransitionTimeSpan::from_milliseconds(50));
        assert_eq!(t.value(), UIRenderColor::WHITE);
        assert!(t.is_completed());
    }

    #[test]
    fn rectangle_transition_reaches_target_exactly() {
        let mut t = TransitionPxRectangle::new(MS100, TransitionType::Smooth);
        t.set_value(PxRectangle::new(10, 20, 100, 50));
        while !t.is_completed() {
            t.update(MS10);
        }
        assert_eq!(t.value(), PxRectangle::new(10, 20, 100, 50));
    }

    #[test]
    fn set_transition_time_while_idle_stays_idle() {
        let mut t = TransitionValue::new(MS100, TransitionType::Linear);
        t.set_value(3.0);
        t.force_complete();

        t.set_transition_time(TransitionTimeSpan::from_milliseconds(200));
        assert!(t.is_completed());
        assert_eq!(t.update(MS10), TransitionState::Idle);
    }

    #[test]
    fn set_transition_time_mid_flight_restarts() {
        let mut t = TransitionValue::new(MS100, TransitionType::Linear);
        t.set_value(10.0);
        t.update(TransitionTimeSpan::from_milliseconds(90));
        assert!(!t.is_completed());

        t.set_transition_time(TransitionTimeSpan::from_milliseconds(20));
        assert_eq!(t.update(MS10), TransitionState::Running);
        assert_eq!(t.update(MS10), TransitionState::Idle);
        assert_eq!(t.value(), 10.0);
    }
}
