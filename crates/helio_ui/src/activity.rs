//! The activity stack: modal dialog presentation over the window tree.
//!
//! Activities are pushed LIFO; each entry owns a background fade and a
//! one-shot promise that resolves when the entry is finally popped. The
//! whole lifecycle runs on the UI thread; the promise exists so calling
//! code can await a dialog result across frames of the synchronous update
//! loop, not to cross threads.

use tokio::sync::oneshot;
use tracing::debug;

use helio_core::time::TransitionTimeSpan;

use crate::color::UIRenderColor;
use crate::config::UiConfig;
use crate::error::{ActivityError, UiResult};
use crate::event::KeyEvent;
use crate::transition::TransitionColor;
use crate::tree::WindowManager;
use crate::window::{Window, WindowId, WindowProperties};

/// Lifecycle state of a stack entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    /// The activity is presented and interactive.
    Ready,
    /// The activity is fading out; it pops when the fade finishes.
    Closing,
}

/// The result recorded when an entry is scheduled for pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopResult {
    /// No result recorded yet (popping in this state is a logic bug).
    NotSet,
    /// The activity completed.
    Completed,
    /// The activity was cancelled.
    Cancelled,
}

/// Awaitable result of a pushed activity.
///
/// Resolves to `Ok(true)` (completed), `Ok(false)` (cancelled) or an
/// [`ActivityError`] when the stack is torn down or misbehaves.
#[derive(Debug)]
pub struct ActivityFuture {
    receiver: oneshot::Receiver<Result<bool, ActivityError>>,
}

impl ActivityFuture {
    /// Polls for the result without blocking.
    pub fn try_result(&mut self) -> Option<Result<bool, ActivityError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ActivityError::Canceled)),
        }
    }

    /// Blocks until the result is available.
    ///
    /// Only valid off the frame driver; the UI thread polls with
    /// [`Self::try_result`] instead.
    pub fn wait(self) -> Result<bool, ActivityError> {
        self.receiver.blocking_recv().unwrap_or(Err(ActivityError::Canceled))
    }
}

struct ActivityStackEntry {
    window: WindowId,
    background_color: TransitionColor,
    state: ActivityState,
    pop_result: PopResult,
    promise: Option<oneshot::Sender<Result<bool, ActivityError>>>,
}

/// A LIFO stack of modal activities hosted under one window.
pub struct ActivityStack {
    host: WindowId,
    /// Front (index 0) is the top of the stack.
    entries: Vec<ActivityStackEntry>,
    base_color: UIRenderColor,
    fade_time: TransitionTimeSpan,
    dim_step: u8,
    easing: helio_core::easing::TransitionType,
}

impl ActivityStack {
    /// Creates a stack hosting its activities as children of `host`.
    #[must_use]
    pub fn new(host: WindowId, config: &UiConfig) -> Self {
        Self {
            host,
            entries: Vec::new(),
            base_color: UIRenderColor::BLACK.with_alpha(0xB0),
            fade_time: config.activity.fade_time(),
            dim_step: config.activity.dim_step,
            easing: config.animation.easing,
        }
    }

    /// Replaces the backdrop base color.
    pub fn set_base_color(&mut self, color: UIRenderColor) {
        self.base_color = color;
    }

    /// Returns the number of stacked activities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the window of the frontmost (most recently pushed) activity.
    #[must_use]
    pub fn front_window(&self) -> Option<WindowId> {
        self.entries.first().map(|e| e.window)
    }

    /// Returns the current backdrop color of the entry at `index`
    /// (0 = front).
    #[must_use]
    pub fn entry_background(&self, index: usize) -> Option<UIRenderColor> {
        self.entries.get(index).map(|e| e.background_color.value())
    }

    /// Pushes an activity window onto the stack.
    ///
    /// The activity is added as a child of the host window and fades in
    /// from transparent. If adding the child fails nothing is inserted and
    /// the error is returned (strong guarantee). The returned future
    /// resolves when the entry is eventually popped.
    pub fn push(&mut self, manager: &mut WindowManager, window: Box<dyn Window>, props: WindowProperties) -> UiResult<ActivityFuture> {
        let window_id = manager.add_child(self.host, window, props)?;

        let mut background_color = TransitionColor::new(self.fade_time, self.easing);
        background_color.set_value(self.base_color);

        let (sender, receiver) = oneshot::channel();
        self.entries.insert(
            0,
            ActivityStackEntry {
                window: window_id,
                background_color,
                state: ActivityState::Ready,
                pop_result: PopResult::NotSet,
                promise: Some(sender),
            },
        );
        debug!(id = window_id.raw(), depth = self.entries.len(), "activity pushed");
        Ok(ActivityFuture { receiver })
    }

    /// Schedules the frontmost activity for pop.
    ///
    /// Only the front entry can be popped, and only while `Ready`. Records
    /// the result (`true` = completed, `false` = cancelled) and starts the
    /// fade to transparent. Returns false when there is nothing poppable.
    pub fn schedule_pop(&mut self, completed: bool) -> bool {
        let Some(front) = self.entries.first_mut() else {
            return false;
        };
        if front.state != ActivityState::Ready {
            return false;
        }
        front.state = ActivityState::Closing;
        front.pop_result = if completed { PopResult::Completed } else { PopResult::Cancelled };
        front.background_color.set_value(UIRenderColor::TRANSPARENT);
        debug!(id = front.window.raw(), completed, "activity scheduled for pop");
        true
    }

    /// Schedules a specific activity for pop; a no-op unless `window` is
    /// the frontmost entry.
    pub fn schedule_pop_window(&mut self, window: WindowId, completed: bool) -> bool {
        if self.front_window() != Some(window) {
            return false;
        }
        self.schedule_pop(completed)
    }

    /// Advances the entry fades.
    pub fn update_animation(&mut self, delta: TransitionTimeSpan) {
        for entry in &mut self.entries {
            entry.background_color.update(delta);
        }
    }

    /// Settles animation state: re-targets per-layer dimming, pops every
    /// finished closing entry at the front and fulfills its promise.
    ///
    /// Returns true while any animation is still in flight, either the
    /// stack's own fades or an animation owned by a stacked window.
    pub fn update_animation_state(&mut self, manager: &mut WindowManager, force_complete: bool) -> bool {
        // Layers below the top darken progressively toward the backdrop.
        for (depth, entry) in self.entries.iter_mut().enumerate() {
            if entry.state == ActivityState::Ready {
                let amount = (u32::from(self.dim_step) * depth as u32).min(0xFF) as u8;
                entry.background_color.set_value(self.base_color.dim(amount));
            }
            if force_complete {
                entry.background_color.force_complete();
            }
        }

        // Pop the contiguous run of finished closing entries at the front.
        while let Some(front) = self.entries.first() {
            if front.state != ActivityState::Closing || !front.background_color.is_completed() {
                break;
            }
            let mut entry = self.entries.remove(0);
            let _ = manager.schedule_close(entry.window);
            if let Some(promise) = entry.promise.take() {
                let result = match entry.pop_result {
                    PopResult::Completed => Ok(true),
                    PopResult::Cancelled => Ok(false),
                    PopResult::NotSet => Err(ActivityError::InternalError),
                };
                let _ = promise.send(result);
            }
        }

        let mut any_active = self.entries.iter().any(|e| !e.background_color.is_completed());
        for entry in &self.entries {
            any_active |= manager.is_subtree_animating(entry.window, force_complete);
        }
        any_active
    }

    /// Routes a key event to the frontmost activity; lower entries are
    /// inert while covered.
    pub fn on_key_event(&mut self, manager: &mut WindowManager, event: &KeyEvent) -> bool {
        match self.front_window() {
            Some(window) => manager.send_key_event_to(window, event),
            None => false,
        }
    }
}

impl Drop for ActivityStack {
    fn drop(&mut self) {
        // Callers awaiting a pushed activity are never left hanging.
        for entry in &mut self.entries {
            if let Some(promise) = entry.promise.take() {
                let _ = promise.send(Err(ActivityError::Canceled));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::ContentControl;

    fn setup() -> (WindowManager, ActivityStack) {
        let mut manager = WindowManager::new();
        let host = manager
            .add(Box::new(ContentControl), WindowProperties::stretch())
            .unwrap();
        let stack = ActivityStack::new(host, &UiConfig::default());
        (manager, stack)
    }

    fn activity() -> Box<dyn Window> {
        Box::new(ContentControl)
    }

    fn drive_until_idle(manager: &mut WindowManager, stack: &mut ActivityStack) {
        for _ in 0..1000 {
            stack.update_animation(TransitionTimeSpan::from_milliseconds(16));
            let active = stack.update_animation_state(manager, false);
            manager.update(TransitionTimeSpan::from_milliseconds(16));
            if !active {
                return;
            }
        }
        panic!("stack animations never settled");
    }

    #[test]
    fn push_adds_a_child_window() {
        let (mut manager, mut stack) = setup();
        let _future = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        assert_eq!(stack.count(), 1);
        let front = stack.front_window().unwrap();
        assert!(manager.exists(front));
    }

    #[test]
    fn push_to_dead_host_fails_without_inserting() {
        let mut manager = WindowManager::new();
        let host = manager.add(Box::new(ContentControl), WindowProperties::stretch()).unwrap();
        let mut stack = ActivityStack::new(host, &UiConfig::default());

        manager.schedule_close(host).unwrap();
        manager.update_animation_state(true);

        assert!(stack.push(&mut manager, activity(), WindowProperties::stretch()).is_err());
        assert_eq!(stack.count(), 0);
    }

    #[test]
    fn schedule_pop_completed_resolves_true() {
        let (mut manager, mut stack) = setup();
        let mut future = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();

        assert!(stack.schedule_pop(true));
        drive_until_idle(&mut manager, &mut stack);

        assert_eq!(stack.count(), 0);
        assert_eq!(future.try_result(), Some(Ok(true)));
    }

    #[test]
    fn schedule_pop_cancelled_resolves_false() {
        let (mut manager, mut stack) = setup();
        let mut future = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();

        assert!(stack.schedule_pop(false));
        drive_until_idle(&mut manager, &mut stack);
        assert_eq!(future.try_result(), Some(Ok(false)));
    }

    #[test]
    fn double_schedule_pop_is_rejected() {
        let (mut manager, mut stack) = setup();
        let _future = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();

        assert!(stack.schedule_pop(true));
        assert!(!stack.schedule_pop(true));
    }

    #[test]
    fn only_the_front_entry_pops() {
        let (mut manager, mut stack) = setup();
        let _fa = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        let a = stack.front_window().unwrap();
        let _fb = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        let _fc = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        let c = stack.front_window().unwrap();

        assert_eq!(stack.count(), 3);
        assert!(!stack.schedule_pop_window(a, true));
        assert!(stack.schedule_pop_window(c, true));
    }

    #[test]
    fn drop_breaks_pending_promises() {
        let (mut manager, mut stack) = setup();
        let future = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        drop(stack);
        assert_eq!(future.wait(), Err(ActivityError::Canceled));
    }

    #[test]
    fn force_complete_pops_immediately() {
        let (mut manager, mut stack) = setup();
        let mut future = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();

        stack.schedule_pop(true);
        let active = stack.update_animation_state(&mut manager, true);
        assert!(!active);
        assert_eq!(stack.count(), 0);
        assert_eq!(future.try_result(), Some(Ok(true)));
    }

    #[test]
    fn window_animations_keep_the_stack_active() {
        let (mut manager, mut stack) = setup();
        let toggle = Box::new(crate::controls::ToggleControl::new(&UiConfig::default()));
        let _future = stack.push(&mut manager, toggle, WindowProperties::stretch()).unwrap();
        drive_until_idle(&mut manager, &mut stack);

        // A transition owned by the activity window counts as in flight.
        let window = stack.front_window().unwrap();
        manager
            .with_window::<crate::controls::ToggleControl, _>(window, |t| {
                t.toggle();
            })
            .unwrap();
        assert!(stack.update_animation_state(&mut manager, false));

        drive_until_idle(&mut manager, &mut stack);
        assert!(!stack.update_animation_state(&mut manager, false));
    }

    #[test]
    fn covered_layers_are_dimmed() {
        let (mut manager, mut stack) = setup();
        let base = UIRenderColor::new(0x80, 0x80, 0x80, 0xB0);
        stack.set_base_color(base);
        let _fa = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        let _fb = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        let _fc = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();

        stack.update_animation_state(&mut manager, true);

        assert_eq!(stack.entry_background(0).unwrap(), base);
        assert_eq!(stack.entry_background(1).unwrap(), base.dim(0x40));
        // Two layers down the channels floor at zero.
        assert_eq!(stack.entry_background(2).unwrap(), base.dim(0x80));
        assert_eq!(stack.entry_background(2).unwrap(), UIRenderColor::new(0, 0, 0, 0xB0));
    }

    #[test]
    fn key_events_go_to_the_front_only() {
        let (mut manager, mut stack) = setup();
        let _fa = stack.push(&mut manager, activity(), WindowProperties::stretch()).unwrap();
        let front = stack.front_window().unwrap();

        assert!(stack.on_key_event(&mut manager, &KeyEvent::down(crate::event::VirtualKey::Enter)));
        assert_eq!(stack.front_window(), Some(front));
    }
}
