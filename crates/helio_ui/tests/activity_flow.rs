//! End-to-end activity stack scenarios driven through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use helio_core::time::TransitionTimeSpan;
use helio_ui::{
    ActivityError, ActivityStack, ContentControl, KeyEvent, UiConfig, VirtualKey, Window, WindowManager, WindowProperties,
};

/// Counts the key events routed to it.
struct KeyCounter {
    hits: Rc<RefCell<u32>>,
}

impl Window for KeyCounter {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn on_key_event(&mut self, _event: &KeyEvent) {
        *self.hits.borrow_mut() += 1;
    }
}

fn counter() -> (Box<dyn Window>, Rc<RefCell<u32>>) {
    let hits = Rc::new(RefCell::new(0));
    (
        Box::new(KeyCounter { hits: hits.clone() }),
        hits,
    )
}

fn setup() -> (WindowManager, ActivityStack) {
    let mut manager = WindowManager::new();
    let host = manager
        .add(Box::new(ContentControl), WindowProperties::stretch())
        .unwrap();
    let stack = ActivityStack::new(host, &UiConfig::default());
    (manager, stack)
}

fn drive(manager: &mut WindowManager, stack: &mut ActivityStack) {
    for _ in 0..1000 {
        stack.update_animation(TransitionTimeSpan::from_milliseconds(16));
        let active = stack.update_animation_state(manager, false);
        manager.update(TransitionTimeSpan::from_milliseconds(16));
        if !active {
            return;
        }
    }
    panic!("animations never settled");
}

#[test]
fn three_activities_pop_in_lifo_order() {
    let (mut manager, mut stack) = setup();

    let (a_win, a_hits) = counter();
    let mut a_future = stack.push(&mut manager, a_win, WindowProperties::stretch()).unwrap();
    let a = stack.front_window().unwrap();

    let (b_win, b_hits) = counter();
    let mut b_future = stack.push(&mut manager, b_win, WindowProperties::stretch()).unwrap();
    let b = stack.front_window().unwrap();

    let (c_win, c_hits) = counter();
    let mut c_future = stack.push(&mut manager, c_win, WindowProperties::stretch()).unwrap();
    let c = stack.front_window().unwrap();

    assert_eq!(stack.count(), 3);

    // Pop requests against covered entries are no-ops.
    assert!(!stack.schedule_pop_window(a, true));
    assert!(!stack.schedule_pop_window(b, true));
    assert_eq!(stack.count(), 3);
    assert!(a_future.try_result().is_none());

    // Only the frontmost entry accepts the pop.
    assert!(stack.schedule_pop_window(c, true));
    drive(&mut manager, &mut stack);

    assert_eq!(stack.count(), 2);
    assert_eq!(c_future.try_result(), Some(Ok(true)));
    assert!(!manager.exists(c));
    assert!(manager.exists(a));
    assert!(manager.exists(b));

    // B is now frontmost and receives key events; A stays inert.
    assert_eq!(stack.front_window(), Some(b));
    stack.on_key_event(&mut manager, &KeyEvent::down(VirtualKey::Enter));
    assert_eq!(*b_hits.borrow(), 1);
    assert_eq!(*a_hits.borrow(), 0);
    assert_eq!(*c_hits.borrow(), 0);

    // Cancel B, complete A.
    assert!(stack.schedule_pop(false));
    drive(&mut manager, &mut stack);
    assert_eq!(b_future.try_result(), Some(Ok(false)));

    assert!(stack.schedule_pop(true));
    drive(&mut manager, &mut stack);
    assert_eq!(a_future.try_result(), Some(Ok(true)));
    assert_eq!(stack.count(), 0);
}

#[test]
fn dropping_the_stack_rejects_outstanding_futures() {
    let (mut manager, mut stack) = setup();
    let future_a = stack
        .push(&mut manager, Box::new(ContentControl), WindowProperties::stretch())
        .unwrap();
    let future_b = stack
        .push(&mut manager, Box::new(ContentControl), WindowProperties::stretch())
        .unwrap();

    drop(stack);

    assert_eq!(future_a.wait(), Err(ActivityError::Canceled));
    assert_eq!(future_b.wait(), Err(ActivityError::Canceled));
}

#[test]
fn closing_windows_still_exist_until_teardown() {
    let (mut manager, mut stack) = setup();
    let _future = stack
        .push(&mut manager, Box::new(ContentControl), WindowProperties::stretch())
        .unwrap();
    let window = stack.front_window().unwrap();

    stack.schedule_pop(true);
    // The fade has not finished: the entry and its window both survive.
    assert_eq!(stack.count(), 1);
    assert!(manager.exists(window));

    drive(&mut manager, &mut stack);
    assert!(!manager.exists(window));
}
