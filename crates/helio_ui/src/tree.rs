//! The window tree.
//!
//! [`WindowManager`] owns every window at runtime: parent/child
//! relationships, add/close scheduling, closing-state propagation, the
//! measure/arrange driver and event-source routing.
//!
//! Closing is lazy. `schedule_close` marks the subtree and the actual
//! teardown happens during a later `update` once every window in the
//! subtree reports its animations idle, so exit animations get to finish.

use std::collections::HashMap;

use helio_core::math::{PxAvailableSize, PxPoint2, PxRectangle, PxSize2D};
use helio_core::time::TransitionTimeSpan;
use tracing::warn;

use crate::error::{UiError, UiResult};
use crate::event::{KeyEvent, PointerEvent, PointerPhase, WindowContentChangedEvent, WindowSelectEvent};
use crate::render::DrawContext;
use crate::window::{ItemVisibility, LayoutCache, Window, WindowFlags, WindowId, WindowProperties};

struct WindowRecord {
    /// Taken (`None`) while the window's own layout callback runs.
    window: Option<Box<dyn Window>>,
    props: WindowProperties,
    flags: WindowFlags,
    cache: LayoutCache,
    parent: Option<WindowId>,
    children: Vec<WindowId>,
}

/// Owns and manages the runtime tree of UI windows.
pub struct WindowManager {
    records: HashMap<WindowId, WindowRecord>,
    root: WindowId,
    next_id: u64,
    event_source: Option<WindowId>,
    pointer_capture: Option<WindowId>,
}

impl WindowManager {
    /// Creates a manager with an empty stretch-aligned root window.
    #[must_use]
    pub fn new() -> Self {
        let root = WindowId::new(1);
        let mut records = HashMap::with_capacity(64);
        records.insert(
            root,
            WindowRecord {
                window: Some(Box::new(crate::window::ContentControl)),
                props: WindowProperties::stretch(),
                flags: WindowFlags::new(),
                cache: LayoutCache::default(),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            records,
            root,
            next_id: 2,
            event_source: None,
            pointer_capture: None,
        }
    }

    /// Returns the root window id.
    #[inline]
    #[must_use]
    pub fn root_id(&self) -> WindowId {
        self.root
    }

    /// Returns the number of windows in the tree (root included).
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.records.len()
    }

    /// Adds a window as a child of the root.
    pub fn add(&mut self, window: Box<dyn Window>, props: WindowProperties) -> UiResult<WindowId> {
        self.add_child(self.root, window, props)
    }

    /// Adds a window as a child of `parent`.
    ///
    /// Fails when the parent is not (or no longer) part of the tree. A
    /// closing parent does not reject the child; the new window simply
    /// inherits the closing state and will be torn down with its parent.
    pub fn add_child(&mut self, parent: WindowId, mut window: Box<dyn Window>, props: WindowProperties) -> UiResult<WindowId> {
        let parent_closing = match self.records.get(&parent) {
            Some(record) => record.flags.is_enabled(WindowFlags::CLOSING),
            None => return Err(UiError::WindowNotFound(parent)),
        };

        let id = WindowId::new(self.next_id);
        self.next_id += 1;

        let mut flags = WindowFlags::new();
        if parent_closing {
            flags.enable(WindowFlags::CLOSING);
        }
        window.win_init();

        self.records.insert(
            id,
            WindowRecord {
                window: Some(window),
                props,
                flags,
                cache: LayoutCache::default(),
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        if let Some(parent_record) = self.records.get_mut(&parent) {
            parent_record.children.push(id);
        }
        self.mark_layout_dirty(parent);
        Ok(id)
    }

    /// Marks the subtree rooted at `window` for close.
    ///
    /// The windows stay members of the tree (and keep animating) until a
    /// later [`Self::update`] finds their animations idle. Returns false
    /// (with a warning) when the window is not part of the tree.
    pub fn schedule_close(&mut self, window: WindowId) -> UiResult<bool> {
        if window == self.root {
            return Err(UiError::UsageError("the root window can not be closed".into()));
        }
        if !self.records.contains_key(&window) {
            warn!(id = window.raw(), "schedule_close: window is not part of the tree, request ignored");
            return Ok(false);
        }
        self.mark_subtree_closing(window);
        if let Some(parent) = self.records.get(&window).and_then(|r| r.parent) {
            self.mark_layout_dirty(parent);
        }
        Ok(true)
    }

    /// Schedules every child of `window` for close (the window itself stays).
    pub fn schedule_close_all_children(&mut self, window: WindowId) -> UiResult<bool> {
        let children = match self.records.get(&window) {
            Some(record) => record.children.clone(),
            None => {
                warn!(id = window.raw(), "schedule_close_all_children: window is not part of the tree, request ignored");
                return Ok(false);
            }
        };
        for child in children {
            self.mark_subtree_closing(child);
        }
        self.mark_layout_dirty(window);
        Ok(true)
    }

    /// Returns true while the window is a member of the tree.
    ///
    /// A window scheduled for close still exists until its teardown runs.
    #[must_use]
    pub fn exists(&self, window: WindowId) -> bool {
        self.records.contains_key(&window)
    }

    /// Returns true when the window is marked closing.
    #[must_use]
    pub fn is_closing(&self, window: WindowId) -> bool {
        self.records
            .get(&window)
            .is_some_and(|r| r.flags.is_enabled(WindowFlags::CLOSING))
    }

    /// Returns true when `window` lives inside the subtree rooted at `tree`.
    ///
    /// `consider_root_a_member` decides whether `window == tree` counts.
    #[must_use]
    pub fn is_member_of_tree(&self, tree: WindowId, window: WindowId, consider_root_a_member: bool) -> bool {
        if !self.records.contains_key(&tree) {
            warn!(id = tree.raw(), "is_member_of_tree: tree window is not a member of the tree");
            return false;
        }
        if tree == window {
            return consider_root_a_member;
        }
        let mut current = window;
        while let Some(record) = self.records.get(&current) {
            match record.parent {
                Some(parent) if parent == tree => return true,
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Tags `window` as the origin for input events.
    pub fn set_event_source(&mut self, window: WindowId) -> UiResult<()> {
        if !self.records.contains_key(&window) {
            return Err(UiError::WindowNotFound(window));
        }
        self.event_source = Some(window);
        Ok(())
    }

    /// Clears the event-source tag.
    pub fn clear_event_source(&mut self) {
        self.event_source = None;
    }

    /// Returns the currently tagged event source, if any.
    #[must_use]
    pub fn event_source(&self) -> Option<WindowId> {
        self.event_source
    }

    /// Routes a key event to the tagged event source.
    ///
    /// Returns true when a window received the event.
    pub fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        match self.event_source {
            Some(id) => self.send_key_event_to(id, event),
            None => false,
        }
    }

    /// Enables or disables input routing to a window.
    pub fn set_window_enabled(&mut self, window: WindowId, enabled: bool) -> UiResult<()> {
        match self.records.get_mut(&window) {
            Some(record) => {
                if enabled {
                    record.flags.enable(WindowFlags::ENABLED);
                } else {
                    record.flags.disable(WindowFlags::ENABLED);
                }
                Ok(())
            }
            None => Err(UiError::WindowNotFound(window)),
        }
    }

    /// Returns true when the window accepts input.
    #[must_use]
    pub fn is_window_enabled(&self, window: WindowId) -> bool {
        self.records
            .get(&window)
            .is_some_and(|r| r.flags.is_enabled(WindowFlags::ENABLED))
    }

    /// Routes a key event to a specific window.
    ///
    /// Disabled windows do not receive input.
    pub fn send_key_event_to(&mut self, window: WindowId, event: &KeyEvent) -> bool {
        if !self.is_window_enabled(window) {
            return false;
        }
        let Some(mut win) = self.records.get_mut(&window).and_then(|r| r.window.take()) else {
            return false;
        };
        win.on_key_event(event);
        if let Some(record) = self.records.get_mut(&window) {
            record.window = Some(win);
        }
        true
    }

    /// Returns the window currently holding the pointer capture, if any.
    #[must_use]
    pub fn pointer_capture(&self) -> Option<WindowId> {
        self.pointer_capture
    }

    /// Routes a pointer event into the tree.
    ///
    /// While a window holds the pointer capture every event goes straight
    /// to it (an `Up` releases the capture). Otherwise the position is
    /// hit-tested against the arranged rectangles, topmost drawn window
    /// first; unconsumed events bubble toward the root. A consumed `Down`
    /// captures the pointer. Returns true when a window consumed the event.
    pub fn send_pointer_event(&mut self, event: &PointerEvent) -> bool {
        if let Some(captured) = self.pointer_capture {
            if self.records.contains_key(&captured) {
                let origin = self.screen_position(captured);
                let consumed = self.deliver_pointer(captured, event, origin);
                if event.phase == PointerPhase::Up {
                    self.pointer_capture = None;
                }
                return consumed;
            }
            self.pointer_capture = None;
        }

        let mut target = self.hit_test(event.position);
        while let Some((id, origin)) = target {
            if self.deliver_pointer(id, event, origin) {
                if event.phase == PointerPhase::Down {
                    self.pointer_capture = Some(id);
                }
                return true;
            }
            target = self
                .records
                .get(&id)
                .and_then(|r| r.parent.map(|p| (p, origin - r.cache.content_rect.top_left())));
        }
        false
    }

    /// Delivers a selection event to its source window.
    pub fn send_select_event(&mut self, event: &WindowSelectEvent) -> bool {
        let Some(mut win) = self.records.get_mut(&event.source).and_then(|r| r.window.take()) else {
            return false;
        };
        win.on_select(event);
        if let Some(record) = self.records.get_mut(&event.source) {
            record.window = Some(win);
        }
        true
    }

    /// Delivers a content-changed notification to its source window.
    pub fn send_content_changed_event(&mut self, event: &WindowContentChangedEvent) -> bool {
        let Some(mut win) = self.records.get_mut(&event.source).and_then(|r| r.window.take()) else {
            return false;
        };
        win.on_content_changed(event);
        if let Some(record) = self.records.get_mut(&event.source) {
            record.window = Some(win);
        }
        true
    }

    /// Grants mutable access to a window implementation by concrete type.
    ///
    /// Returns `None` when the id is dead or the type does not match.
    pub fn with_window<W: Window + 'static, R>(&mut self, window: WindowId, f: impl FnOnce(&mut W) -> R) -> Option<R> {
        let mut win = self.records.get_mut(&window)?.window.take()?;
        let result = win.as_any_mut().downcast_mut::<W>().map(f);
        if let Some(record) = self.records.get_mut(&window) {
            record.window = Some(win);
        }
        result
    }

    /// Returns a window's layout properties.
    #[must_use]
    pub fn properties(&self, window: WindowId) -> Option<&WindowProperties> {
        self.records.get(&window).map(|r| &r.props)
    }

    /// Modifies a window's layout properties and marks it dirty.
    pub fn modify_properties(&mut self, window: WindowId, f: impl FnOnce(&mut WindowProperties)) -> UiResult<()> {
        match self.records.get_mut(&window) {
            Some(record) => {
                f(&mut record.props);
                self.mark_layout_dirty(window);
                Ok(())
            }
            None => Err(UiError::WindowNotFound(window)),
        }
    }

    /// Returns a window's layout cache.
    #[must_use]
    pub fn layout_info(&self, window: WindowId) -> Option<&LayoutCache> {
        self.records.get(&window).map(|r| &r.cache)
    }

    /// Returns the ids of a window's children, oldest first.
    #[must_use]
    pub fn children(&self, window: WindowId) -> &[WindowId] {
        self.records.get(&window).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Marks a window and all its ancestors as needing layout.
    pub fn mark_layout_dirty(&mut self, window: WindowId) {
        let mut current = Some(window);
        while let Some(id) = current {
            match self.records.get_mut(&id) {
                Some(record) => {
                    record.flags.enable(WindowFlags::LAYOUT_DIRTY);
                    current = record.parent;
                }
                None => break,
            }
        }
    }

    /// Runs the two-pass layout for the whole tree.
    pub fn perform_layout(&mut self, window_size: PxSize2D) {
        let root = self.root;
        self.measure_window(root, PxAvailableSize::from_size(window_size));
        self.arrange_window(root, PxRectangle::new(0, 0, window_size.width(), window_size.height()));
    }

    /// Advances animations on every window and tears down finished closes.
    ///
    /// Returns true while any animation is still in flight.
    pub fn update(&mut self, delta: TransitionTimeSpan) -> bool {
        for id in self.collect_dfs() {
            let Some(mut win) = self.records.get_mut(&id).and_then(|r| r.window.take()) else {
                continue;
            };
            win.update_animation(delta);
            if let Some(record) = self.records.get_mut(&id) {
                record.window = Some(win);
            }
        }
        self.update_animation_state(false)
    }

    /// Settles animation state and removes closing subtrees that finished.
    ///
    /// `force_complete` jumps every animation to its target so pending
    /// closes are torn down immediately. Returns true while any animation
    /// is still in flight.
    pub fn update_animation_state(&mut self, force_complete: bool) -> bool {
        let ids = self.collect_dfs();
        let mut active = HashMap::with_capacity(ids.len());
        let mut any_active = false;
        for &id in &ids {
            let Some(mut win) = self.records.get_mut(&id).and_then(|r| r.window.take()) else {
                continue;
            };
            let is_active = win.update_animation_state(force_complete);
            if let Some(record) = self.records.get_mut(&id) {
                record.window = Some(win);
            }
            active.insert(id, is_active);
            any_active |= is_active;
        }

        // Closing subtree roots: closing windows whose parent is not closing.
        let candidates: Vec<WindowId> = ids
            .iter()
            .copied()
            .filter(|id| {
                let Some(record) = self.records.get(id) else { return false };
                record.flags.is_enabled(WindowFlags::CLOSING)
                    && !record
                        .parent
                        .and_then(|p| self.records.get(&p))
                        .is_some_and(|p| p.flags.is_enabled(WindowFlags::CLOSING))
            })
            .collect();

        for candidate in candidates {
            let subtree = self.collect_subtree(candidate);
            let idle = force_complete || subtree.iter().all(|id| !active.get(id).copied().unwrap_or(false));
            if idle {
                self.remove_subtree(candidate, &subtree);
            }
        }
        any_active
    }

    /// Queries (and, under `force_complete`, settles) the animation state
    /// of the subtree rooted at `window`.
    ///
    /// Returns true while any window in the subtree reports an animation
    /// in flight. Unlike [`Self::update_animation_state`] this never tears
    /// down closing windows.
    pub fn is_subtree_animating(&mut self, window: WindowId, force_complete: bool) -> bool {
        let subtree = self.collect_subtree(window);
        let mut active = false;
        for id in subtree {
            let Some(mut win) = self.records.get_mut(&id).and_then(|r| r.window.take()) else {
                continue;
            };
            active |= win.update_animation_state(force_complete);
            if let Some(record) = self.records.get_mut(&id) {
                record.window = Some(win);
            }
        }
        active
    }

    /// Emits draw commands for every visible window, depth first.
    pub fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        self.draw_window(self.root, PxPoint2::ZERO, ctx);
    }

    // ---------------------------------------------------------------------
    // measure / arrange
    // ---------------------------------------------------------------------

    pub(crate) fn measure_window(&mut self, id: WindowId, available: PxAvailableSize) -> PxSize2D {
        let (dirty, cached, visibility, margin, fixed_width, fixed_height) = match self.records.get(&id) {
            Some(record) => (
                record.flags.is_enabled(WindowFlags::LAYOUT_DIRTY),
                record.cache.last_measure_available == Some(available),
                record.props.visibility,
                record.props.margin,
                record.props.width,
                record.props.height,
            ),
            None => return PxSize2D::ZERO,
        };
        if !dirty && cached {
            return self.records[&id].cache.desired_size;
        }

        if visibility == ItemVisibility::Collapsed {
            if let Some(record) = self.records.get_mut(&id) {
                record.cache.last_measure_available = Some(available);
                record.cache.desired_size = PxSize2D::ZERO;
            }
            return PxSize2D::ZERO;
        }

        let margin_size = margin.sum();
        let local_available = available.subtract(margin_size);

        let Some(mut win) = self.records.get_mut(&id).and_then(|r| r.window.take()) else {
            return self.records.get(&id).map(|r| r.cache.desired_size).unwrap_or(PxSize2D::ZERO);
        };
        let child_ids = self.records.get(&id).map(|r| r.children.clone()).unwrap_or_default();
        let mut children = LayoutChildren { mgr: self, ids: child_ids };
        let mut content = win.measure_override(&mut children, local_available);

        if let Some(width) = fixed_width {
            content.set_width(width);
        }
        if let Some(height) = fixed_height {
            content.set_height(height);
        }
        let desired = content.add(margin_size);

        if let Some(record) = self.records.get_mut(&id) {
            record.window = Some(win);
            record.cache.last_measure_available = Some(available);
            record.cache.desired_size = desired;
        }
        desired
    }

    pub(crate) fn arrange_window(&mut self, id: WindowId, final_rect: PxRectangle) {
        let (dirty, cached, visibility, margin, alignment_x, alignment_y, desired) = match self.records.get(&id) {
            Some(record) => (
                record.flags.is_enabled(WindowFlags::LAYOUT_DIRTY),
                record.cache.last_arrange_rect == Some(final_rect),
                record.props.visibility,
                record.props.margin,
                record.props.alignment_x,
                record.props.alignment_y,
                record.cache.desired_size,
            ),
            None => return,
        };
        if !dirty && cached {
            return;
        }

        if visibility == ItemVisibility::Collapsed {
            if let Some(record) = self.records.get_mut(&id) {
                record.cache.last_arrange_rect = Some(final_rect);
                record.cache.content_rect = PxRectangle::EMPTY;
                record.cache.clipped_content_rect = PxRectangle::EMPTY;
                record.cache.render_size = PxSize2D::ZERO;
                record.flags.disable(WindowFlags::LAYOUT_DIRTY);
            }
            return;
        }

        let margin_size = margin.sum();
        use crate::window::ItemAlignment;
        let space = PxSize2D::new(
            if alignment_x == ItemAlignment::Stretch {
                final_rect.width()
            } else {
                desired.width()
            },
            if alignment_y == ItemAlignment::Stretch {
                final_rect.height()
            } else {
                desired.height()
            },
        );
        let arrange_size = space.subtract(margin_size);

        let Some(mut win) = self.records.get_mut(&id).and_then(|r| r.window.take()) else {
            return;
        };
        let child_ids = self.records.get(&id).map(|r| r.children.clone()).unwrap_or_default();
        let mut children = LayoutChildren { mgr: self, ids: child_ids };
        let render_size = win.arrange_override(&mut children, arrange_size);

        let actual_available = PxSize2D::new(final_rect.width() - margin_size.width(), final_rect.height() - margin_size.height());
        let delta_x = actual_available.width() - render_size.width();
        let delta_y = actual_available.height() - render_size.height();
        let offset_x = alignment_x.calc_alignment_px(delta_x);
        let offset_y = alignment_y.calc_alignment_px(delta_y);

        let pos = PxPoint2::new(final_rect.x + margin.left + offset_x, final_rect.y + margin.top + offset_y);
        let content_rect = PxRectangle::from_point_size(pos, render_size);

        if let Some(record) = self.records.get_mut(&id) {
            record.window = Some(win);
            record.cache.last_arrange_rect = Some(final_rect);
            record.cache.content_rect = content_rect;
            record.cache.clipped_content_rect = PxRectangle::intersect(content_rect, final_rect);
            record.cache.render_size = render_size;
            record.flags.disable(WindowFlags::LAYOUT_DIRTY);
        }
    }

    // ---------------------------------------------------------------------
    // internals
    // ---------------------------------------------------------------------

    fn draw_window(&mut self, id: WindowId, origin: PxPoint2, ctx: &mut DrawContext<'_>) {
        let (visibility, rect, children) = match self.records.get(&id) {
            Some(record) => (record.props.visibility, record.cache.content_rect, record.children.clone()),
            None => return,
        };
        // Hidden and collapsed windows hide their whole subtree; collapsed
        // children were never arranged.
        if visibility != ItemVisibility::Visible {
            return;
        }
        let screen_rect = PxRectangle::new(origin.x + rect.x, origin.y + rect.y, rect.width(), rect.height());
        if let Some(mut win) = self.records.get_mut(&id).and_then(|r| r.window.take()) {
            ctx.begin_window(id, screen_rect);
            win.draw(ctx);
            if let Some(record) = self.records.get_mut(&id) {
                record.window = Some(win);
            }
        }
        for child in children {
            self.draw_window(child, screen_rect.top_left(), ctx);
        }
    }

    /// Returns the window's top-left corner in screen pixels.
    fn screen_position(&self, window: WindowId) -> PxPoint2 {
        let mut position = PxPoint2::ZERO;
        let mut current = Some(window);
        while let Some(id) = current {
            match self.records.get(&id) {
                Some(record) => {
                    position = position + record.cache.content_rect.top_left();
                    current = record.parent;
                }
                None => break,
            }
        }
        position
    }

    /// Finds the deepest, topmost-drawn window containing `position`.
    ///
    /// Returns the hit window and its screen top-left. Hidden, collapsed
    /// and disabled subtrees are skipped.
    fn hit_test(&self, position: PxPoint2) -> Option<(WindowId, PxPoint2)> {
        self.hit_test_window(self.root, PxPoint2::ZERO, position)
    }

    fn hit_test_window(&self, id: WindowId, origin: PxPoint2, position: PxPoint2) -> Option<(WindowId, PxPoint2)> {
        let record = self.records.get(&id)?;
        if record.props.visibility != ItemVisibility::Visible || !record.flags.is_enabled(WindowFlags::ENABLED) {
            return None;
        }
        let rect = record.cache.content_rect;
        let screen = PxRectangle::new(origin.x + rect.x, origin.y + rect.y, rect.width(), rect.height());
        if !screen.contains(position.x, position.y) {
            return None;
        }
        // Later children draw on top, so they hit first.
        for &child in record.children.iter().rev() {
            if let Some(hit) = self.hit_test_window(child, screen.top_left(), position) {
                return Some(hit);
            }
        }
        Some((id, screen.top_left()))
    }

    fn deliver_pointer(&mut self, id: WindowId, event: &PointerEvent, screen_position: PxPoint2) -> bool {
        if !self.is_window_enabled(id) {
            return false;
        }
        let Some(mut win) = self.records.get_mut(&id).and_then(|r| r.window.take()) else {
            return false;
        };
        let local = event.position - screen_position;
        let consumed = win.on_pointer_event(event, local);
        if let Some(record) = self.records.get_mut(&id) {
            record.window = Some(win);
        }
        consumed
    }

    fn mark_subtree_closing(&mut self, window: WindowId) {
        let mut stack = vec![window];
        while let Some(id) = stack.pop() {
            if let Some(record) = self.records.get_mut(&id) {
                record.flags.enable(WindowFlags::CLOSING);
                stack.extend(record.children.iter().copied());
            }
        }
    }

    fn collect_dfs(&self) -> Vec<WindowId> {
        let mut out = Vec::with_capacity(self.records.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(record) = self.records.get(&id) {
                out.push(id);
                for &child in record.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }

    fn collect_subtree(&self, root: WindowId) -> Vec<WindowId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(record) = self.records.get(&id) {
                out.push(id);
                stack.extend(record.children.iter().copied());
            }
        }
        out
    }

    fn remove_subtree(&mut self, root: WindowId, subtree: &[WindowId]) {
        let parent = self.records.get(&root).and_then(|r| r.parent);
        for id in subtree {
            self.records.remove(id);
            if self.event_source == Some(*id) {
                self.event_source = None;
            }
            if self.pointer_capture == Some(*id) {
                self.pointer_capture = None;
            }
        }
        if let Some(parent) = parent {
            if let Some(record) = self.records.get_mut(&parent) {
                record.children.retain(|c| *c != root);
            }
            self.mark_layout_dirty(parent);
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable view of a window's children during a layout callback.
///
/// Handed to [`Window::measure_override`] and [`Window::arrange_override`]
/// so composite windows can recurse into their children while the tree is
/// borrowed.
pub struct LayoutChildren<'a> {
    mgr: &'a mut WindowManager,
    ids: Vec<WindowId>,
}

impl LayoutChildren<'_> {
    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the id of the child at `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> WindowId {
        self.ids[index]
    }

    /// Measures the child at `index`, returning its desired size
    /// (margin included).
    pub fn measure_at(&mut self, index: usize, available: PxAvailableSize) -> PxSize2D {
        self.mgr.measure_window(self.ids[index], available)
    }

    /// Returns the desired size cached by the last measure of the child.
    #[must_use]
    pub fn desired_size_at(&self, index: usize) -> PxSize2D {
        self.mgr
            .layout_info(self.ids[index])
            .map(|c| c.desired_size)
            .unwrap_or(PxSize2D::ZERO)
    }

    /// Arranges the child at `index` into `rect` (parent-content relative).
    pub fn arrange_at(&mut self, index: usize, rect: PxRectangle) {
        self.mgr.arrange_window(self.ids[index], rect);
    }

    /// Returns the visibility of the child at `index`.
    #[must_use]
    pub fn visibility_at(&self, index: usize) -> ItemVisibility {
        self.mgr
            .properties(self.ids[index])
            .map(|p| p.visibility)
            .unwrap_or(ItemVisibility::Collapsed)
    }
}
