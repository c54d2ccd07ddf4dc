//! Slider logic: constrained values, pixel-span mapping and drag state.
//!
//! All three pieces are pure state machines with no rendering or tree
//! dependencies; slider-like controls (sliders, resize handles) compose
//! them and feed in pixel positions from input events.

/// Numeric behavior needed by [`SliderConstrainedValue`].
pub trait SliderValue: Copy + PartialOrd + PartialEq {
    /// The zero value (disabled tick frequency).
    const ZERO: Self;

    /// Clamps to `[min, max]`.
    #[must_use]
    fn clamp_value(self, min: Self, max: Self) -> Self;

    /// Snaps to the nearest tick counted from `min`, clamped to the range.
    /// A non-positive `tick` disables snapping.
    #[must_use]
    fn snap(self, min: Self, max: Self, tick: Self) -> Self;

    /// Maps a `[0, 1]` percentage into the range.
    #[must_use]
    fn from_percentage(percentage: f32, min: Self, max: Self) -> Self;

    /// Maps the value to a `[0, 1]` percentage of the range (0 when empty).
    #[must_use]
    fn to_percentage(self, min: Self, max: Self) -> f32;
}

impl SliderValue for f32 {
    const ZERO: Self = 0.0;

    fn clamp_value(self, min: Self, max: Self) -> Self {
        self.clamp(min, max)
    }

    fn snap(self, min: Self, max: Self, tick: Self) -> Self {
        if tick <= 0.0 {
            return self;
        }
        (((self - min) / tick).round() * tick + min).clamp(min, max)
    }

    fn from_percentage(percentage: f32, min: Self, max: Self) -> Self {
        min + (max - min) * percentage
    }

    fn to_percentage(self, min: Self, max: Self) -> f32 {
        if max > min {
            (self - min) / (max - min)
        } else {
            0.0
        }
    }
}

impl SliderValue for i32 {
    const ZERO: Self = 0;

    fn clamp_value(self, min: Self, max: Self) -> Self {
        self.clamp(min, max)
    }

    fn snap(self, min: Self, max: Self, tick: Self) -> Self {
        if tick <= 0 {
            return self;
        }
        let offset = self - min;
        (min + ((offset + tick / 2) / tick) * tick).clamp(min, max)
    }

    fn from_percentage(percentage: f32, min: Self, max: Self) -> Self {
        min + (((max - min) as f32) * percentage).round() as i32
    }

    fn to_percentage(self, min: Self, max: Self) -> f32 {
        if max > min {
            (self - min) as f32 / (max - min) as f32
        } else {
            0.0
        }
    }
}

impl SliderValue for u8 {
    const ZERO: Self = 0;

    fn clamp_value(self, min: Self, max: Self) -> Self {
        self.clamp(min, max)
    }

    fn snap(self, min: Self, max: Self, tick: Self) -> Self {
        if tick == 0 {
            return self;
        }
        let offset = i32::from(self) - i32::from(min);
        let tick = i32::from(tick);
        let snapped = i32::from(min) + ((offset + tick / 2) / tick) * tick;
        (snapped.clamp(i32::from(min), i32::from(max))) as u8
    }

    fn from_percentage(percentage: f32, min: Self, max: Self) -> Self {
        let span = f32::from(max) - f32::from(min);
        (f32::from(min) + span * percentage).round().clamp(0.0, 255.0) as u8
    }

    fn to_percentage(self, min: Self, max: Self) -> f32 {
        if max > min {
            (f32::from(self) - f32::from(min)) / (f32::from(max) - f32::from(min))
        } else {
            0.0
        }
    }
}

/// A value constrained to `[min, max]`, optionally snapped to ticks.
///
/// An inverted range collapses to `min = max = max`. The tick frequency is
/// kept in `[0, max]`; zero disables snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConstrainedValue<T: SliderValue> {
    value: T,
    min: T,
    max: T,
    tick_frequency: T,
}

impl<T: SliderValue> Default for SliderConstrainedValue<T> {
    fn default() -> Self {
        Self {
            value: T::ZERO,
            min: T::ZERO,
            max: T::ZERO,
            tick_frequency: T::ZERO,
        }
    }
}

impl<T: SliderValue> SliderConstrainedValue<T> {
    /// Creates a value pinned to `min` of the (corrected) range.
    #[must_use]
    pub fn from_range(min: T, max: T) -> Self {
        Self::with_tick(min, min, max, T::ZERO)
    }

    /// Creates a constrained value without tick snapping.
    #[must_use]
    pub fn new(value: T, min: T, max: T) -> Self {
        Self::with_tick(value, min, max, T::ZERO)
    }

    /// Creates a constrained value with tick snapping.
    #[must_use]
    pub fn with_tick(value: T, min: T, max: T, tick_frequency: T) -> Self {
        // An inverted range collapses to the larger endpoint.
        let (min, max) = if min > max { (min, min) } else { (min, max) };
        let tick_frequency = if tick_frequency < T::ZERO {
            T::ZERO
        } else if tick_frequency > max {
            max
        } else {
            tick_frequency
        };
        let value = value.clamp_value(min, max).snap(min, max, tick_frequency);
        Self {
            value,
            min,
            max,
            tick_frequency,
        }
    }

    /// Returns the current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }

    /// Returns the range minimum.
    #[inline]
    #[must_use]
    pub fn min(&self) -> T {
        self.min
    }

    /// Returns the range maximum.
    #[inline]
    #[must_use]
    pub fn max(&self) -> T {
        self.max
    }

    /// Returns the tick frequency (zero when snapping is disabled).
    #[inline]
    #[must_use]
    pub fn tick_frequency(&self) -> T {
        self.tick_frequency
    }

    /// Returns the center of the range.
    #[must_use]
    pub fn center(&self) -> T {
        T::from_percentage(0.5, self.min, self.max)
    }

    /// Sets the value, clamping and snapping; returns true when it changed.
    pub fn set(&mut self, value: T) -> bool {
        let value = value.clamp_value(self.min, self.max).snap(self.min, self.max, self.tick_frequency);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Replaces the range, re-clamping the value; returns true on change.
    pub fn set_range(&mut self, min: T, max: T) -> bool {
        let (min, max) = if min > max { (min, min) } else { (min, max) };
        let changed = min != self.min || max != self.max;
        self.min = min;
        self.max = max;
        let value_changed = self.set(self.value);
        changed || value_changed
    }

    /// Returns the value as a `[0, 1]` percentage of the range.
    #[must_use]
    pub fn get_percentage(&self) -> f32 {
        self.value.to_percentage(self.min, self.max)
    }

    /// Sets the value from a percentage (clamped to `[0, 1]`).
    pub fn set_percentage(&mut self, percentage: f32) -> bool {
        let percentage = percentage.clamp(0.0, 1.0);
        self.set(T::from_percentage(percentage, self.min, self.max))
    }
}

/// Describes the pixel span a slider maps its percentage onto.
///
/// The span covers `length_px` pixels starting at `start_px`; the pixel at
/// `start_px + length_px` is out of bounds, so the usable positions are
/// `start_px ..= start_px + length_px - 1`. A reversed span flips the
/// mapping direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderPixelSpanInfo {
    start_px: i32,
    length_px: i32,
    reversed: bool,
}

impl SliderPixelSpanInfo {
    /// Creates a span.
    #[must_use]
    pub fn new(start_px: i32, length_px: i32, reversed: bool) -> Self {
        Self {
            start_px,
            length_px: length_px.max(0),
            reversed,
        }
    }

    /// Creates a forward span.
    #[must_use]
    pub fn forward(start_px: i32, length_px: i32) -> Self {
        Self::new(start_px, length_px, false)
    }

    /// Returns the first pixel of the span.
    #[inline]
    #[must_use]
    pub fn start_px(&self) -> i32 {
        self.start_px
    }

    /// Returns the span length in pixels.
    #[inline]
    #[must_use]
    pub fn length_px(&self) -> i32 {
        self.length_px
    }

    /// Returns true when the mapping direction is flipped.
    #[inline]
    #[must_use]
    pub fn is_reversed_direction(&self) -> bool {
        self.reversed
    }

    /// Maps a pixel position to a `[0, 1]` percentage (clamped).
    #[must_use]
    pub fn calculate_percentage(&self, position_px: i32) -> f32 {
        if self.length_px <= 1 {
            return 0.0;
        }
        let percentage = ((position_px - self.start_px) as f32 / (self.length_px - 1) as f32).clamp(0.0, 1.0);
        if self.reversed {
            1.0 - percentage
        } else {
            percentage
        }
    }

    /// Maps a `[0, 1]` percentage to a pixel position (rounded).
    #[must_use]
    pub fn calculate_position_px(&self, percentage: f32) -> i32 {
        let percentage = percentage.clamp(0.0, 1.0);
        let percentage = if self.reversed { 1.0 - percentage } else { percentage };
        if self.length_px <= 1 {
            return self.start_px;
        }
        self.start_px + (percentage * (self.length_px - 1) as f32).round() as i32
    }
}

/// Flags describing what a [`SliderDragLogic::set_enabled`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderResultFlags(u32);

impl SliderResultFlags {
    /// No state change occurred.
    pub const NO_FLAGS: Self = Self(0);
    /// The enable state changed.
    pub const COMPLETED: u32 = 1 << 0;
    /// An in-flight drag was cancelled (value restored).
    pub const DRAG_CANCELLED: u32 = 1 << 1;

    /// Returns true when `flag` is set.
    #[must_use]
    pub const fn is_flagged(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    const fn with(self, flag: u32) -> Self {
        Self(self.0 | flag)
    }
}

/// The `Idle ⇄ Dragging` state machine behind slider thumbs.
#[derive(Debug, Clone)]
pub struct SliderDragLogic {
    span_info: SliderPixelSpanInfo,
    percentage: f32,
    drag_start_percentage: f32,
    last_position_px: i32,
    dragging: bool,
    enabled: bool,
}

impl Default for SliderDragLogic {
    fn default() -> Self {
        Self::new(SliderPixelSpanInfo::default())
    }
}

impl SliderDragLogic {
    /// Creates idle, enabled drag logic over the given span.
    #[must_use]
    pub fn new(span_info: SliderPixelSpanInfo) -> Self {
        Self {
            span_info,
            percentage: 0.0,
            drag_start_percentage: 0.0,
            last_position_px: span_info.start_px(),
            dragging: false,
            enabled: true,
        }
    }

    /// Returns true while a drag is active.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns true while the logic accepts drags.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the current percentage.
    #[inline]
    #[must_use]
    pub fn get_percentage(&self) -> f32 {
        self.percentage
    }

    /// Returns the pixel position for a percentage under the current span.
    #[must_use]
    pub fn get_position_px(&self, percentage: f32) -> i32 {
        self.span_info.calculate_position_px(percentage)
    }

    /// Returns the active span mapping.
    #[inline]
    #[must_use]
    pub fn span_info(&self) -> SliderPixelSpanInfo {
        self.span_info
    }

    /// Replaces the span mapping; returns true when it actually changed.
    ///
    /// During a drag the percentage is recomputed from the last known pixel
    /// position under the new span, so the thumb tracks the pointer.
    pub fn set_span_info(&mut self, span_info: SliderPixelSpanInfo) -> bool {
        if span_info == self.span_info {
            return false;
        }
        self.span_info = span_info;
        if self.dragging {
            self.percentage = self.span_info.calculate_percentage(self.last_position_px);
        }
        true
    }

    /// Sets the percentage directly (clamped); returns true on change.
    pub fn set_percentage(&mut self, percentage: f32) -> bool {
        let percentage = percentage.clamp(0.0, 1.0);
        let changed = percentage != self.percentage;
        self.percentage = percentage;
        changed
    }

    /// Begins a drag at the given pixel position.
    ///
    /// Fails when disabled. Any previous drag is cancelled first; the
    /// current percentage is recorded so a cancel can roll back.
    pub fn try_begin_drag(&mut self, position_px: i32) -> bool {
        if !self.enabled {
            return false;
        }
        if self.dragging {
            self.cancel_drag();
        }
        self.drag_start_percentage = self.percentage;
        self.dragging = true;
        self.last_position_px = position_px;
        self.percentage = self.span_info.calculate_percentage(position_px);
        true
    }

    /// Continues a drag; a no-op unless dragging.
    pub fn try_drag(&mut self, position_px: i32) -> bool {
        if !self.enabled || !self.dragging {
            return false;
        }
        self.last_position_px = position_px;
        self.percentage = self.span_info.calculate_percentage(position_px);
        true
    }

    /// Ends a drag at the given position; a no-op unless dragging.
    pub fn end_drag(&mut self, position_px: i32) -> bool {
        if !self.enabled || !self.dragging {
            return false;
        }
        self.last_position_px = position_px;
        self.percentage = self.span_info.calculate_percentage(position_px);
        self.dragging = false;
        true
    }

    /// Cancels a drag, restoring the percentage captured at drag start.
    pub fn cancel_drag(&mut self) -> bool {
        if !self.enabled || !self.dragging {
            return false;
        }
        self.percentage = self.drag_start_percentage;
        self.dragging = false;
        true
    }

    /// Enables or disables the logic.
    ///
    /// Disabling mid-drag cancels the drag and restores the pre-drag
    /// percentage; the returned flags describe what happened.
    pub fn set_enabled(&mut self, enabled: bool) -> SliderResultFlags {
        if enabled == self.enabled {
            return SliderResultFlags::NO_FLAGS;
        }
        let mut flags = SliderResultFlags::NO_FLAGS.with(SliderResultFlags::COMPLETED);
        if !enabled && self.dragging {
            self.cancel_drag();
            flags = flags.with(SliderResultFlags::DRAG_CANCELLED);
        }
        self.enabled = enabled;
        flags
    }
}
