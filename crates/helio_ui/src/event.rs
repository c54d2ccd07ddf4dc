//! Input event types consumed by the window tree.
//!
//! The UI core never pumps events itself; an external event source
//! delivers them and the window manager routes them to the tagged event
//! source window (or the activity stack front).

use helio_core::math::PxPoint2;

use crate::window::WindowId;

/// A keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualKey {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Space bar.
    Space,
    /// Tab key.
    Tab,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// A printable character.
    Char(char),
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: VirtualKey,
    /// True on press, false on release.
    pub pressed: bool,
}

impl KeyEvent {
    /// Creates a key-down event.
    #[must_use]
    pub const fn down(key: VirtualKey) -> Self {
        Self { key, pressed: true }
    }

    /// Creates a key-up event.
    #[must_use]
    pub const fn up(key: VirtualKey) -> Self {
        Self { key, pressed: false }
    }
}

/// Phase of a pointer (mouse/touch) interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// The pointer was pressed.
    Down,
    /// The pointer moved while pressed.
    Move,
    /// The pointer was released.
    Up,
}

/// A mouse or touch event, in screen pixels.
///
/// The window manager hit-tests `Down` events against the tree; a window
/// that consumes one captures the pointer and receives the following
/// `Move`/`Up` events regardless of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Position in screen pixels.
    pub position: PxPoint2,
    /// Interaction phase.
    pub phase: PointerPhase,
}

impl PointerEvent {
    /// Creates a press event.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self {
            position: PxPoint2::new(x, y),
            phase: PointerPhase::Down,
        }
    }

    /// Creates a move event.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self {
            position: PxPoint2::new(x, y),
            phase: PointerPhase::Move,
        }
    }

    /// Creates a release event.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self {
            position: PxPoint2::new(x, y),
            phase: PointerPhase::Up,
        }
    }
}

/// Raised when a window is selected (clicked/activated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSelectEvent {
    /// The window the selection originated from.
    pub source: WindowId,
    /// Control-defined payload identifying what was selected.
    pub content_id: u32,
}

/// Raised when a window's content changed (value edits, toggles).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowContentChangedEvent {
    /// The window whose content changed.
    pub source: WindowId,
    /// Control-defined payload describing the change.
    pub content_id: u32,
}
