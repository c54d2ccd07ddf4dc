//! Built-in controls.
//!
//! These are deliberately small: each one composes the core pieces
//! (slider logic, transitions, the render bridge) into a usable
//! [`Window`](crate::window::Window) implementation.

mod background;
mod slider;
mod toggle;

pub use background::BackgroundWindow;
pub use slider::SliderControl;
pub use toggle::ToggleControl;
