//! # Helio UI
//!
//! The retained-mode UI core of the Helio demo-application framework.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FRAME PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Input Events → Window Tree → Binding Sweep → Layout → Draw   │
//! │      ↓              ↓              ↓            ↓       ↓    │
//! │   Routing     Animation Update  Propagation  Measure  Mesh   │
//! │                                              Arrange  Bridge │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core is single-threaded and cooperatively scheduled: layout,
//! animation updates and draw all run synchronously inside the owning
//! application's per-frame calls. The only concurrency-flavored primitive
//! is the activity stack's one-shot result channel, and both of its ends
//! live on the UI thread.
//!
//! Rendering and input pumping are external collaborators: the core emits
//! draw commands through the [`render`] bridge traits and consumes events
//! delivered by the application.

pub mod activity;
pub mod binding;
pub mod color;
pub mod config;
pub mod controls;
pub mod error;
pub mod event;
pub mod layout;
pub mod render;
pub mod slider;
pub mod transition;
pub mod tree;
pub mod window;

pub use activity::{ActivityFuture, ActivityStack, ActivityState, PopResult};
pub use binding::{
    BindingCaps, BindingMode, ConverterBinding, DataBindingService, DependencyPropertyDefinition, PropertyHandle,
    PropertySetResult, PropertyValue, PropertyValueKind,
};
pub use color::UIRenderColor;
pub use config::UiConfig;
pub use error::{ActivityError, BindingError, ConfigError, UiError, UiResult};
pub use event::{KeyEvent, PointerEvent, PointerPhase, VirtualKey, WindowContentChangedEvent, WindowSelectEvent};
pub use layout::{GridDefinition, GridLayout, GridUnitType, LayoutOrientation, StackLayout};
pub use render::{BasicRenderSystem, DrawCommand, DrawContext, MeshHandle, NullRenderSystem, SpriteId, UIVertex};
pub use slider::{SliderConstrainedValue, SliderDragLogic, SliderPixelSpanInfo, SliderResultFlags};
pub use transition::{TransitionColor, TransitionPxRectangle, TransitionState, TransitionValue};
pub use tree::{LayoutChildren, WindowManager};
pub use window::{ContentControl, ItemAlignment, ItemVisibility, Window, WindowFlags, WindowId, WindowProperties};
