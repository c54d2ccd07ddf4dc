//! Error types for the UI core.
//!
//! Construction-time invariant violations surface as errors immediately;
//! per-frame operations (layout, animation updates, binding evaluation)
//! prefer non-throwing result codes so one bad call can never abort a
//! frame.

use thiserror::Error;

use crate::window::WindowId;

/// Errors raised by the window tree and its consumers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A caller violated an API contract.
    #[error("usage error: {0}")]
    UsageError(String),

    /// The referenced window is not a member of the tree.
    #[error("window {0:?} is not part of the tree")]
    WindowNotFound(WindowId),

    /// The referenced window has been disposed.
    #[error("window {0:?} has been disposed")]
    WindowDisposed(WindowId),
}

/// Result alias for tree operations.
pub type UiResult<T> = Result<T, UiError>;

/// Errors raised when establishing a binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The requested binding would create a cycle in the dependency graph.
    #[error("cyclic binding: {0}")]
    CyclicBinding(&'static str),

    /// A two-way binding source may not already be a one-way target.
    #[error("a two way binding source can not be the target of a one way binding")]
    TwoWayBindingSource,

    /// The referenced property handle is dead or out of range.
    #[error("unknown property handle")]
    UnknownProperty,

    /// A value's kind does not match the property definition.
    #[error("value kind does not match the property definition")]
    TypeMismatch,
}

/// Errors surfaced through an activity's result future.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    /// The stack was torn down while the activity was still pushed.
    #[error("activity canceled")]
    Canceled,

    /// An entry was popped without a recorded result. This signals a logic
    /// bug in the stack itself, not in the caller.
    #[error("activity popped without a result")]
    InternalError,
}

/// Errors raised while loading a [`crate::config::UiConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content did not parse or did not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
