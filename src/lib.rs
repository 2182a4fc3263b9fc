//! Pan/zoom view state for an interactive diagram surface.
//!
//! This crate sits between a host application and a pan/zoom engine. It owns
//! the lifecycle of the engine bound to the current diagram surface, records
//! the transform the user produced, decides whether a newly attached surface
//! restores a saved transform or fits itself, and keeps the view consistent
//! when the container is resized. Gesture recognition and rendering stay in
//! the engine; persistence stays in the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::ViewTransformController`], the state machine |
//! | [`engine`] | Engine / resize-notifier traits and gesture events |
//! | [`transform`] | Point, size, and transform value types |
//! | [`config`] | [`config::ViewConfig`] and environment parsing |
//! | [`headless`] | DOM-free engine and notifier used by the CLI and tests |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants (zoom limits, reset zoom, etc.) |

pub mod config;
pub mod consts;
pub mod controller;
pub mod engine;
pub mod error;
pub mod headless;
pub mod transform;

pub use config::ViewConfig;
pub use controller::{ChangeListener, ListenerId, ViewTransformController};
pub use engine::{BindingId, EngineConfig, Gesture, GestureEvent, ResizeNotifier, TransformEngine};
pub use error::{ConfigError, ViewError};
pub use transform::{InitialTransform, Point, Size, Transform};
