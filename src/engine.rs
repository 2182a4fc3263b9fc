//! Collaborator contracts: the pan/zoom engine, the resize notifier, and the
//! gesture events an engine reports back to its owner.
//!
//! The controller never calls into the DOM or a renderer itself. It drives an
//! engine through [`TransformEngine`] and learns about user input through
//! [`GestureEvent`]s that the host forwards from the engine.

use std::fmt;

use crate::config::ViewConfig;
use crate::transform::Point;

/// Identifies one engine binding (one `attach_surface` call).
///
/// Ids increase monotonically for the life of a controller, so an event tagged
/// with an older id belongs to an engine that has since been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(pub u64);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding#{}", self.0)
    }
}

/// Construction options handed to [`TransformEngine::bind`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Binding the engine must stamp on every [`GestureEvent`] it produces.
    pub binding: BindingId,
    pub pan_enabled: bool,
    pub zoom_enabled: bool,
    pub dbl_click_zoom_enabled: bool,
    /// Fit the surface into its container on construction.
    pub fit: bool,
    /// Center the surface in its container on construction.
    pub center: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Built-in zoom/reset buttons drawn by the engine.
    pub control_icons_enabled: bool,
}

impl EngineConfig {
    /// Options for a fresh binding.
    ///
    /// Pan and zoom always start enabled so the engine can auto-fit; the
    /// controller applies the host's pan toggle afterwards.
    #[must_use]
    pub fn for_binding(binding: BindingId, view: &ViewConfig) -> Self {
        Self {
            binding,
            pan_enabled: true,
            zoom_enabled: true,
            dbl_click_zoom_enabled: false,
            fit: view.fit,
            center: view.center,
            min_zoom: view.min_zoom,
            max_zoom: view.max_zoom,
            control_icons_enabled: false,
        }
    }

    /// Clamp a zoom factor into `[min_zoom, max_zoom]`.
    ///
    /// Never panics: with inverted bounds the upper bound wins.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }
}

/// What a user gesture changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// The pan offset moved; carries the new offset only.
    Pan(Point),
    /// The zoom factor changed; carries the new zoom only.
    Zoom(f64),
}

/// A user-driven change reported by an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub binding: BindingId,
    pub gesture: Gesture,
}

impl GestureEvent {
    #[must_use]
    pub fn pan(binding: BindingId, pan: Point) -> Self {
        Self { binding, gesture: Gesture::Pan(pan) }
    }

    #[must_use]
    pub fn zoom(binding: BindingId, zoom: f64) -> Self {
        Self { binding, gesture: Gesture::Zoom(zoom) }
    }
}

/// A pan/zoom engine bound to a single rendering surface.
///
/// Programmatic calls (`pan`, `zoom`, `reset`, ...) must not produce
/// [`GestureEvent`]s; only user input does.
pub trait TransformEngine {
    /// The rendering surface handle this engine binds to.
    type Surface;

    /// Create an engine bound to `surface`.
    fn bind(surface: &Self::Surface, config: &EngineConfig) -> Self
    where
        Self: Sized;

    fn pan(&mut self, pan: Point);
    fn zoom(&mut self, zoom: f64);
    fn get_pan(&self) -> Point;
    fn get_zoom(&self) -> f64;
    fn zoom_in(&mut self);
    fn zoom_out(&mut self);

    fn enable_pan(&mut self);
    fn disable_pan(&mut self);
    fn enable_zoom(&mut self);
    fn disable_zoom(&mut self);
    fn disable_dbl_click_zoom(&mut self);

    /// Recompute internal sizing after the container box changed.
    fn resize(&mut self);
    /// Return to the fitted, centered view.
    fn reset(&mut self);
}

/// Watches a surface and reports size changes to the host.
///
/// The notification itself is delivered out of band; the host reacts by
/// calling `ViewTransformController::handle_resize`.
pub trait ResizeNotifier {
    type Surface;

    fn observe(&mut self, surface: &Self::Surface);
    fn disconnect(&mut self);
}
