//! In-memory engine and resize notifier.
//!
//! `HeadlessEngine` implements [`TransformEngine`] without a DOM: it tracks a
//! viewport box and a content box and does the fit/center math itself. The CLI
//! replays scripts through it and the tests use it as a realistic engine.
//!
//! Zoom is reported relative to the fitted scale, so `1.0` always means
//! "fitted", whatever the box sizes are. Pan is the screen offset of the
//! content origin.

#[cfg(test)]
#[path = "headless_test.rs"]
mod headless_test;

use crate::consts::{DBL_CLICK_ZOOM_FACTOR, ZOOM_SENSITIVITY};
use crate::engine::{BindingId, EngineConfig, GestureEvent, ResizeNotifier, TransformEngine};
use crate::transform::{Point, Size, is_usable_zoom};

/// A surface as the headless engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    pub id: String,
    /// The container box the surface is shown in.
    pub viewport: Size,
    /// The natural size of the diagram.
    pub content: Size,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(id: impl Into<String>, viewport: Size, content: Size) -> Self {
        Self { id: id.into(), viewport, content }
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    surface_id: String,
    /// Options the engine was bound with; the toggles below start from it.
    config: EngineConfig,
    viewport: Size,
    content: Size,
    /// Real scale that corresponds to a relative zoom of 1.0.
    fit_scale: f64,
    zoom: f64,
    pan: Point,
    pan_enabled: bool,
    zoom_enabled: bool,
    dbl_click_zoom_enabled: bool,
}

impl HeadlessEngine {
    // --- Host plumbing ---

    /// Change the container box. The caller is expected to follow up with a
    /// resize notification.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    // --- User input ---

    /// Drag the view by `delta` screen pixels.
    pub fn drag_by(&mut self, delta: Point) -> Option<GestureEvent> {
        if !self.pan_enabled || !delta.is_finite() {
            return None;
        }
        self.pan = Point::new(self.pan.x + delta.x, self.pan.y + delta.y);
        Some(GestureEvent::pan(self.config.binding, self.pan))
    }

    /// Scale the view by `factor` around the screen point `at`.
    pub fn wheel_zoom(&mut self, at: Point, factor: f64) -> Option<GestureEvent> {
        if !self.zoom_enabled || !is_usable_zoom(factor) || !at.is_finite() {
            return None;
        }
        self.zoom_at(at, self.zoom * factor);
        Some(GestureEvent::zoom(self.config.binding, self.zoom))
    }

    /// Double-click zoom around `at`; ignored unless double-click zoom is on.
    pub fn double_click(&mut self, at: Point) -> Option<GestureEvent> {
        if !self.dbl_click_zoom_enabled || !self.zoom_enabled {
            return None;
        }
        self.wheel_zoom(at, DBL_CLICK_ZOOM_FACTOR)
    }

    // --- Queries ---

    #[must_use]
    pub fn surface_id(&self) -> &str {
        &self.surface_id
    }

    #[must_use]
    pub fn binding(&self) -> BindingId {
        self.config.binding
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn content(&self) -> Size {
        self.content
    }

    /// Scale actually applied to the content (fit scale times zoom).
    #[must_use]
    pub fn real_scale(&self) -> f64 {
        self.fit_scale * self.zoom
    }

    #[must_use]
    pub fn is_pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    #[must_use]
    pub fn is_zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    #[must_use]
    pub fn is_dbl_click_zoom_enabled(&self) -> bool {
        self.dbl_click_zoom_enabled
    }

    // --- Math ---

    fn compute_fit_scale(&self) -> f64 {
        if !self.config.fit || self.viewport.is_empty() || self.content.is_empty() {
            return 1.0;
        }
        (self.viewport.width / self.content.width).min(self.viewport.height / self.content.height)
    }

    fn centered_pan(&self, scale: f64) -> Point {
        if !self.config.center {
            return Point::default();
        }
        Point::new(
            (self.viewport.width - self.content.width * scale) / 2.0,
            (self.viewport.height - self.content.height * scale) / 2.0,
        )
    }

    fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Zoom to `zoom` (clamped) keeping the content under `at` fixed on screen.
    fn zoom_at(&mut self, at: Point, zoom: f64) {
        let zoom = self.config.clamp_zoom(zoom);
        let ratio = zoom / self.zoom;
        self.pan = Point::new(at.x - (at.x - self.pan.x) * ratio, at.y - (at.y - self.pan.y) * ratio);
        self.zoom = zoom;
    }
}

impl TransformEngine for HeadlessEngine {
    type Surface = HeadlessSurface;

    fn bind(surface: &HeadlessSurface, config: &EngineConfig) -> Self {
        let mut engine = Self {
            surface_id: surface.id.clone(),
            config: *config,
            viewport: surface.viewport,
            content: surface.content,
            fit_scale: 1.0,
            zoom: 1.0,
            pan: Point::default(),
            pan_enabled: config.pan_enabled,
            zoom_enabled: config.zoom_enabled,
            dbl_click_zoom_enabled: config.dbl_click_zoom_enabled,
        };
        engine.fit_scale = engine.compute_fit_scale();
        engine.pan = engine.centered_pan(engine.fit_scale);
        engine
    }

    fn pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    fn zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let center = self.viewport_center();
        self.zoom_at(center, zoom);
    }

    fn get_pan(&self) -> Point {
        self.pan
    }

    fn get_zoom(&self) -> f64 {
        self.zoom
    }

    fn zoom_in(&mut self) {
        self.zoom(self.zoom * (1.0 + ZOOM_SENSITIVITY));
    }

    fn zoom_out(&mut self) {
        self.zoom(self.zoom / (1.0 + ZOOM_SENSITIVITY));
    }

    fn enable_pan(&mut self) {
        self.pan_enabled = true;
    }

    fn disable_pan(&mut self) {
        self.pan_enabled = false;
    }

    fn enable_zoom(&mut self) {
        self.zoom_enabled = true;
    }

    fn disable_zoom(&mut self) {
        self.zoom_enabled = false;
    }

    fn disable_dbl_click_zoom(&mut self) {
        self.dbl_click_zoom_enabled = false;
    }

    fn resize(&mut self) {
        self.fit_scale = self.compute_fit_scale();
    }

    fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = self.centered_pan(self.fit_scale);
    }
}

/// Resize notifier that records which surface it is watching.
#[derive(Debug, Clone, Default)]
pub struct ResizeWatch {
    watching: Option<String>,
    observe_calls: usize,
    disconnect_calls: usize,
}

impl ResizeWatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the surface currently observed.
    #[must_use]
    pub fn watching(&self) -> Option<&str> {
        self.watching.as_deref()
    }

    #[must_use]
    pub fn observe_calls(&self) -> usize {
        self.observe_calls
    }

    #[must_use]
    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls
    }
}

impl ResizeNotifier for ResizeWatch {
    type Surface = HeadlessSurface;

    fn observe(&mut self, surface: &HeadlessSurface) {
        self.watching = Some(surface.id.clone());
        self.observe_calls += 1;
    }

    fn disconnect(&mut self) {
        self.watching = None;
        self.disconnect_calls += 1;
    }
}
