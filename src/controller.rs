//! The view transform controller.
//!
//! DESIGN
//! ======
//! `ViewTransformController` owns at most one engine binding at a time plus the
//! resize notifier for the controller's lifetime. It keeps a cached copy of the
//! last transform the user produced and a `dirty` flag that decides whether a
//! resize should re-fit the view or leave the user's transform alone.
//!
//! Engines do not call back into the controller. The host forwards the
//! engine's [`GestureEvent`]s to [`ViewTransformController::handle_gesture`]
//! and resize notifications to [`ViewTransformController::handle_resize`].
//! Every binding gets a fresh [`BindingId`]; events stamped with an older id
//! come from a replaced engine and are dropped.
//!
//! All methods take `&mut self` and run on the host's event loop. Nothing here
//! blocks or panics; calls that need an engine are no-ops until a surface is
//! attached.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use tracing::{debug, error, info, warn};

use crate::config::ViewConfig;
use crate::engine::{BindingId, EngineConfig, Gesture, GestureEvent, ResizeNotifier, TransformEngine};
use crate::error::ViewError;
use crate::transform::{InitialTransform, Point, Transform, is_usable_zoom};

/// Callback invoked with the fully resolved transform after a user gesture.
pub type ChangeListener = Box<dyn FnMut(&Transform)>;

/// Handle returned by [`ViewTransformController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// One engine instance and the id its events carry.
struct Binding<E> {
    id: BindingId,
    engine: E,
}

/// Keeps an engine's pan/zoom in sync with host policy and user input.
pub struct ViewTransformController<E, R>
where
    E: TransformEngine,
    R: ResizeNotifier<Surface = E::Surface>,
{
    config: ViewConfig,
    notifier: R,
    binding: Option<Binding<E>>,
    last_binding: u64,
    transform: Option<Transform>,
    dirty: bool,
    pan_enabled: bool,
    listeners: Vec<(ListenerId, ChangeListener)>,
    last_listener: u64,
}

impl<E, R> ViewTransformController<E, R>
where
    E: TransformEngine,
    R: ResizeNotifier<Surface = E::Surface>,
{
    /// Create a controller with the default view config.
    #[must_use]
    pub fn new(notifier: R) -> Self {
        Self::build(ViewConfig::default(), notifier)
    }

    /// Create a controller with a host-supplied view config.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Config`] when `config` fails
    /// [`ViewConfig::validate`]; engines are never built with unusable bounds.
    pub fn with_config(config: ViewConfig, notifier: R) -> Result<Self, ViewError> {
        config.validate()?;
        Ok(Self::build(config, notifier))
    }

    fn build(config: ViewConfig, notifier: R) -> Self {
        Self {
            config,
            notifier,
            binding: None,
            last_binding: 0,
            transform: None,
            dirty: false,
            pan_enabled: true,
            listeners: Vec::new(),
            last_listener: 0,
        }
    }

    // --- Binding lifecycle ---

    /// Bind a new engine to `surface`, replacing any previous binding.
    ///
    /// `initial` is restored verbatim when it carries both a pan and a positive
    /// finite zoom. Anything else (nothing, one axis, an unusable zoom) resets
    /// the view to the fitted default instead.
    pub fn attach_surface(&mut self, surface: &E::Surface, initial: InitialTransform) {
        self.release_binding();

        self.last_binding += 1;
        let id = BindingId(self.last_binding);
        let engine_config = EngineConfig::for_binding(id, &self.config);
        let mut engine = E::bind(surface, &engine_config);
        engine.disable_dbl_click_zoom();

        self.notifier.disconnect();
        self.notifier.observe(surface);

        self.binding = Some(Binding { id, engine });
        self.dirty = false;
        self.transform = None;

        let restored = initial.resolve();
        if let Some(t) = restored {
            self.restore_pan_zoom(t.pan, t.zoom);
        } else if !initial.is_empty() {
            warn!(%id, pan = ?initial.pan, zoom = ?initial.zoom, "incomplete initial transform; fitting instead");
        }

        self.apply_pan_policy();

        if restored.is_none() {
            self.reset();
        }

        debug!(%id, restored = restored.is_some(), pan_enabled = self.pan_enabled, "surface attached");
    }

    /// Drop the current binding and stop watching its surface.
    ///
    /// Listeners and the pan toggle survive; calling this twice is harmless.
    pub fn detach(&mut self) {
        if let Some(id) = self.release_binding() {
            info!(%id, "surface detached");
        }
        self.notifier.disconnect();
        self.dirty = false;
        self.transform = None;
    }

    fn release_binding(&mut self) -> Option<BindingId> {
        self.binding.take().map(|binding| binding.id)
    }

    // --- Host commands ---

    /// Apply an explicit transform to the bound engine: zoom first, then pan.
    ///
    /// Without a bound engine this logs an error and does nothing.
    pub fn restore_pan_zoom(&mut self, pan: Point, zoom: f64) {
        if let Err(e) = self.try_restore_pan_zoom(pan, zoom) {
            error!(error = %e, "restore_pan_zoom ignored");
        }
    }

    /// Fallible form of [`ViewTransformController::restore_pan_zoom`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Unbound`] when no surface is attached,
    /// [`ViewError::NonFiniteZoom`] when `zoom` is not a positive finite number
    /// and [`ViewError::NonFinitePan`] when either pan coordinate is NaN or
    /// infinite. Nothing reaches the engine on error.
    pub fn try_restore_pan_zoom(&mut self, pan: Point, zoom: f64) -> Result<(), ViewError> {
        let Some(binding) = self.binding.as_mut() else {
            return Err(ViewError::Unbound { op: "restore_pan_zoom" });
        };
        let target = Transform::new(pan, zoom)?;
        if !target.pan.is_finite() {
            return Err(ViewError::NonFinitePan { x: pan.x, y: pan.y });
        }
        // Zoom before pan: the engine's pan math depends on the active zoom.
        binding.engine.zoom(target.zoom);
        binding.engine.pan(target.pan);
        self.transform = Some(Transform { pan: binding.engine.get_pan(), zoom: binding.engine.get_zoom() });
        Ok(())
    }

    /// React to the watched surface changing size.
    ///
    /// The engine always re-measures. The view is re-fitted only while the user
    /// has not moved it since the last reset.
    pub fn handle_resize(&mut self) {
        let Some(binding) = self.binding.as_mut() else {
            debug!("resize with no surface attached");
            return;
        };
        binding.engine.resize();
        if self.dirty {
            debug!(id = %binding.id, "resize kept user transform");
        } else {
            self.reset();
        }
    }

    pub fn zoom_in(&mut self) {
        if let Some(binding) = self.binding.as_mut() {
            binding.engine.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(binding) = self.binding.as_mut() {
            binding.engine.zoom_out();
        }
    }

    /// Fit and center, then back off to the configured reset zoom so the
    /// diagram clears the host toolbar. Clears `dirty`.
    pub fn reset(&mut self) {
        let reset_zoom = self.config.reset_zoom;
        if let Some(binding) = self.binding.as_mut() {
            binding.engine.reset();
            binding.engine.zoom(reset_zoom);
            debug!(id = %binding.id, reset_zoom, "view reset");
        }
        self.dirty = false;
    }

    /// Set the host's pan toggle. Applied to a live engine immediately and to
    /// every engine created afterwards.
    pub fn set_pan_enabled(&mut self, enabled: bool) {
        self.pan_enabled = enabled;
        self.apply_pan_policy();
    }

    fn apply_pan_policy(&mut self) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        if self.pan_enabled {
            binding.engine.enable_pan();
            binding.engine.enable_zoom();
        } else {
            binding.engine.disable_zoom();
            binding.engine.disable_pan();
        }
    }

    // --- Engine events ---

    /// Apply a user gesture reported by the engine.
    ///
    /// Each gesture reports one axis; the other is read back from the engine so
    /// listeners always see a complete pair. Returns `false` if the event was
    /// dropped because it belongs to a replaced binding.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> bool {
        let Some(binding) = self.binding.as_ref() else {
            debug!(binding = %event.binding, "gesture with no surface attached");
            return false;
        };
        if binding.id != event.binding {
            debug!(current = %binding.id, stale = %event.binding, "dropping gesture from replaced engine");
            return false;
        }

        let (transform, complete) = match event.gesture {
            Gesture::Pan(pan) => {
                let zoom = binding.engine.get_zoom();
                (Transform { pan, zoom }, is_usable_zoom(zoom))
            }
            Gesture::Zoom(zoom) => {
                let pan = binding.engine.get_pan();
                (Transform { pan, zoom }, pan.is_finite())
            }
        };

        self.transform = Some(transform);
        self.dirty = true;
        if complete {
            self.notify(&transform);
        }
        true
    }

    // --- Listeners ---

    /// Register a listener for user-driven transform changes.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Transform) + 'static,
    {
        self.last_listener += 1;
        let id = ListenerId(self.last_listener);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, transform: &Transform) {
        for (_, listener) in &mut self.listeners {
            listener(transform);
        }
    }

    // --- Queries ---

    /// Last transform recorded from a restore or a user gesture.
    #[must_use]
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    /// The engine's transform right now, if a surface is attached.
    #[must_use]
    pub fn current_transform(&self) -> Option<Transform> {
        self.binding
            .as_ref()
            .map(|b| Transform { pan: b.engine.get_pan(), zoom: b.engine.get_zoom() })
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    #[must_use]
    pub fn pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    #[must_use]
    pub fn binding_id(&self) -> Option<BindingId> {
        self.binding.as_ref().map(|b| b.id)
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.binding.as_ref().map(|b| &b.engine)
    }

    /// Mutable engine access for host plumbing (feeding input, updating the
    /// observed box). Programmatic changes made here are not gestures.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.binding.as_mut().map(|b| &mut b.engine)
    }

    #[must_use]
    pub fn notifier(&self) -> &R {
        &self.notifier
    }
}

impl<E, R> Drop for ViewTransformController<E, R>
where
    E: TransformEngine,
    R: ResizeNotifier<Surface = E::Surface>,
{
    fn drop(&mut self) {
        self.notifier.disconnect();
    }
}
