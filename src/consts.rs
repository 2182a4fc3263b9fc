//! Shared numeric constants for the pan/zoom controller.

// ── Zoom bounds ─────────────────────────────────────────────────

/// Smallest zoom factor the engine is allowed to reach.
pub const DEFAULT_MIN_ZOOM: f64 = 0.2;

/// Largest zoom factor the engine is allowed to reach.
pub const DEFAULT_MAX_ZOOM: f64 = 12.0;

// ── Reset ───────────────────────────────────────────────────────

/// Zoom applied right after a reset-to-fit so the diagram edge clears the
/// host toolbar overlay.
pub const DEFAULT_RESET_ZOOM: f64 = 0.875;

// ── Headless engine ─────────────────────────────────────────────

/// Relative step used by `zoom_in` / `zoom_out` (each step scales by `1 + this`).
pub const ZOOM_SENSITIVITY: f64 = 0.2;

/// Scale factor applied by a double-click when double-click zoom is enabled.
pub const DBL_CLICK_ZOOM_FACTOR: f64 = 1.6;
