//! Value types for the view transform: pan offset, zoom factor and the
//! optional transform a host hands back when re-attaching a surface.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// A 2D offset in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width/height of a box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A box with no area cannot be fitted into or fitted against.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// The combined view state: pan offset plus zoom factor.
///
/// `zoom` is a scale factor where 1.0 means "as fitted by the engine".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub pan: Point,
    pub zoom: f64,
}

impl Transform {
    /// Build a transform, rejecting zoom values that are not positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NonFiniteZoom`] when `zoom` is NaN, infinite, or not
    /// strictly positive.
    pub fn new(pan: Point, zoom: f64) -> Result<Self, ViewError> {
        if !is_usable_zoom(zoom) {
            return Err(ViewError::NonFiniteZoom(zoom));
        }
        Ok(Self { pan, zoom })
    }
}

/// Transform state supplied by the host when attaching a surface.
///
/// Either axis may be missing; hosts typically deserialize this straight from
/// whatever they persisted last time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InitialTransform {
    #[serde(default)]
    pub pan: Option<Point>,
    #[serde(default)]
    pub zoom: Option<f64>,
}

impl InitialTransform {
    /// No prior state: the controller will fit and center.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(pan: Point, zoom: f64) -> Self {
        Self { pan: Some(pan), zoom: Some(zoom) }
    }

    /// Neither axis was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pan.is_none() && self.zoom.is_none()
    }

    /// The transform to restore, if both axes are present and the zoom is a
    /// positive finite number.
    ///
    /// A partial transform (one axis only) never resolves.
    #[must_use]
    pub fn resolve(&self) -> Option<Transform> {
        match (self.pan, self.zoom) {
            (Some(pan), Some(zoom)) if is_usable_zoom(zoom) => Some(Transform { pan, zoom }),
            _ => None,
        }
    }
}

impl From<Transform> for InitialTransform {
    fn from(t: Transform) -> Self {
        Self::new(t.pan, t.zoom)
    }
}

/// Zoom is "known" once it is a positive finite number.
#[must_use]
pub fn is_usable_zoom(zoom: f64) -> bool {
    zoom.is_finite() && zoom > 0.0
}
