//! View configuration parsed from environment variables.

use crate::consts::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_RESET_ZOOM};
use crate::error::ConfigError;

pub const ENV_MIN_ZOOM: &str = "PANZOOM_MIN_ZOOM";
pub const ENV_MAX_ZOOM: &str = "PANZOOM_MAX_ZOOM";
pub const ENV_RESET_ZOOM: &str = "PANZOOM_RESET_ZOOM";
pub const ENV_FIT: &str = "PANZOOM_FIT";
pub const ENV_CENTER: &str = "PANZOOM_CENTER";

/// Host-level policy for every engine the controller creates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Lower zoom bound handed to the engine.
    pub min_zoom: f64,
    /// Upper zoom bound handed to the engine.
    pub max_zoom: f64,
    /// Zoom applied immediately after a reset-to-fit.
    pub reset_zoom: f64,
    /// Ask the engine to fit the surface on construction.
    pub fit: bool,
    /// Ask the engine to center the surface on construction.
    pub center: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            reset_zoom: DEFAULT_RESET_ZOOM,
            fit: true,
            center: true,
        }
    }
}

impl ViewConfig {
    /// Build config from environment variables.
    ///
    /// All optional; defaults apply when absent:
    /// - `PANZOOM_MIN_ZOOM`: default 0.2
    /// - `PANZOOM_MAX_ZOOM`: default 12
    /// - `PANZOOM_RESET_ZOOM`: default 0.875
    /// - `PANZOOM_FIT`: `true` (default) or `false`
    /// - `PANZOOM_CENTER`: `true` (default) or `false`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for unparsable values and
    /// [`ConfigError::Invalid`] when the bounds are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ViewConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ViewConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_zoom: parse_f64(ENV_MIN_ZOOM, lookup(ENV_MIN_ZOOM), defaults.min_zoom)?,
            max_zoom: parse_f64(ENV_MAX_ZOOM, lookup(ENV_MAX_ZOOM), defaults.max_zoom)?,
            reset_zoom: parse_f64(ENV_RESET_ZOOM, lookup(ENV_RESET_ZOOM), defaults.reset_zoom)?,
            fit: parse_bool(ENV_FIT, lookup(ENV_FIT), defaults.fit)?,
            center: parse_bool(ENV_CENTER, lookup(ENV_CENTER), defaults.center)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the bounds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a bound is non-finite or not
    /// positive, if `min_zoom > max_zoom`, or if `reset_zoom` lies outside
    /// `(0, max_zoom]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(ConfigError::Invalid(format!("min_zoom must be positive, got {}", self.min_zoom)));
        }
        if !self.max_zoom.is_finite() || self.max_zoom < self.min_zoom {
            return Err(ConfigError::Invalid(format!(
                "max_zoom must be finite and >= min_zoom ({}), got {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.reset_zoom.is_finite() && self.reset_zoom > 0.0 && self.reset_zoom <= self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "reset_zoom must lie in (0, {}], got {}",
                self.max_zoom, self.reset_zoom
            )));
        }
        Ok(())
    }
}

fn parse_f64(var: &'static str, raw: Option<String>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::Parse { var, value: raw }),
    }
}

fn parse_bool(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Parse { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
