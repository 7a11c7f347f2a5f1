//! Engine configuration.
//!
//! Every field has a default, so a host may pass a partial JSON object (or
//! none at all). [`CanvasConfig::from_json`] parses and validates in one step.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::camera::ZoomLimits;
use crate::color::is_hex_color;
use crate::consts::{CORNER_RADIUS, FILL_SWATCHES, GRID_CELL, HIT_SLOP_PX, MAX_ZOOM, MIN_ZOOM, SHADOW_BLUR, ZOOM_STEP};
use crate::grid::GridCell;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("zoom bounds must satisfy 0 < min <= max (got {min}..{max})")]
    ZoomBounds { min: f64, max: f64 },
    #[error("zoom step must be greater than 1 (got {0})")]
    ZoomStep(f64),
    #[error("grid cell must be positive (got {width}x{height})")]
    GridCell { width: f64, height: f64 },
    #[error("{field} must be a non-negative number (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("swatch is not a hex colour: {0}")]
    Swatch(String),
}

/// Tunables for the canvas engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom multiplier per wheel tick.
    pub zoom_step: f64,
    pub grid_cell_width: f64,
    pub grid_cell_height: f64,
    /// Corner radius given to committed rectangles.
    pub corner_radius: f64,
    /// Shadow blur given to committed shapes.
    pub shadow_blur: f64,
    /// Hit slop around shape outlines, in screen pixels.
    pub hit_slop_px: f64,
    /// Fill swatches offered by the context menu.
    pub swatches: Vec<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            grid_cell_width: GRID_CELL,
            grid_cell_height: GRID_CELL,
            corner_radius: CORNER_RADIUS,
            shadow_blur: SHADOW_BLUR,
            hit_slop_px: HIT_SLOP_PX,
            swatches: FILL_SWATCHES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON object and validate it. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and the matching
    /// variant for any value that fails [`CanvasConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        tracing::debug!(
            min_zoom = config.min_zoom,
            max_zoom = config.max_zoom,
            cell_w = config.grid_cell_width,
            cell_h = config.grid_cell_height,
            "canvas config loaded"
        );
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(ConfigError::ZoomBounds { min: self.min_zoom, max: self.max_zoom });
        }
        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        if !(self.grid_cell_width > 0.0 && self.grid_cell_height > 0.0) {
            return Err(ConfigError::GridCell { width: self.grid_cell_width, height: self.grid_cell_height });
        }
        for (field, value) in [
            ("corner_radius", self.corner_radius),
            ("shadow_blur", self.shadow_blur),
            ("hit_slop_px", self.hit_slop_px),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if let Some(bad) = self.swatches.iter().find(|s| !is_hex_color(s)) {
            return Err(ConfigError::Swatch(bad.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits { min: self.min_zoom, max: self.max_zoom, step: self.zoom_step }
    }

    #[must_use]
    pub fn grid_cell(&self) -> GridCell {
        GridCell { width: self.grid_cell_width, height: self.grid_cell_height }
    }
}
