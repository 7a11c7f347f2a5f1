#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// A point in either screen or world space.
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

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        let d = self.sub(other);
        d.x.hypot(d.y)
    }
}

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub min: Point,
    pub max: Point,
}

/// Size of the canvas element in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

/// Zoom range and per-tick multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: MIN_ZOOM, max: MAX_ZOOM, step: ZOOM_STEP }
    }
}

/// Stage pan and zoom.
///
/// Screen = world * `zoom` + pan. Pan is in CSS pixels; zoom stays inside the
/// configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Camera after one wheel tick anchored at `pointer`.
    ///
    /// Negative `wheel_dy` zooms in, positive zooms out; `ctrl` (trackpad
    /// pinch) inverts the direction. The world point under `pointer` maps back
    /// to `pointer` afterwards. A zero delta, or limits containing NaN, return
    /// the camera unchanged. Inverted bounds are swapped.
    #[must_use]
    pub fn zoomed_at(&self, pointer: Point, wheel_dy: f64, ctrl: bool, limits: ZoomLimits) -> Camera {
        if wheel_dy.is_nan() || wheel_dy.abs() < f64::EPSILON {
            return *self;
        }
        if limits.min.is_nan() || limits.max.is_nan() || limits.step.is_nan() {
            return *self;
        }
        let (lo, hi) = (limits.min.min(limits.max), limits.min.max(limits.max));
        let mut zoom_in = wheel_dy < 0.0;
        if ctrl {
            zoom_in = !zoom_in;
        }

        let raw = if zoom_in { self.zoom * limits.step } else { self.zoom / limits.step };
        let zoom = raw.clamp(lo, hi);

        let anchor = self.screen_to_world(pointer);
        Camera {
            pan_x: pointer.x - anchor.x * zoom,
            pan_y: pointer.y - anchor.y * zoom,
            zoom,
        }
    }

    /// World-space rectangle covered by the viewport.
    #[must_use]
    pub fn visible_world_rect(&self, viewport: Viewport) -> WorldRect {
        WorldRect {
            min: self.screen_to_world(Point::new(0.0, 0.0)),
            max: self.screen_to_world(Point::new(viewport.width, viewport.height)),
        }
    }
}
