//! Visible-window grid computation.
//!
//! The grid is a pure function of the camera, the viewport size and the cell
//! size. Only lines inside the visible window plus one viewport of margin on
//! every side are produced, so panning never reveals an unfilled edge before
//! the next render. The renderer strokes every line in a single path.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{GRID_CELL, MAX_GRID_LINES};

/// Grid cell dimensions in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub width: f64,
    pub height: f64,
}

impl Default for GridCell {
    fn default() -> Self {
        Self { width: GRID_CELL, height: GRID_CELL }
    }
}

/// World-space grid lines covering the expanded visible window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// World x of each vertical line, ascending.
    pub xs: Vec<f64>,
    /// World y of each horizontal line, ascending.
    pub ys: Vec<f64>,
    /// Top-left corner of the covered range.
    pub start: Point,
    /// Bottom-right corner of the covered range.
    pub end: Point,
}

impl GridLines {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty() && self.ys.is_empty()
    }
}

/// Compute the grid lines visible through `camera` in a `viewport`-sized canvas.
///
/// Returns an empty grid for a non-positive cell size or zoom.
#[must_use]
pub fn visible_grid(camera: &Camera, viewport: Viewport, cell: GridCell) -> GridLines {
    if !(cell.width > 0.0 && cell.height > 0.0 && camera.zoom > 0.0) {
        return GridLines::default();
    }

    let inv = 1.0 / camera.zoom;
    let origin_x = -camera.pan_x * inv;
    let origin_y = -camera.pan_y * inv;

    let (start_x, xs) = axis_lines(origin_x, viewport.width * inv, cell.width);
    let (start_y, ys) = axis_lines(origin_y, viewport.height * inv, cell.height);

    let end_x = xs.last().copied().unwrap_or(start_x);
    let end_y = ys.last().copied().unwrap_or(start_y);

    GridLines { xs, ys, start: Point::new(start_x, start_y), end: Point::new(end_x, end_y) }
}

/// Lines along one axis from one `span` before `origin` to two spans after it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn axis_lines(origin: f64, span: f64, cell: f64) -> (f64, Vec<f64>) {
    let first = ((origin - span) / cell).floor();
    let last = ((origin + span * 2.0) / cell).floor();
    let start = first * cell;
    if !(last > first) || !first.is_finite() || !last.is_finite() {
        return (start, Vec::new());
    }
    let count = ((last - first) as usize + 1).min(MAX_GRID_LINES);
    let lines = (0..count).map(|i| (first + i as f64) * cell).collect();
    (start, lines)
}
