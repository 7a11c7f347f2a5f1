//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only [`Scene`] and produces pixels; it does not mutate
//! any application state.
//!
//! Layers, bottom to top: grid, committed shapes in paint order, the drawing
//! marquee, the target handles. Overlay strokes are sized in screen pixels and
//! so are divided by the zoom before drawing.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{GRID_COLOR, GRID_LINE_PX, MARQUEE_DASH_PX};
use crate::doc::{Geometry, Shape, ShapeStore, Style};
use crate::grid::GridLines;
use crate::hit::polygon_vertices;

/// Shadow colour of committed shapes.
const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.6)";

/// Read-only view of everything drawn in one frame.
pub struct Scene<'a> {
    pub doc: &'a ShapeStore,
    pub camera: &'a Camera,
    pub grid: &'a GridLines,
    pub marquee: Option<&'a Shape>,
    pub handles: Option<&'a Shape>,
    pub viewport: Viewport,
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene<'_>) -> Result<(), JsValue> {
    let Scene { doc, camera, grid, marquee, handles, viewport } = *scene;
    let zoom = camera.zoom;

    // Layer 1: clear and set up transforms.
    ctx.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(zoom, zoom)?;

    // Layer 2: grid.
    draw_grid(ctx, grid, zoom);

    // Layer 3: shapes in paint order (bottom first).
    for shape in doc.iter() {
        draw_shape(ctx, shape, 1.0, zoom)?;
    }

    // Layer 4: overlays.
    if let Some(m) = marquee {
        draw_shape(ctx, m, 1.0 / zoom, zoom)?;
    }
    if let Some(h) = handles {
        draw_shape(ctx, h, 1.0 / zoom, zoom)?;
    }

    Ok(())
}

// =============================================================
// Grid
// =============================================================

fn draw_grid(ctx: &CanvasRenderingContext2d, grid: &GridLines, zoom: f64) {
    if grid.is_empty() {
        return;
    }
    ctx.save();
    ctx.begin_path();
    for &x in &grid.xs {
        ctx.move_to(x, grid.start.y);
        ctx.line_to(x, grid.end.y);
    }
    for &y in &grid.ys {
        ctx.move_to(grid.start.x, y);
        ctx.line_to(grid.end.x, y);
    }
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(GRID_LINE_PX / zoom);
    ctx.stroke();
    ctx.restore();
}

// =============================================================
// Shapes
// =============================================================

/// Draw one shape. `line_scale` converts the style's stroke width and dash
/// length to world units (1 for shapes, `1/zoom` for overlays).
fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape, line_scale: f64, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(shape.x, shape.y)?;
    ctx.rotate(shape.rotation.to_radians())?;

    match shape.geometry {
        Geometry::Rectangle { width, height, corner_radius, scale_x, scale_y } => {
            ctx.scale(scale_x.factor(), scale_y.factor())?;
            rounded_rect_path(ctx, width, height, corner_radius)?;
        }
        Geometry::Circle { radius } => {
            ctx.begin_path();
            ctx.arc(0.0, 0.0, radius, 0.0, TAU)?;
        }
        Geometry::Triangle { radius, sides } => {
            polygon_path(ctx, &polygon_vertices(Point::default(), radius, sides, 0.0));
        }
    }

    paint(ctx, &shape.style, line_scale, zoom)?;
    ctx.restore();
    Ok(())
}

/// Fill then stroke the current path with `style`.
fn paint(ctx: &CanvasRenderingContext2d, style: &Style, line_scale: f64, zoom: f64) -> Result<(), JsValue> {
    if let Some(fill) = &style.fill {
        if style.shadow_blur > 0.0 {
            ctx.set_shadow_color(SHADOW_COLOR);
            ctx.set_shadow_blur(style.shadow_blur * zoom);
        }
        ctx.set_fill_style_str(fill);
        ctx.fill();
        ctx.set_shadow_blur(0.0);
    }

    if let Some(stroke) = &style.stroke {
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(style.stroke_width * line_scale);
        if style.dashed {
            let dash = MARQUEE_DASH_PX * line_scale;
            let dash_array = js_sys::Array::new();
            dash_array.push(&dash.into());
            dash_array.push(&dash.into());
            ctx.set_line_dash(&dash_array)?;
        }
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new())?;
    }
    Ok(())
}

// =============================================================
// Paths
// =============================================================

/// Rectangle from the origin to `(width, height)` with rounded corners.
fn rounded_rect_path(ctx: &CanvasRenderingContext2d, width: f64, height: f64, radius: f64) -> Result<(), JsValue> {
    let r = radius.min(width.min(height) / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(r, 0.0);
    ctx.arc_to(width, 0.0, width, height, r)?;
    ctx.arc_to(width, height, 0.0, height, r)?;
    ctx.arc_to(0.0, height, 0.0, 0.0, r)?;
    ctx.arc_to(0.0, 0.0, width, 0.0, r)?;
    ctx.close_path();
    Ok(())
}

fn polygon_path(ctx: &CanvasRenderingContext2d, verts: &[Point]) {
    ctx.begin_path();
    let mut iter = verts.iter();
    if let Some(first) = iter.next() {
        ctx.move_to(first.x, first.y);
    }
    for v in iter {
        ctx.line_to(v.x, v.y);
    }
    ctx.close_path();
}
