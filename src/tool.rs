//! Geometry of the drawing tools.
//!
//! Pure functions that build and stretch the drawing marquee, turn a finished
//! marquee into a committed shape, and derive the target-handles overlay. The
//! engine owns the gesture state; this module only computes shapes.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use uuid::Uuid;

use crate::camera::Point;
use crate::config::CanvasConfig;
use crate::consts::{OVERLAY_STROKE, OVERLAY_STROKE_PX, TRIANGLE_ROTATION_OFFSET_DEG, TRIANGLE_SIDES};
use crate::doc::{Geometry, Shape, ShapeId, ShapeType, Sign, Style};

fn overlay_style(dashed: bool) -> Style {
    Style {
        fill: None,
        stroke: Some(OVERLAY_STROKE.to_owned()),
        stroke_width: OVERLAY_STROKE_PX,
        shadow_blur: 0.0,
        dashed,
    }
}

/// A zero-size marquee of `shape_type` anchored at `anchor` (world units).
#[must_use]
pub fn drawing_marquee(shape_type: ShapeType, anchor: Point) -> Shape {
    let geometry = match shape_type {
        ShapeType::Rectangle => Geometry::Rectangle {
            width: 0.0,
            height: 0.0,
            corner_radius: 0.0,
            scale_x: Sign::Positive,
            scale_y: Sign::Positive,
        },
        ShapeType::Circle => Geometry::Circle { radius: 0.0 },
        ShapeType::Triangle => Geometry::Triangle { radius: 0.0, sides: TRIANGLE_SIDES },
    };
    Shape {
        id: Uuid::nil(),
        x: anchor.x,
        y: anchor.y,
        rotation: 0.0,
        style: overlay_style(true),
        geometry,
    }
}

/// Resize `marquee` so it reaches `pointer`. The anchor never moves.
///
/// Rectangles keep a non-negative size and record the drag direction in their
/// sign flags. Circles and triangles take the anchor-to-pointer distance as
/// radius; triangles also turn so one vertex points at the pointer.
pub fn stretch_marquee(marquee: &mut Shape, pointer: Point) {
    let anchor = Point::new(marquee.x, marquee.y);
    let delta = pointer.sub(anchor);
    match &mut marquee.geometry {
        Geometry::Rectangle { width, height, scale_x, scale_y, .. } => {
            *width = delta.x.abs();
            *height = delta.y.abs();
            *scale_x = Sign::of(delta.x);
            *scale_y = Sign::of(delta.y);
        }
        Geometry::Circle { radius } => {
            *radius = anchor.distance(pointer);
        }
        Geometry::Triangle { radius, .. } => {
            *radius = anchor.distance(pointer);
            marquee.rotation = delta.y.atan2(delta.x).to_degrees() - TRIANGLE_ROTATION_OFFSET_DEG;
        }
    }
}

/// Turn a finished marquee into a shape ready for the store.
///
/// Returns `None` for a zero-size marquee.
#[must_use]
pub fn commit_marquee(marquee: &Shape, id: ShapeId, fill: String, config: &CanvasConfig) -> Option<Shape> {
    if marquee.is_degenerate() {
        return None;
    }
    let mut geometry = marquee.geometry.clone();
    if let Geometry::Rectangle { corner_radius, .. } = &mut geometry {
        *corner_radius = config.corner_radius;
    }
    Some(Shape {
        id,
        x: marquee.x,
        y: marquee.y,
        rotation: marquee.rotation,
        style: Style {
            fill: Some(fill),
            stroke: None,
            stroke_width: 1.0,
            shadow_blur: config.shadow_blur,
            dashed: false,
        },
        geometry,
    })
}

/// Stroke-only outline mirroring `target`'s geometry and transform.
#[must_use]
pub fn target_handles(target: &Shape) -> Shape {
    Shape { style: overlay_style(false), ..target.clone() }
}
