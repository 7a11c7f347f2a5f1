#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::f64::consts::TAU;

use crate::camera::Point;
use crate::doc::{Geometry, Shape, ShapeStore};

/// Index of the topmost shape under `world_pt`, if any.
///
/// `slop` widens every outline by that many world units so thin or tiny
/// shapes stay clickable.
#[must_use]
pub fn hit_test(world_pt: Point, store: &ShapeStore, slop: f64) -> Option<usize> {
    store
        .iter()
        .enumerate()
        .rev()
        .find(|(_, shape)| shape_contains(shape, world_pt, slop))
        .map(|(index, _)| index)
}

/// Whether `world_pt` falls inside `shape` (outline widened by `slop`).
#[must_use]
pub fn shape_contains(shape: &Shape, world_pt: Point, slop: f64) -> bool {
    match shape.geometry {
        Geometry::Rectangle { width, height, scale_x, scale_y, .. } => {
            let local = to_local(shape, world_pt);
            let lx = local.x * scale_x.factor();
            let ly = local.y * scale_y.factor();
            lx >= -slop && lx <= width + slop && ly >= -slop && ly <= height + slop
        }
        Geometry::Circle { radius } => Point::new(shape.x, shape.y).distance(world_pt) <= radius + slop,
        Geometry::Triangle { radius, sides } => {
            let verts = polygon_vertices(Point::new(shape.x, shape.y), radius, sides, shape.rotation);
            point_in_polygon(world_pt, &verts) || distance_to_outline(world_pt, &verts) <= slop
        }
    }
}

/// Vertices of a regular polygon in world space.
///
/// The first vertex points straight up before rotation; `rotation_deg` turns
/// the polygon clockwise around `center`.
#[must_use]
pub fn polygon_vertices(center: Point, radius: f64, sides: u32, rotation_deg: f64) -> Vec<Point> {
    let (sin_r, cos_r) = rotation_deg.to_radians().sin_cos();
    (0..sides)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(sides);
            let lx = radius * angle.sin();
            let ly = -radius * angle.cos();
            Point::new(center.x + lx * cos_r - ly * sin_r, center.y + lx * sin_r + ly * cos_r)
        })
        .collect()
}

/// Undo the shape's translation and rotation.
fn to_local(shape: &Shape, world_pt: Point) -> Point {
    let d = world_pt.sub(Point::new(shape.x, shape.y));
    let (sin_r, cos_r) = (-shape.rotation).to_radians().sin_cos();
    Point::new(d.x * cos_r - d.y * sin_r, d.x * sin_r + d.y * cos_r)
}

/// Even-odd ray cast.
fn point_in_polygon(pt: Point, verts: &[Point]) -> bool {
    let mut inside = false;
    let mut j = verts.len().wrapping_sub(1);
    for (i, a) in verts.iter().enumerate() {
        let Some(b) = verts.get(j) else {
            break;
        };
        if (a.y > pt.y) != (b.y > pt.y) && pt.x < (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn distance_to_outline(pt: Point, verts: &[Point]) -> f64 {
    verts
        .iter()
        .zip(verts.iter().cycle().skip(1))
        .map(|(a, b)| distance_to_segment(pt, *a, *b))
        .fold(f64::INFINITY, f64::min)
}

fn distance_to_segment(pt: Point, a: Point, b: Point) -> f64 {
    let ab = b.sub(a);
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return pt.distance(a);
    }
    let ap = pt.sub(a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    pt.distance(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}
