//! Document model: shapes, their geometry and styling, and the in-memory store.
//!
//! A [`Shape`] is a common record (id, position, rotation, style) carrying a
//! per-variant [`Geometry`]. [`ShapeStore`] owns the committed shapes of the
//! session in paint order: the last shape is drawn on top. Sparse edits go
//! through [`ShapePatch`].
//!
//! The same `Shape` type also describes the two transient overlays, the
//! drawing marquee and the target handles; those never enter the store.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// The kind of a shape, without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeType {
    /// Lowercase label shown in the context menu header.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a rectangle axis relative to its anchor corner.
///
/// Drawing a rectangle up or to the left keeps width/height positive and
/// flips the axis instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    /// Sign of a drag delta. Zero counts as positive.
    #[must_use]
    pub fn of(delta: f64) -> Self {
        if delta < 0.0 { Self::Negative } else { Self::Positive }
    }

    /// `1.0` or `-1.0`.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Variant-specific geometry. Sizes are in world units and never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    /// Rectangle anchored at the shape position.
    Rectangle {
        width: f64,
        height: f64,
        corner_radius: f64,
        scale_x: Sign,
        scale_y: Sign,
    },
    /// Circle centred on the shape position.
    Circle { radius: f64 },
    /// Regular polygon centred on the shape position. The triangle tool always
    /// uses three sides.
    Triangle { radius: f64, sides: u32 },
}

impl Geometry {
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Rectangle { .. } => ShapeType::Rectangle,
            Self::Circle { .. } => ShapeType::Circle,
            Self::Triangle { .. } => ShapeType::Triangle,
        }
    }

    /// Whether the geometry has no area (zero width, height or radius).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Rectangle { width, height, .. } => width <= 0.0 || height <= 0.0,
            Self::Circle { radius } | Self::Triangle { radius, .. } => radius <= 0.0,
        }
    }
}

/// Paint attributes shared by every shape variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Fill colour as a CSS colour string; `None` draws no fill.
    pub fill: Option<String>,
    /// Stroke colour; `None` draws no outline.
    pub stroke: Option<String>,
    /// Stroke width. World units for shapes, screen pixels for overlays.
    pub stroke_width: f64,
    /// Shadow blur radius; `0.0` disables the shadow.
    pub shadow_blur: f64,
    /// Dashed outline (marquee).
    pub dashed: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, shadow_blur: 0.0, dashed: false }
    }
}

/// A shape on the canvas, or one of the transient overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier; fixed for the lifetime of the shape.
    pub id: ShapeId,
    /// Anchor x in world coordinates (rectangle corner, circle/triangle centre).
    pub x: f64,
    /// Anchor y in world coordinates.
    pub y: f64,
    /// Clockwise rotation in degrees around the anchor.
    pub rotation: f64,
    pub style: Style,
    pub geometry: Geometry,
}

impl Shape {
    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.geometry.shape_type()
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.geometry.is_degenerate()
    }
}

/// Sparse update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New rotation in degrees. The engine never emits it; hosts apply it
    /// directly to the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// New fill colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl ShapePatch {
    /// Patch that moves a shape to `(x, y)`.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Patch that replaces a shape's fill.
    #[must_use]
    pub fn fill(color: impl Into<String>) -> Self {
        Self { fill: Some(color.into()), ..Default::default() }
    }

    fn apply(&self, shape: &mut Shape) {
        if let Some(x) = self.x {
            shape.x = x;
        }
        if let Some(y) = self.y {
            shape.y = y;
        }
        if let Some(r) = self.rotation {
            shape.rotation = r;
        }
        if let Some(ref fill) = self.fill {
            shape.style.fill = Some(fill.clone());
        }
    }
}

/// Ordered store of committed shapes. Index order is paint order.
///
/// Index-based operations treat an out-of-range index as a no-op.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Append a shape on top of the paint order.
    ///
    /// Returns `false` without inserting when a shape with the same id is
    /// already present.
    pub fn append(&mut self, shape: Shape) -> bool {
        if self.position(&shape.id).is_some() {
            return false;
        }
        self.shapes.push(shape);
        true
    }

    /// Apply a patch to the shape at `index`. Returns `false` if out of range.
    pub fn update(&mut self, index: usize, patch: &ShapePatch) -> bool {
        let Some(shape) = self.shapes.get_mut(index) else {
            return false;
        };
        patch.apply(shape);
        true
    }

    /// Remove and return the shape at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        if index >= self.shapes.len() {
            return None;
        }
        Some(self.shapes.remove(index))
    }

    /// Move the shape at `from` to position `to`, shifting the shapes between.
    /// Returns `false` if either index is out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.shapes.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let shape = self.shapes.remove(from);
            self.shapes.insert(to, shape);
        }
        true
    }

    /// Move the shape at `index` to the end of the paint order.
    pub fn raise_to_top(&mut self, index: usize) -> bool {
        match self.shapes.len().checked_sub(1) {
            Some(last) => self.reorder(index, last),
            None => false,
        }
    }

    /// First shape (bottom-most) matching `pred`, with its index.
    pub fn find<P>(&self, mut pred: P) -> Option<(usize, &Shape)>
    where
        P: FnMut(&Shape) -> bool,
    {
        self.shapes.iter().enumerate().find(|&(_, s)| pred(s))
    }

    /// Index of the shape with `id`.
    #[must_use]
    pub fn position(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == *id)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    #[must_use]
    pub fn get_by_id(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    /// Shapes in paint order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> + ExactSizeIterator {
        self.shapes.iter()
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
