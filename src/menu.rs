//! Context menu state and on-screen placement.
//!
//! The menu opens at the pointer and grows toward the larger free area: upward
//! when the anchor sits in the lower half of the viewport, leftward when the
//! menu would overflow the right edge. Offsets are expressed the way CSS
//! positions an absolutely placed element, so the host can apply them as-is.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use serde::Serialize;

use crate::camera::{Point, Viewport};
use crate::doc::{ShapeId, ShapeType};

/// An open context menu targeting one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextMenu {
    /// Pointer position in screen space when the menu opened.
    pub anchor: Point,
    pub shape_id: ShapeId,
    /// Store index of the target when the menu opened. Re-checked against
    /// `shape_id` before use.
    pub shape_index: usize,
    pub shape_type: ShapeType,
    /// Current fill of the target, shown as the selected swatch.
    pub fill: Option<String>,
}

impl ContextMenu {
    /// Header text of the menu.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.shape_type.label()
    }
}

/// Corner of the anchor the menu grows toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    BottomRight,
    TopRight,
    TopLeft,
    BottomLeft,
}

/// CSS offsets of the menu element. Exactly one horizontal and one vertical
/// offset is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MenuPosition {
    pub placement: Placement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
}

impl MenuPosition {
    /// Top-left corner of a menu of `menu_size` laid out in `viewport`.
    #[must_use]
    pub fn origin(&self, menu_size: (f64, f64), viewport: Viewport) -> Point {
        let (width, height) = menu_size;
        let x = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => viewport.width - right - width,
            (None, None) => 0.0,
        };
        let y = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => viewport.height - bottom - height,
            (None, None) => 0.0,
        };
        Point::new(x, y)
    }
}

/// Place a menu of `menu_size` (width, height) opened at screen `anchor`.
#[must_use]
pub fn place_menu(anchor: Point, menu_size: (f64, f64), viewport: Viewport) -> MenuPosition {
    let (width, _) = menu_size;
    let upward = anchor.y > viewport.height / 2.0;
    let leftward = anchor.x + width > viewport.width;

    let placement = match (upward, leftward) {
        (false, false) => Placement::BottomRight,
        (true, false) => Placement::TopRight,
        (true, true) => Placement::TopLeft,
        (false, true) => Placement::BottomLeft,
    };

    let x = anchor.x.clamp(0.0, viewport.width.max(0.0));
    let y = anchor.y.clamp(0.0, viewport.height.max(0.0));
    let (left, right) = if leftward { (None, Some(viewport.width.max(0.0) - x)) } else { (Some(x), None) };
    let (top, bottom) = if upward { (None, Some(viewport.height.max(0.0) - y)) } else { (Some(y), None) };

    MenuPosition { placement, left, top, right, bottom }
}
