//! Tools, pointer/keyboard event types, and gesture state.
//!
//! `UiState` is what the host and renderer see: the active tool, the
//! selection, cursor, pan buttons and hand-tool holds. `InputState` is the
//! gesture between pointer-down and pointer-up. The drawing marquee, the drag
//! origin and the last pan position all live inside it, so abandoning a
//! gesture is a single assignment back to `Idle`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{Shape, ShapeId, ShapeType};
use crate::menu::ContextMenu;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Select and drag shapes (default).
    #[default]
    #[serde(rename = "move-tool")]
    Move,
    /// Draw a rectangle.
    #[serde(rename = "rectangle")]
    Rectangle,
    /// Draw a circle.
    #[serde(rename = "circle")]
    Circle,
    /// Draw a triangle.
    #[serde(rename = "triangle")]
    Triangle,
    /// Pan the view with any button.
    #[serde(rename = "hand-tool")]
    Hand,
}

impl Tool {
    /// All tools in toolbar order.
    pub const ALL: [Tool; 5] = [Tool::Move, Tool::Rectangle, Tool::Circle, Tool::Triangle, Tool::Hand];

    /// Toolbar identifier.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Move => "move-tool",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Hand => "hand-tool",
        }
    }

    /// Tool bound to a single-letter keyboard mnemonic (case-insensitive).
    #[must_use]
    pub fn from_mnemonic(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "v" => Some(Self::Move),
            "r" => Some(Self::Rectangle),
            "c" => Some(Self::Circle),
            "t" => Some(Self::Triangle),
            "h" => Some(Self::Hand),
            _ => None,
        }
    }

    /// Shape type drawn by this tool, if it is a drawing tool.
    #[must_use]
    pub fn shape_type(self) -> Option<ShapeType> {
        match self {
            Self::Rectangle => Some(ShapeType::Rectangle),
            Self::Circle => Some(ShapeType::Circle),
            Self::Triangle => Some(ShapeType::Triangle),
            Self::Move | Self::Hand => None,
        }
    }

    /// Cursor shown over the canvas while this tool is active.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::Move => Cursor::Default,
            Self::Rectangle | Self::Circle | Self::Triangle => Cursor::Crosshair,
            Self::Hand => Cursor::Grab,
        }
    }

    /// Buttons that pan the view while this tool is active.
    #[must_use]
    pub fn pan_buttons(self) -> PanButtons {
        match self {
            Self::Hand => PanButtons::ALL,
            _ => PanButtons::MIDDLE_ONLY,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct ParseToolError(pub String);

impl FromStr for Tool {
    type Err = ParseToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ParseToolError(s.to_owned()))
    }
}

/// CSS cursor affordance for the canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Grab,
}

impl Cursor {
    /// Value for the CSS `cursor` property.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Grab => "grab",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
///
/// Mirrors the DOM event flags so the host can forward every event as-is.
/// The engine reads `ctrl` to invert wheel zoom, and `ctrl` or `meta` to
/// suppress tool mnemonics. `shift` and `alt` are carried for hosts and are
/// currently ignored by every handler.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held. Trackpad pinch gestures also report ctrl.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code. Unknown codes count as primary.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Set of buttons that start a pan gesture.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanButtons {
    pub primary: bool,
    pub middle: bool,
    pub secondary: bool,
}

impl PanButtons {
    /// Normal editing: only the middle button pans.
    pub const MIDDLE_ONLY: Self = Self { primary: false, middle: true, secondary: false };
    /// Hand tool: every button pans.
    pub const ALL: Self = Self { primary: true, middle: true, secondary: true };

    #[must_use]
    pub fn contains(self, button: Button) -> bool {
        match button {
            Button::Primary => self.primary,
            Button::Middle => self.middle,
            Button::Secondary => self.secondary,
        }
    }
}

impl Default for PanButtons {
    fn default() -> Self {
        Self::MIDDLE_ONLY
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Spacebar, whether reported by `key` (`" "`) or `code` (`"Space"`).
    #[must_use]
    pub fn is_space(&self) -> bool {
        matches!(self.0.as_str(), " " | "Space" | "Spacebar")
    }
}

/// Wheel / trackpad scroll delta, as reported by the DOM `WheelEvent`.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels. Zoom only follows `dy`, so
    /// horizontal scrolling leaves the camera unchanged.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Source of a temporary switch to the hand tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldSource {
    Space,
    MiddleButton,
}

/// Active hand-tool holds and the tool to restore once all are released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoldOverride {
    pub space: bool,
    pub middle: bool,
    /// Tool active before the first hold began.
    pub previous: Option<Tool>,
}

impl HoldOverride {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.space || self.middle
    }

    #[must_use]
    pub fn is_held(&self, source: HoldSource) -> bool {
        match source {
            HoldSource::Space => self.space,
            HoldSource::MiddleButton => self.middle,
        }
    }

    pub fn set_held(&mut self, source: HoldSource, held: bool) {
        match source {
            HoldSource::Space => self.space = held,
            HoldSource::MiddleButton => self.middle = held,
        }
    }
}

/// Persistent UI state visible to the renderer and the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
    /// Outline mirroring the selected shape.
    pub handles: Option<Shape>,
    /// Open context menu, if any.
    pub context_menu: Option<ContextMenu>,
    pub cursor: Cursor,
    /// Buttons that currently start a pan.
    pub pan_buttons: PanButtons,
    pub hold: HoldOverride,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the gesture context needed to compute the next
/// step and to finish the gesture on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the view.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is sizing a new shape. The marquee's position is the anchor.
    Drawing {
        /// Preview of the shape under construction.
        marquee: Shape,
    },
    /// The user is moving an existing shape.
    Dragging {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// Pointer minus shape position at drag start, in world units.
        origin: Point,
    },
}
