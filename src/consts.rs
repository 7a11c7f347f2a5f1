//! Shared numeric constants for the sketchboard crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplicative zoom change per wheel tick.
pub const ZOOM_STEP: f64 = 1.1;

// ── Grid ────────────────────────────────────────────────────────

/// Default grid cell edge in world units.
pub const GRID_CELL: f64 = 150.0;

/// Grid line width in screen pixels.
pub const GRID_LINE_PX: f64 = 0.5;

/// Grid line colour.
pub const GRID_COLOR: &str = "#111";

/// Upper bound on emitted lines per axis, whatever the zoom or cell size.
pub const MAX_GRID_LINES: usize = 4096;

// ── Shapes ──────────────────────────────────────────────────────

/// Corner radius applied to committed rectangles.
pub const CORNER_RADIUS: f64 = 5.0;

/// Shadow blur applied to committed shapes.
pub const SHADOW_BLUR: f64 = 5.0;

/// Side count of the triangle tool's regular polygon.
pub const TRIANGLE_SIDES: u32 = 3;

/// Subtracted from the drag angle so a triangle vertex points at the pointer.
pub const TRIANGLE_ROTATION_OFFSET_DEG: f64 = 30.0;

// ── Overlays ────────────────────────────────────────────────────

/// Stroke colour of the drawing marquee and target handles.
pub const OVERLAY_STROKE: &str = "#1E90FF";

/// Overlay stroke width in screen pixels.
pub const OVERLAY_STROKE_PX: f64 = 1.5;

/// Dash segment length of the marquee outline, in screen pixels.
pub const MARQUEE_DASH_PX: f64 = 4.0;

/// Screen-space hit slop in pixels around shape outlines.
pub const HIT_SLOP_PX: f64 = 2.0;

// ── Context menu ────────────────────────────────────────────────

/// Swatches offered by the fill editor.
pub const FILL_SWATCHES: [&str; 14] = [
    "#2e2e2e", "#868e96", "#fa5252", "#e64980", "#be4bdb", "#7950f2", "#4c6ef5", "#228be6", "#15aabf", "#12b886",
    "#40c057", "#82c91e", "#fab005", "#fd7e14",
];
