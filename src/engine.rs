use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Viewport};
use crate::color::random_hex_color;
use crate::config::{CanvasConfig, ConfigError};
use crate::doc::{Shape, ShapeId, ShapePatch, ShapeStore};
use crate::grid::{GridLines, visible_grid};
use crate::hit;
use crate::input::{Button, Cursor, HoldSource, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::menu::{ContextMenu, MenuPosition, place_menu};
use crate::render;
use crate::tool::{commit_marquee, drawing_marquee, stretch_marquee, target_handles};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShapeCreated(Shape),
    ShapeUpdated { id: ShapeId, fields: ShapePatch },
    ShapeDeleted { id: ShapeId },
    /// The shape moved to the top of the paint order.
    ShapeRaised { id: ShapeId },
    SelectionChanged(Option<ShapeId>),
    ToolChanged(Tool),
    SetCursor(Cursor),
    CameraChanged(Camera),
    ContextMenuOpened(ContextMenu),
    ContextMenuClosed,
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: ShapeStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    config: CanvasConfig,
    pub viewport: Viewport,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(CanvasConfig::default(), StdRng::from_rng(&mut rand::rng()))
    }

    /// Engine with custom tunables, seeded from the thread RNG.
    ///
    /// # Errors
    ///
    /// Returns the first constraint `config` violates.
    pub fn with_config(config: CanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::from_rng(&mut rand::rng())))
    }

    /// Engine whose ids and fills are reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// Returns the first constraint `config` violates.
    pub fn with_seed(config: CanvasConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_rng(config, StdRng::seed_from_u64(seed)))
    }

    fn with_rng(config: CanvasConfig, rng: StdRng) -> Self {
        Self {
            doc: ShapeStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            config,
            viewport: Viewport::default(),
            rng,
        }
    }

    // --- Viewport ---

    /// Update viewport dimensions (CSS pixels) and device pixel ratio.
    pub fn set_viewport(&mut self, width: f64, height: f64, dpr: f64) {
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.viewport = Viewport { width: width.max(0.0), height: height.max(0.0), dpr };
    }

    /// Grid lines covering the current view.
    #[must_use]
    pub fn grid_lines(&self) -> GridLines {
        visible_grid(&self.camera, self.viewport, self.config.grid_cell())
    }

    // --- Tool ---

    /// Activate `tool`, abandoning any gesture in progress.
    ///
    /// While a hand-tool hold is active the tool only becomes the one restored
    /// on release.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.ui.hold.is_active() {
            debug!(%tool, "tool queued behind hold");
            self.ui.hold.previous = Some(tool);
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.apply_tool(tool, &mut actions);
        actions
    }

    fn apply_tool(&mut self, tool: Tool, actions: &mut Vec<Action>) {
        let had_gesture = !matches!(self.input, InputState::Idle);
        self.input = InputState::Idle;

        if self.ui.tool != tool {
            debug!(from = %self.ui.tool, to = %tool, "tool changed");
            self.ui.tool = tool;
            actions.push(Action::ToolChanged(tool));
        }
        let cursor = tool.cursor();
        if self.ui.cursor != cursor {
            self.ui.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
        self.ui.pan_buttons = tool.pan_buttons();

        if had_gesture || !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
    }

    fn begin_hold(&mut self, source: HoldSource, actions: &mut Vec<Action>) {
        if self.ui.hold.is_held(source) {
            return;
        }
        let first = !self.ui.hold.is_active();
        self.ui.hold.set_held(source, true);
        if first {
            debug!(?source, previous = %self.ui.tool, "hand hold started");
            self.ui.hold.previous = Some(self.ui.tool);
            self.apply_tool(Tool::Hand, actions);
        }
    }

    fn end_hold(&mut self, source: HoldSource, actions: &mut Vec<Action>) {
        if !self.ui.hold.is_held(source) {
            return;
        }
        self.ui.hold.set_held(source, false);
        if self.ui.hold.is_active() {
            return;
        }
        if let Some(previous) = self.ui.hold.previous.take() {
            debug!(?source, restored = %previous, "hand hold released");
            self.apply_tool(previous, actions);
        }
    }

    // --- Input events ---
    //
    // Pointer handlers take the event's `Modifiers` so the host can forward
    // DOM events unchanged; no pointer gesture depends on them yet.

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();

        if button != Button::Secondary && self.ui.context_menu.take().is_some() {
            actions.push(Action::ContextMenuClosed);
        }
        if button == Button::Middle {
            self.begin_hold(HoldSource::MiddleButton, &mut actions);
        }

        if self.ui.pan_buttons.contains(button) {
            self.input = InputState::Panning { last_screen: screen_pt };
            return actions;
        }
        if button != Button::Primary {
            return actions;
        }

        let world = self.camera.screen_to_world(screen_pt);
        if let Some(shape_type) = self.ui.tool.shape_type() {
            self.input = InputState::Drawing { marquee: drawing_marquee(shape_type, world) };
            actions.push(Action::RenderNeeded);
        } else if self.ui.tool == Tool::Move {
            self.begin_drag(world, &mut actions);
        }
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                let delta = screen_pt.sub(*last_screen);
                *last_screen = screen_pt;
                self.camera.pan_by(delta.x, delta.y);
                vec![Action::CameraChanged(self.camera), Action::RenderNeeded]
            }
            InputState::Drawing { marquee } => {
                stretch_marquee(marquee, world);
                vec![Action::RenderNeeded]
            }
            InputState::Dragging { id, origin } => {
                let (id, origin) = (*id, *origin);
                self.drag_to(id, world.sub(origin))
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();

        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } => {}
            InputState::Drawing { marquee } if button == Button::Primary => {
                self.commit(&marquee, &mut actions);
            }
            InputState::Dragging { id, .. } if button == Button::Primary => {
                trace!(%id, "drag finished");
            }
            other => self.input = other,
        }

        if button == Button::Middle {
            self.end_hold(HoldSource::MiddleButton, &mut actions);
        }
        actions
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let next = self.camera.zoomed_at(screen_pt, delta.dy, modifiers.ctrl, self.config.zoom_limits());
        if next == self.camera {
            return Vec::new();
        }
        self.camera = next;
        trace!(zoom = next.zoom, pan_x = next.pan_x, pan_y = next.pan_y, "camera zoomed");
        vec![Action::CameraChanged(next), Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if key.is_space() {
            self.begin_hold(HoldSource::Space, &mut actions);
            return actions;
        }
        match key.0.as_str() {
            "Escape" => self.cancel(&mut actions),
            "Delete" | "Backspace" => {
                if let Some(index) = self.ui.selected_id.and_then(|id| self.doc.position(&id)) {
                    self.delete_at(index, &mut actions);
                }
            }
            name => {
                if modifiers.ctrl || modifiers.meta {
                    return actions;
                }
                if let Some(tool) = Tool::from_mnemonic(name) {
                    return self.set_tool(tool);
                }
            }
        }
        actions
    }

    pub fn on_key_up(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if key.is_space() {
            self.end_hold(HoldSource::Space, &mut actions);
        }
        actions
    }

    /// Right-click: open the menu for the shape under the pointer, or close it
    /// over empty canvas.
    pub fn on_context_menu(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        let world = self.camera.screen_to_world(screen_pt);
        let Some(index) = hit::hit_test(world, &self.doc, self.hit_slop()) else {
            if self.ui.context_menu.take().is_some() {
                actions.push(Action::ContextMenuClosed);
            }
            return actions;
        };
        let Some(shape) = self.doc.get(index) else {
            return actions;
        };
        let menu = ContextMenu {
            anchor: screen_pt,
            shape_id: shape.id,
            shape_index: index,
            shape_type: shape.shape_type(),
            fill: shape.style.fill.clone(),
        };
        debug!(id = %menu.shape_id, index, "context menu opened");
        self.select(menu.shape_id, &mut actions);
        self.ui.context_menu = Some(menu.clone());
        actions.push(Action::ContextMenuOpened(menu));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Context menu operations ---

    /// Replace the fill of the context menu's target.
    pub fn set_context_fill(&mut self, color: &str) -> Vec<Action> {
        let Some(index) = self.context_target_index() else {
            return Vec::new();
        };
        let patch = ShapePatch::fill(color);
        if !self.doc.update(index, &patch) {
            return Vec::new();
        }
        let Some(menu) = self.ui.context_menu.as_mut() else {
            return Vec::new();
        };
        menu.shape_index = index;
        menu.fill = Some(color.to_owned());
        vec![Action::ShapeUpdated { id: menu.shape_id, fields: patch }, Action::RenderNeeded]
    }

    /// Delete the context menu's target and close the menu.
    pub fn delete_context_target(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(index) = self.context_target_index() {
            self.delete_at(index, &mut actions);
        }
        if self.ui.context_menu.take().is_some() {
            actions.push(Action::ContextMenuClosed);
        }
        actions
    }

    pub fn dismiss_context_menu(&mut self) -> Vec<Action> {
        if self.ui.context_menu.take().is_some() {
            vec![Action::ContextMenuClosed]
        } else {
            Vec::new()
        }
    }

    /// Where to draw a menu of `menu_size` (CSS pixels), if one is open.
    #[must_use]
    pub fn context_menu_position(&self, menu_size: (f64, f64)) -> Option<MenuPosition> {
        self.ui
            .context_menu
            .as_ref()
            .map(|menu| place_menu(menu.anchor, menu_size, self.viewport))
    }

    /// Store index of the menu target, resolved by id when the index is stale.
    fn context_target_index(&self) -> Option<usize> {
        let menu = self.ui.context_menu.as_ref()?;
        match self.doc.get(menu.shape_index) {
            Some(shape) if shape.id == menu.shape_id => Some(menu.shape_index),
            _ => self.doc.position(&menu.shape_id),
        }
    }

    // --- Queries ---

    /// The currently selected shape, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn shapes(&self) -> &ShapeStore {
        &self.doc
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.doc.get_by_id(id)
    }

    /// The in-progress drawing preview.
    #[must_use]
    pub fn marquee(&self) -> Option<&Shape> {
        match &self.input {
            InputState::Drawing { marquee } => Some(marquee),
            _ => None,
        }
    }

    #[must_use]
    pub fn handles(&self) -> Option<&Shape> {
        self.ui.handles.as_ref()
    }

    #[must_use]
    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.ui.context_menu.as_ref()
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.ui.cursor
    }

    /// Validated tunables in effect.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    // --- Internals ---

    fn hit_slop(&self) -> f64 {
        self.camera.screen_dist_to_world(self.config.hit_slop_px)
    }

    fn select(&mut self, id: ShapeId, actions: &mut Vec<Action>) {
        self.ui.handles = self.doc.get_by_id(&id).map(target_handles);
        if self.ui.selected_id != Some(id) {
            self.ui.selected_id = Some(id);
            actions.push(Action::SelectionChanged(Some(id)));
        }
    }

    fn clear_selection(&mut self, actions: &mut Vec<Action>) {
        self.ui.handles = None;
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
            actions.push(Action::RenderNeeded);
        }
    }

    fn begin_drag(&mut self, world: Point, actions: &mut Vec<Action>) {
        let Some(index) = hit::hit_test(world, &self.doc, self.hit_slop()) else {
            self.clear_selection(actions);
            return;
        };
        let Some(shape) = self.doc.get(index) else {
            return;
        };
        let id = shape.id;
        let origin = world.sub(Point::new(shape.x, shape.y));

        if index + 1 < self.doc.len() && self.doc.raise_to_top(index) {
            actions.push(Action::ShapeRaised { id });
        }
        self.select(id, actions);
        self.input = InputState::Dragging { id, origin };
        actions.push(Action::RenderNeeded);
    }

    fn drag_to(&mut self, id: ShapeId, pos: Point) -> Vec<Action> {
        let Some(index) = self.doc.position(&id) else {
            return Vec::new();
        };
        let patch = ShapePatch::position(pos.x, pos.y);
        if !self.doc.update(index, &patch) {
            return Vec::new();
        }
        if self.ui.selected_id == Some(id) {
            self.ui.handles = self.doc.get(index).map(target_handles);
        }
        vec![Action::ShapeUpdated { id, fields: patch }, Action::RenderNeeded]
    }

    fn commit(&mut self, marquee: &Shape, actions: &mut Vec<Action>) {
        let bytes: [u8; 16] = self.rng.random();
        let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
        let fill = random_hex_color(&mut self.rng);

        actions.push(Action::RenderNeeded);
        let Some(shape) = commit_marquee(marquee, id, fill, &self.config) else {
            trace!(kind = %marquee.shape_type(), "zero-size shape discarded");
            return;
        };
        if !self.doc.append(shape.clone()) {
            return;
        }
        debug!(%id, kind = %shape.shape_type(), x = shape.x, y = shape.y, "shape committed");
        actions.push(Action::ShapeCreated(shape));
        self.select(id, actions);
    }

    fn delete_at(&mut self, index: usize, actions: &mut Vec<Action>) {
        let Some(shape) = self.doc.remove(index) else {
            return;
        };
        let id = shape.id;
        debug!(%id, kind = %shape.shape_type(), "shape deleted");

        if self.ui.selected_id == Some(id) {
            self.clear_selection(actions);
        }
        if matches!(self.input, InputState::Dragging { id: dragged, .. } if dragged == id) {
            self.input = InputState::Idle;
        }
        if self.ui.context_menu.as_ref().is_some_and(|menu| menu.shape_id == id) {
            self.ui.context_menu = None;
            actions.push(Action::ContextMenuClosed);
        }
        actions.push(Action::ShapeDeleted { id });
        actions.push(Action::RenderNeeded);
    }

    /// Escape: abandon the gesture and close the menu.
    fn cancel(&mut self, actions: &mut Vec<Action>) {
        let was = std::mem::take(&mut self.input);
        if matches!(was, InputState::Drawing { .. }) {
            trace!("drawing cancelled");
            actions.push(Action::RenderNeeded);
        }
        if self.ui.context_menu.take().is_some() {
            actions.push(Action::ContextMenuClosed);
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Create an engine with custom tunables.
    ///
    /// # Errors
    ///
    /// Returns the first constraint `config` violates.
    pub fn with_config(canvas: HtmlCanvasElement, config: CanvasConfig) -> Result<Self, ConfigError> {
        Ok(Self { canvas, core: EngineCore::with_config(config)? })
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the
    /// canvas backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        let vp = self.core.viewport;
        self.canvas.set_width((vp.width * vp.dpr).round() as u32);
        self.canvas.set_height((vp.height * vp.dpr).round() as u32);
    }

    // --- Delegated input events ---

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    pub fn on_context_menu(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_context_menu(screen_pt)
    }

    pub fn set_context_fill(&mut self, color: &str) -> Vec<Action> {
        self.core.set_context_fill(color)
    }

    pub fn delete_context_target(&mut self) -> Vec<Action> {
        self.core.delete_context_target()
    }

    pub fn dismiss_context_menu(&mut self) -> Vec<Action> {
        self.core.dismiss_context_menu()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let core = &self.core;
        render::draw(
            &ctx,
            &render::Scene {
                doc: &core.doc,
                camera: &core.camera,
                grid: &core.grid_lines(),
                marquee: core.marquee(),
                handles: core.handles(),
                viewport: core.viewport,
            },
        )
    }
}
