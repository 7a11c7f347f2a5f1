//! Canvas core for a browser vector sketchboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive surface of the drawing canvas: pan/zoom camera state, the
//! visible grid, the shape store, the tool state machine that turns pointer
//! gestures into rectangles, circles and triangles, hit-testing, the context
//! menu, and rendering onto a 2D canvas. The host JavaScript layer wires DOM
//! events to the engine and applies the returned [`engine::Action`]s (cursor
//! changes, menu placement, redraw requests).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shape types and the ordered shape store |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`grid`] | Visible grid line computation |
//! | [`input`] | Input event types, tools and the gesture state machine |
//! | [`tool`] | Marquee, commit and handles geometry for the drawing tools |
//! | [`menu`] | Context menu state and placement |
//! | [`hit`] | Hit-testing against shapes |
//! | [`render`] | Layered scene rendering |
//! | [`config`] | Engine tunables loaded from JSON |
//! | [`color`] | Fill colour helpers |
//! | [`consts`] | Shared numeric constants (zoom limits, grid, overlay styling) |

pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod input;
pub mod menu;
pub mod render;
pub mod tool;
