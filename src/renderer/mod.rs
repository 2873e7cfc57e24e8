//! Rendering module
//!
//! Immediate-mode drawing through the [`Surface`] trait. The browser build
//! paints to a canvas 2D context; tests and the native runner record calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod recorder;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::{DrawStrategy, draw, draw_simulation, star_points, strategy_for};
pub use recorder::{DrawCall, RecordingSurface};
pub use surface::{GradientStop, Surface};
