//! Rendering module
//!
//! Maps the 30x20 world onto the drawing surface and draws each frame back to
//! front. Backends only need to implement `DrawSurface`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod surface;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{Frame, colors, draw_frame};
pub use surface::{DrawCommand, DrawSurface, Label, Path, RecordingSurface, Stroke, TextAlign};
pub use viewport::Viewport;
