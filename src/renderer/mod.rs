//! Rendering module
//!
//! The simulation is turned into a [`DrawList`] by [`build_frame`]; a
//! [`Renderer`] paints it. The browser build paints with a Canvas2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod frame;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use frame::{build_frame, shake_offset};
pub use shapes::{DrawList, Shape};

/// Something that can paint a frame
pub trait Renderer {
    fn draw(&mut self, frame: &DrawList);
}
