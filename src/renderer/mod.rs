//! WebGPU rendering module
//!
//! The screen is a grid of flat-coloured cells. `shapes` turns a painted
//! [`FrameBuffer`](crate::platform::FrameBuffer) into quads; `pipeline`
//! uploads and draws them.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
