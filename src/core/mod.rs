// core/mod.rs
// Frame buffers, the per-object pipeline and the renderer
pub mod frame_buffer;
pub mod geometry_processor;
pub mod parallel_rasterizer;
pub mod rasterizer;
pub mod renderer;

pub use renderer::{RenderBackend, Renderer};
