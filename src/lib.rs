//! CPU software rasterizer and scene model for a 3D mesh viewer.
//!
//! A frame runs every object through world transform, backface culling,
//! camera and projection transforms, clipping and screen mapping, then
//! scan-converts the survivors into a double-buffered image.

pub mod core;
pub mod geometry;
pub mod io;
pub mod material_system;
pub mod scene;
pub mod viewer;

pub use crate::core::{RenderBackend, Renderer};
pub use crate::io::render_settings::{RenderSettings, VertexShape};
pub use crate::scene::Scene;
pub use crate::viewer::Viewer;
