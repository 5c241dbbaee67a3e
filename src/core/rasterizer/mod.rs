//! # Triangle rasterization
//!
//! Scan conversion into private tiles, Phong shading with optional texture
//! modulation, and the line/point overlay primitives.

pub mod pixel_processor;
pub mod primitives;
pub mod shading;
pub mod triangle_data;

pub use pixel_processor::{Tile, merge_tile, rasterize_triangle};
pub use primitives::{draw_line, draw_point};
pub use triangle_data::{BoundingBox, TriangleData};
