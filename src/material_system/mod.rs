// material_system/mod.rs
// Materials, textures, lights and color helpers
pub mod color;
pub mod light;
pub mod materials;
pub mod texture;

pub use color::Color;
pub use light::Light;
pub use materials::{Material, MaterialTable};
pub use texture::Texture;
