// geometry/mod.rs
// Transform chain, camera and per-face visibility tests
pub mod camera;
pub mod culling;
pub mod interpolation;
pub mod transform;
