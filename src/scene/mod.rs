// scene/mod.rs
// Scene graph data: meshes, objects and the scene aggregate
pub mod mesh;
pub mod scene;
pub mod scene_object;

pub use mesh::{Face, Mesh, Normal, UvCoord, Vertex};
pub use scene::Scene;
pub use scene_object::Object;
