use crate::geometry::transform::Transform;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// A mesh placed in the world by its own transform.
#[derive(Debug, Clone, Default)]
pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Transform,
}

impl Object {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Object {
            name: name.into(),
            mesh,
            transform: Transform::new(),
        }
    }

    /// Moves the object along world axes.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.transform.translate(x, y, z);
    }

    /// Rotates by Euler angles in radians, in the object's local frame.
    pub fn rotate(&mut self, ax: f32, ay: f32, az: f32) {
        self.transform.rotate(&Vector3::new(ax, ay, az));
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.transform.scale(sx, sy, sz);
    }
}
