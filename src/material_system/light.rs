use crate::material_system::color::Color;
use nalgebra::Vector3;

/// Point light with an RGB intensity on the 0..=255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector3<f32>,
    pub color: Color,
}

impl Default for Light {
    fn default() -> Self {
        Light {
            position: Vector3::new(0.0, 0.0, 200.0),
            color: Color::new(100.0, 100.0, 100.0),
        }
    }
}

impl Light {
    pub fn new(position: Vector3<f32>, color: Color) -> Self {
        Light { position, color }
    }

    /// Unit vector from `point` toward the light, `None` when they coincide.
    pub fn direction_from(&self, point: &Vector3<f32>) -> Option<Vector3<f32>> {
        (self.position - point).try_normalize(1e-12)
    }
}
