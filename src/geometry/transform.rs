use crate::scene::mesh::{Normal, Vertex};
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use rayon::prelude::*;

/// Factory for the elementary matrices `Transform` composes.
pub struct TransformFactory;

impl TransformFactory {
    /// Rotation about the X axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (sin, cos) = angle_rad.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = cos;
        m[(1, 2)] = -sin;
        m[(2, 1)] = sin;
        m[(2, 2)] = cos;
        m
    }

    /// Rotation about the Y axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (sin, cos) = angle_rad.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = cos;
        m[(0, 2)] = sin;
        m[(2, 0)] = -sin;
        m[(2, 2)] = cos;
        m
    }

    /// Rotation about the Z axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (sin, cos) = angle_rad.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = cos;
        m[(0, 1)] = -sin;
        m[(1, 0)] = sin;
        m[(1, 1)] = cos;
        m
    }

    /// Independent Euler angles (radians) applied X first, then Y, then Z: `Rz * Ry * Rx`.
    pub fn rotation_euler(angles: &Vector3<f32>) -> Matrix4<f32> {
        Self::rotation_z(angles.z) * Self::rotation_y(angles.y) * Self::rotation_x(angles.x)
    }

    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(translation)
    }

    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(scale)
    }
}

/// Affine object-to-world transform.
///
/// Translations compose in world order (left-multiplied), while rotations and
/// scales compose in the object's local frame (right-multiplied), so moving an
/// object never depends on how it was previously rotated or scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    pub fn new() -> Self {
        Transform {
            matrix: Matrix4::identity(),
        }
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.matrix = TransformFactory::translation(&Vector3::new(x, y, z)) * self.matrix;
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.matrix *= TransformFactory::scaling_nonuniform(&Vector3::new(sx, sy, sz));
    }

    /// Rotates by the Euler angles (radians) packed in `axis`, in local space.
    pub fn rotate(&mut self, axis: &Vector3<f32>) {
        self.matrix *= TransformFactory::rotation_euler(axis);
    }

    pub fn apply(&self, vertex: &Vertex) -> Vertex {
        self.matrix * vertex
    }

    /// Inverse-transpose of the upper-left 3x3 block, `None` when it is singular.
    pub fn normal_matrix(&self) -> Option<Matrix3<f32>> {
        compute_normal_matrix(&self.matrix)
    }

    pub fn apply_to_normal(&self, normal: &Normal) -> Option<Normal> {
        self.normal_matrix()
            .map(|normal_matrix| (normal_matrix * normal).normalize())
    }
}

/// Inverse-transpose of the linear part of `matrix`, used to carry normals
/// through non-rigid transforms.
pub fn compute_normal_matrix(matrix: &Matrix4<f32>) -> Option<Matrix3<f32>> {
    let linear: Matrix3<f32> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    linear.try_inverse().map(|inv| inv.transpose())
}

/// Multiplies every vertex by `matrix` in parallel.
pub fn transform_vertices(vertices: &[Vertex], matrix: &Matrix4<f32>) -> Vec<Vertex> {
    vertices.par_iter().map(|v| matrix * v).collect()
}

/// Carries normals through `normal_matrix` and renormalizes them.
pub fn transform_normals(normals: &[Normal], normal_matrix: &Matrix3<f32>) -> Vec<Normal> {
    normals
        .par_iter()
        .map(|n| {
            let transformed = normal_matrix * n;
            transformed.try_normalize(1e-12).unwrap_or(transformed)
        })
        .collect()
}

/// Maps clip-space vertices to screen space.
///
/// x and y land on pixel coordinates with the origin top-left (clip +Y is up,
/// so Y is flipped). z keeps the post-divide depth and w keeps the clip w for
/// perspective-correct interpolation.
pub fn clip_to_screen(clip_coords: &[Vertex], width: f32, height: f32) -> Vec<Vertex> {
    clip_coords
        .par_iter()
        .map(|clip| {
            let w = clip.w;
            Vector4::new(
                (clip.x / w + 1.0) * 0.5 * width,
                (1.0 - clip.y / w) * 0.5 * height,
                clip.z / w,
                w,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(actual: &Vector4<f32>, expected: &Vector4<f32>) {
        assert!(
            (actual - expected).norm() < 1e-5,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn identity_is_noop() {
        let transform = Transform::new();
        let v = Vector4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(transform.apply(&v), v);
    }

    #[test]
    fn translation_shifts_point_and_keeps_w() {
        let mut transform = Transform::new();
        transform.translate(1.0, 2.0, 3.0);
        let result = transform.apply(&Vector4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(result, Vector4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn scaling_unit_point() {
        let mut transform = Transform::new();
        transform.scale(2.0, 3.0, 4.0);
        let result = transform.apply(&Vector4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(result, Vector4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn rotation_about_each_axis() {
        let mut rx = Transform::new();
        rx.rotate(&Vector3::new(FRAC_PI_2, 0.0, 0.0));
        assert_close(
            &rx.apply(&Vector4::new(0.0, 1.0, 0.0, 1.0)),
            &Vector4::new(0.0, 0.0, 1.0, 1.0),
        );

        let mut ry = Transform::new();
        ry.rotate(&Vector3::new(0.0, FRAC_PI_2, 0.0));
        assert_close(
            &ry.apply(&Vector4::new(1.0, 0.0, 0.0, 1.0)),
            &Vector4::new(0.0, 0.0, -1.0, 1.0),
        );

        let mut rz = Transform::new();
        rz.rotate(&Vector3::new(0.0, 0.0, FRAC_PI_2));
        assert_close(
            &rz.apply(&Vector4::new(1.0, 0.0, 0.0, 1.0)),
            &Vector4::new(0.0, 1.0, 0.0, 1.0),
        );
    }

    #[test]
    fn translation_is_independent_of_prior_rotation_and_scale() {
        let mut transform = Transform::new();
        transform.rotate(&Vector3::new(0.0, FRAC_PI_2, 0.0));
        transform.scale(3.0, 3.0, 3.0);
        transform.translate(5.0, 0.0, 0.0);
        let origin = transform.apply(&Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_close(&origin, &Vector4::new(5.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn uniform_scale_keeps_normal_direction() {
        let mut transform = Transform::new();
        transform.scale(2.0, 2.0, 2.0);
        let n = transform
            .apply_to_normal(&Vector3::new(0.0, 1.0, 0.0))
            .expect("invertible");
        assert!((n - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn nonuniform_scale_uses_inverse_transpose() {
        let mut transform = Transform::new();
        transform.scale(1.0, 2.0, 1.0);
        // y = -x becomes y = -2x, whose normal is (2, 1) up to scale.
        let n = transform
            .apply_to_normal(&Vector3::new(1.0, 1.0, 0.0).normalize())
            .expect("invertible");
        assert!((n.norm() - 1.0).abs() < 1e-6);
        assert!(n.x > n.y);
    }

    #[test]
    fn zero_scale_has_no_normal_matrix() {
        let mut transform = Transform::new();
        transform.scale(0.0, 1.0, 1.0);
        assert!(transform.normal_matrix().is_none());
        assert!(transform.apply_to_normal(&Vector3::y()).is_none());
    }

    #[test]
    fn clip_to_screen_flips_y() {
        let screen = clip_to_screen(
            &[
                Vector4::new(-2.0, 2.0, 1.0, 2.0),
                Vector4::new(1.0, -1.0, 0.5, 1.0),
            ],
            200.0,
            100.0,
        );
        assert_close(&screen[0], &Vector4::new(0.0, 0.0, 0.5, 2.0));
        assert_close(&screen[1], &Vector4::new(200.0, 100.0, 0.5, 1.0));
    }
}
