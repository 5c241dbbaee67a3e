use nalgebra::{Point2, Vector2, Vector3};
use std::ops::{Add, Mul};

/// Triangles with less doubled area than this produce no fragments.
pub const DEGENERATE_AREA: f32 = 1e-6;

/// Signed doubled area of triangle (a, b, c); positive when counter-clockwise in a Y-up frame.
#[inline]
pub fn signed_area_x2(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Barycentric weights (alpha, beta, gamma) of `p` relative to (v0, v1, v2),
/// as ratios of signed sub-triangle areas to the whole.
///
/// Returns `None` for a zero-area triangle.
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    if is_degenerate(v0, v1, v2) {
        return None;
    }
    let total = signed_area_x2(v0, v1, v2);
    let inv_total = 1.0 / total;

    let beta = signed_area_x2(v0, p, v2) * inv_total;
    let gamma = signed_area_x2(v0, v1, p) * inv_total;
    let alpha = 1.0 - beta - gamma;

    Some(Vector3::new(alpha, beta, gamma))
}

/// Weights from `barycentric_coordinates` sum to one by construction, so
/// only their signs decide containment.
#[inline(always)]
pub fn is_inside_triangle(bary: &Vector3<f32>) -> bool {
    bary.x >= 0.0 && bary.y >= 0.0 && bary.z >= 0.0
}

#[inline]
pub fn is_degenerate(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> bool {
    signed_area_x2(v0, v1, v2).abs() < DEGENERATE_AREA
}

/// Plain barycentric blend of three per-vertex attributes.
#[inline]
pub fn interpolate<T>(bary: &Vector3<f32>, a: T, b: T, c: T) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    a * bary.x + b * bary.y + c * bary.z
}

/// Perspective-correct UV: blends `uv / w`, then divides by the blended `1 / w`.
///
/// Falls back to the linear blend when any `w` is zero.
pub fn interpolate_uv_perspective(
    bary: &Vector3<f32>,
    uvs: [Vector2<f32>; 3],
    ws: [f32; 3],
) -> Vector2<f32> {
    if ws.iter().any(|w| *w == 0.0) {
        return interpolate(bary, uvs[0], uvs[1], uvs[2]);
    }
    let inv_w = [1.0 / ws[0], 1.0 / ws[1], 1.0 / ws[2]];
    let uv_over_w = interpolate(
        bary,
        uvs[0] * inv_w[0],
        uvs[1] * inv_w[1],
        uvs[2] * inv_w[2],
    );
    let one_over_w = interpolate(bary, inv_w[0], inv_w[1], inv_w[2]);
    if one_over_w.abs() < f32::EPSILON {
        interpolate(bary, uvs[0], uvs[1], uvs[2])
    } else {
        uv_over_w / one_over_w
    }
}
