use super::triangle_data::TriangleData;
use crate::geometry::interpolation::{interpolate, interpolate_uv_perspective};
use crate::material_system::color::Color;
use crate::material_system::light::Light;
use crate::material_system::materials::Material;
use nalgebra::Vector3;

/// Ambient plus Lambert diffuse, clamped to [0, 255]. Specular is not evaluated.
pub fn phong_color(
    material: &Material,
    light: &Light,
    world_position: &Vector3<f32>,
    normal: &Vector3<f32>,
) -> Color {
    let ambient = material.ambient.component_mul(&light.color);
    let diffuse = match light.direction_from(world_position) {
        Some(light_dir) => {
            material.diffuse.component_mul(&light.color) * normal.dot(&light_dir).max(0.0)
        }
        None => Color::zeros(),
    };
    (ambient + diffuse).map(|c| c.clamp(0.0, 255.0))
}

/// Modulates a lit color by a texel: `(lit / 255) * (texel / 255) * 255`.
#[inline]
pub fn modulate(lit: &Color, texel: &Color) -> Color {
    lit.component_mul(texel) / 255.0
}

/// Color of the fragment at barycentric `bary` inside `data`.
pub fn shade_fragment(data: &TriangleData, bary: &Vector3<f32>) -> Color {
    let tri = data.triangle;
    let normal = interpolate(bary, tri.normals[0], tri.normals[1], tri.normals[2]);
    let world = interpolate(bary, tri.world[0], tri.world[1], tri.world[2]);
    let lit = phong_color(data.material, data.light, &world, &normal);

    if !data.use_texture || !data.material.has_texture() {
        return lit;
    }
    let uv = interpolate_uv_perspective(
        bary,
        tri.uvs,
        [tri.screen[0].w, tri.screen[1].w, tri.screen[2].w],
    );
    match data.material.texture.sample(uv.x, uv.y) {
        Some(texel) => modulate(&lit, &texel),
        None => lit,
    }
}
