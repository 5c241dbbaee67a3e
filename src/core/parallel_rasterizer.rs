use crate::core::frame_buffer::RenderTarget;
use crate::core::geometry_processor::ScreenTriangle;
use crate::core::rasterizer::primitives::to_pixel;
use crate::core::rasterizer::{TriangleData, draw_line, draw_point, merge_tile, rasterize_triangle};
use crate::io::render_settings::RenderSettings;
use crate::material_system::light::Light;
use crate::material_system::materials::MaterialTable;
use image::Rgb;
use rayon::prelude::*;
use std::sync::Mutex;

/// Fans triangles out over the rayon pool and funnels their tiles into one target.
pub struct ParallelRasterizer;

impl ParallelRasterizer {
    /// Rasterizes filled triangles. Each worker shades into a private tile and
    /// then merges it under the target lock, re-checking depth per pixel, so
    /// the result does not depend on scheduling order.
    pub fn rasterize_triangles(
        triangles: &[ScreenTriangle],
        materials: &MaterialTable,
        light: &Light,
        target: &mut RenderTarget,
        use_texture: bool,
    ) {
        if triangles.is_empty() {
            return;
        }
        let (width, height) = (target.width(), target.height());
        let shared = Mutex::new(target);

        triangles.par_iter().for_each(|triangle| {
            let data = TriangleData {
                triangle,
                material: materials.resolve(triangle.material),
                light,
                use_texture,
            };
            let Some(tile) = rasterize_triangle(&data, width, height) else {
                return;
            };
            let mut guard = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            merge_tile(&mut guard, &tile);
        });
    }

    /// Wireframe edges and vertex markers, drawn over everything without a depth test.
    pub fn draw_overlays(triangles: &[ScreenTriangle], settings: &RenderSettings, target: &mut RenderTarget) {
        if !settings.render_line && !settings.render_dot {
            return;
        }
        let line_color = Rgb(settings.line_color);
        let vertex_color = Rgb(settings.vertex_color);

        for triangle in triangles {
            let corners = triangle.screen.map(|v| to_pixel(v.x, v.y));
            if settings.render_line {
                for i in 0..3 {
                    draw_line(target, corners[i], corners[(i + 1) % 3], line_color, settings.line_dashed);
                }
            }
            if settings.render_dot {
                for corner in corners {
                    draw_point(target, corner, settings.vertex_size, settings.vertex_shape, vertex_color);
                }
            }
        }
    }
}
