use super::shading::shade_fragment;
use super::triangle_data::{BoundingBox, TriangleData};
use crate::core::frame_buffer::{FAR_DEPTH, RenderTarget};
use crate::geometry::interpolation::{barycentric_coordinates, interpolate, is_degenerate, is_inside_triangle};
use crate::material_system::color::to_rgb;
use image::Rgb;
use nalgebra::Point2;

/// Private depth and color for one triangle's bounding box.
///
/// Filled without synchronization, then merged into the shared target.
#[derive(Debug, Clone)]
pub struct Tile {
    pub bbox: BoundingBox,
    depth: Vec<f32>,
    color: Vec<Rgb<u8>>,
}

impl Tile {
    fn new(bbox: BoundingBox) -> Self {
        let len = bbox.width() as usize * bbox.height() as usize;
        Tile {
            bbox,
            depth: vec![FAR_DEPTH; len],
            color: vec![Rgb([0, 0, 0]); len],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y - self.bbox.min_y) as usize * self.bbox.width() as usize + (x - self.bbox.min_x) as usize
    }

    /// Number of pixels this tile would write into an empty target.
    #[cfg(test)]
    fn covered_pixels(&self) -> usize {
        self.depth.iter().filter(|&&d| d < FAR_DEPTH).count()
    }
}

/// Scan-converts one triangle into a private tile.
///
/// Pixels are sampled at their centers; the nearest fragment per pixel is
/// kept. Returns `None` for zero-area or fully off-screen triangles.
pub fn rasterize_triangle(data: &TriangleData, width: u32, height: u32) -> Option<Tile> {
    let [p0, p1, p2] = data.pixels();
    if is_degenerate(p0, p1, p2) {
        return None;
    }
    let bbox = BoundingBox::from_points(&[p0, p1, p2], width, height)?;

    let screen = &data.triangle.screen;
    let mut tile = Tile::new(bbox);
    bbox.for_each_pixel(|x, y| {
        let center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
        let Some(bary) = barycentric_coordinates(center, p0, p1, p2) else {
            return;
        };
        if !is_inside_triangle(&bary) {
            return;
        }

        let z = interpolate(&bary, screen[0].z, screen[1].z, screen[2].z);
        let index = tile.index(x, y);
        if z < tile.depth[index] {
            tile.depth[index] = z;
            tile.color[index] = to_rgb(&shade_fragment(data, &bary));
        }
    });
    Some(tile)
}

/// Commits every tile pixel that is still nearer than the shared depth.
pub fn merge_tile(target: &mut RenderTarget, tile: &Tile) {
    tile.bbox.for_each_pixel(|x, y| {
        let index = tile.index(x, y);
        let z = tile.depth[index];
        if z < FAR_DEPTH {
            target.write_if_closer(x, y, z, tile.color[index]);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry_processor::ScreenTriangle;
    use crate::io::render_settings::RenderSettings;
    use crate::material_system::light::Light;
    use crate::material_system::materials::Material;
    use nalgebra::{Vector2, Vector3, Vector4};

    fn flat_triangle(points: [(f32, f32); 3], z: f32) -> ScreenTriangle {
        ScreenTriangle {
            screen: points.map(|(x, y)| Vector4::new(x, y, z, 1.0)),
            normals: [Vector3::z(); 3],
            world: [Vector3::zeros(); 3],
            uvs: [Vector2::zeros(); 3],
            material: None,
        }
    }

    fn colored(diffuse: f32) -> Material {
        Material {
            ambient: Vector3::zeros(),
            diffuse: Vector3::new(diffuse, diffuse, diffuse),
            ..Default::default()
        }
    }

    #[test]
    fn small_triangle_covers_expected_pixels() {
        // Right triangle with legs of 4 pixels: centers strictly below the
        // diagonal x + y = 4 are inside.
        let tri = flat_triangle([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], 0.5);
        let material = Material::default();
        let light = Light::default();
        let data = TriangleData {
            triangle: &tri,
            material: &material,
            light: &light,
            use_texture: false,
        };
        let tile = rasterize_triangle(&data, 16, 16).expect("visible");
        assert_eq!(tile.covered_pixels(), 10);
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let tri = flat_triangle([(0.0, 0.0), (4.0, 4.0), (8.0, 8.0)], 0.5);
        let material = Material::default();
        let light = Light::default();
        let data = TriangleData {
            triangle: &tri,
            material: &material,
            light: &light,
            use_texture: false,
        };
        assert!(rasterize_triangle(&data, 16, 16).is_none());
    }

    #[test]
    fn merge_order_does_not_change_result() {
        let near = flat_triangle([(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)], 0.2);
        let far = flat_triangle([(0.0, 0.0), (8.0, 0.0), (0.0, 8.0)], 0.6);
        let bright = colored(1.0);
        let dim = colored(0.5);
        let light = Light::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(200.0, 200.0, 200.0));

        let near_tile = rasterize_triangle(
            &TriangleData {
                triangle: &near,
                material: &bright,
                light: &light,
                use_texture: false,
            },
            8,
            8,
        )
        .expect("visible");
        let far_tile = rasterize_triangle(
            &TriangleData {
                triangle: &far,
                material: &dim,
                light: &light,
                use_texture: false,
            },
            8,
            8,
        )
        .expect("visible");

        let mut a = RenderTarget::new(8, 8, RenderSettings::default());
        merge_tile(&mut a, &near_tile);
        merge_tile(&mut a, &far_tile);

        let mut b = RenderTarget::new(8, 8, RenderSettings::default());
        merge_tile(&mut b, &far_tile);
        merge_tile(&mut b, &near_tile);

        assert_eq!(a.color, b.color);
        assert_eq!(a.depth, b.depth);
        assert_eq!(*a.color.get_pixel(1, 1), Rgb([200, 200, 200]));
        assert!((a.depth_at(1, 1) - 0.2).abs() < 1e-6);
    }
}
