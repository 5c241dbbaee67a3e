use crate::core::geometry_processor::ScreenTriangle;
use crate::material_system::light::Light;
use crate::material_system::materials::Material;
use nalgebra::Point2;

/// Everything the shader needs for one triangle.
pub struct TriangleData<'a> {
    pub triangle: &'a ScreenTriangle,
    pub material: &'a Material,
    pub light: &'a Light,
    pub use_texture: bool,
}

impl TriangleData<'_> {
    #[inline]
    pub fn pixel(&self, i: usize) -> Point2<f32> {
        let v = &self.triangle.screen[i];
        Point2::new(v.x, v.y)
    }

    pub fn pixels(&self) -> [Point2<f32>; 3] {
        [self.pixel(0), self.pixel(1), self.pixel(2)]
    }
}

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    /// Screen AABB of the three points clamped to a `width` x `height` buffer,
    /// `None` when it misses the buffer entirely.
    pub fn from_points(points: &[Point2<f32>; 3], width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let (mut lo_x, mut lo_y) = (f32::INFINITY, f32::INFINITY);
        let (mut hi_x, mut hi_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                return None;
            }
            lo_x = lo_x.min(p.x);
            lo_y = lo_y.min(p.y);
            hi_x = hi_x.max(p.x);
            hi_y = hi_y.max(p.y);
        }

        let max_col = (width - 1) as f32;
        let max_row = (height - 1) as f32;
        if hi_x < 0.0 || hi_y < 0.0 || lo_x.floor() > max_col || lo_y.floor() > max_row {
            return None;
        }

        Some(BoundingBox {
            min_x: lo_x.floor().max(0.0) as u32,
            min_y: lo_y.floor().max(0.0) as u32,
            max_x: hi_x.floor().min(max_col) as u32,
            max_y: hi_y.floor().min(max_row) as u32,
        })
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn for_each_pixel<F>(&self, mut callback: F)
    where
        F: FnMut(u32, u32),
    {
        for y in self.min_y..=self.max_y {
            for x in self.min_x..=self.max_x {
                callback(x, y);
            }
        }
    }
}
