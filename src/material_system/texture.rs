use crate::material_system::color::{Color, from_rgb};
use image::RgbImage;
use log::debug;
use std::path::Path;

/// Immutable RGB texture. An empty texture (0x0) means "untextured".
#[derive(Debug, Clone, Default)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| format!("Failed to load texture '{}': {}", path.display(), e))?
            .to_rgb8();
        debug!(
            "Loaded texture '{}' ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Texture { image })
    }

    pub fn from_image(image: RgbImage) -> Self {
        Texture { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Nearest texel at `(floor(u * (w - 1)), floor(v * (h - 1)))`.
    ///
    /// V is not flipped; row 0 is `v = 0`. Indices are clamped into the image,
    /// so UVs outside [0, 1] sample the border. `None` for an empty texture.
    pub fn sample(&self, u: f32, v: f32) -> Option<Color> {
        if self.is_empty() {
            return None;
        }
        let max_x = self.width() - 1;
        let max_y = self.height() - 1;
        let x = texel_index(u, max_x);
        let y = texel_index(v, max_y);
        Some(from_rgb(self.image.get_pixel(x, y).0))
    }
}

#[inline]
fn texel_index(coord: f32, max: u32) -> u32 {
    let scaled = (coord * max as f32).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else if scaled >= max as f32 {
        max
    } else {
        scaled as u32
    }
}
