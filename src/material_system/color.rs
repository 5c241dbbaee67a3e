use image::Rgb;
use nalgebra::Vector3;

/// RGB color with channels on the 0..=255 scale, kept as floats while shading.
pub type Color = Vector3<f32>;

#[inline]
pub fn from_rgb(rgb: [u8; 3]) -> Color {
    Color::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32)
}

/// Clamps each channel into [0, 255] and rounds to the nearest byte.
#[inline]
pub fn to_rgb(color: &Color) -> Rgb<u8> {
    let channel = |c: f32| {
        if c.is_nan() {
            0
        } else {
            c.clamp(0.0, 255.0).round() as u8
        }
    };
    Rgb([channel(color.x), channel(color.y), channel(color.z)])
}
