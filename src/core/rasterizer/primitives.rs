use crate::core::frame_buffer::RenderTarget;
use crate::io::render_settings::VertexShape;
use image::Rgb;

/// Steps between on/off toggles of a dashed line.
const DASH_LENGTH: u32 = 15;

/// Bresenham line from `from` to `to`, both ends included.
///
/// With `dashed`, drawing toggles every 15 steps. No depth test.
pub fn draw_line(target: &mut RenderTarget, from: (i32, i32), to: (i32, i32), color: Rgb<u8>, dashed: bool) {
    let (mut x, mut y) = from;
    let (x2, y2) = to;
    let dx = (x2 - x).abs();
    let dy = (y2 - y).abs();
    let sx = if x < x2 { 1 } else { -1 };
    let sy = if y < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut step = 0;
    let mut draw = true;
    loop {
        if draw {
            target.plot(x, y, color);
        }
        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }

        if dashed {
            step += 1;
            if step >= DASH_LENGTH {
                draw = !draw;
                step = 0;
            }
        }
    }
}

/// Vertex marker of `radius` pixels around `center`; nothing for radius <= 0.
///
/// Only the part of the marker inside the buffer is visited, so the cost is
/// bounded by the buffer size whatever the radius.
pub fn draw_point(target: &mut RenderTarget, center: (i32, i32), radius: i32, shape: VertexShape, color: Rgb<u8>) {
    if radius <= 0 {
        return;
    }
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let r = i64::from(radius);
    let (width, height) = (i64::from(target.width()), i64::from(target.height()));
    let r2 = r * r;

    for y in (-r).max(-cy)..=r.min(height - 1 - cy) {
        for x in (-r).max(-cx)..=r.min(width - 1 - cx) {
            if shape == VertexShape::Circle && x * x + y * y > r2 {
                continue;
            }
            // In-buffer coordinates fit in i32.
            target.plot((cx + x) as i32, (cy + y) as i32, color);
        }
    }
}

/// Truncates a screen-space coordinate to a pixel, saturating at the i32 range.
#[inline]
pub fn to_pixel(x: f32, y: f32) -> (i32, i32) {
    (x as i32, y as i32)
}
