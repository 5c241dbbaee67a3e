use crate::io::render_settings::RenderSettings;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::sync::{Mutex, MutexGuard};

/// Depth value of an untouched pixel; only fragments strictly nearer are accepted.
pub const FAR_DEPTH: f32 = 1.0;

/// Back-buffer state: the image being drawn, its depth buffer, and the
/// settings the current frame was started with.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    pub color: RgbImage,
    pub depth: Vec<f32>,
    pub settings: RenderSettings,
}

impl RenderTarget {
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> Self {
        let mut target = RenderTarget {
            color: RgbImage::new(width, height),
            depth: vec![FAR_DEPTH; width as usize * height as usize],
            settings,
        };
        target.clear();
        target
    }

    pub fn width(&self) -> u32 {
        self.color.width()
    }

    pub fn height(&self) -> u32 {
        self.color.height()
    }

    /// Fills the image with the background color and resets depth.
    pub fn clear(&mut self) {
        let background = Rgb(self.settings.background_color);
        for pixel in self.color.pixels_mut() {
            *pixel = background;
        }
        self.depth.fill(FAR_DEPTH);
    }

    #[inline]
    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[y as usize * self.width() as usize + x as usize]
    }

    /// Writes `color` at (x, y) if `z` is strictly nearer than the stored depth.
    #[inline]
    pub fn write_if_closer(&mut self, x: u32, y: u32, z: f32, color: Rgb<u8>) -> bool {
        let index = y as usize * self.width() as usize + x as usize;
        if z < self.depth[index] {
            self.depth[index] = z;
            self.color.put_pixel(x, y, color);
            true
        } else {
            false
        }
    }

    /// Writes a pixel without a depth test; coordinates outside the image are ignored.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, color: Rgb<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width() && y < self.height() {
            self.color.put_pixel(x, y, color);
        }
    }
}

/// Double buffer: a back target that the renderer draws into and a front
/// image that readers see. Each side has its own lock, always taken back
/// first.
#[derive(Debug)]
pub struct FrameBuffer {
    back: Mutex<RenderTarget>,
    front: Mutex<RgbImage>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, settings: RenderSettings) -> Self {
        let back = RenderTarget::new(width, height, settings);
        let front = back.color.clone();
        FrameBuffer {
            back: Mutex::new(back),
            front: Mutex::new(front),
        }
    }

    /// Locks the back target, recovering it if a previous frame panicked.
    pub fn lock_back(&self) -> MutexGuard<'_, RenderTarget> {
        self.back.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_front(&self) -> MutexGuard<'_, RgbImage> {
        self.front.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publishes the finished back image. Callers pass the back guard they
    /// already hold, so the front lock is only taken for the exchange.
    pub fn swap(&self, back: &mut RenderTarget) {
        let mut front = self.lock_front();
        if front.dimensions() == back.color.dimensions() {
            std::mem::swap(&mut *front, &mut back.color);
        } else {
            *front = back.color.clone();
        }
    }

    /// Copy of the last published frame.
    pub fn front_image(&self) -> RgbImage {
        self.lock_front().clone()
    }

    /// Reallocates the back target and rescales the front image so readers
    /// keep seeing the previous frame until the next swap.
    pub fn resize(&self, width: u32, height: u32) {
        let mut back = self.lock_back();
        let mut front = self.lock_front();

        *front = if front.width() == 0 || front.height() == 0 {
            RgbImage::from_pixel(width, height, Rgb(back.settings.background_color))
        } else {
            imageops::resize(&*front, width, height, FilterType::Triangle)
        };

        let settings = back.settings.clone();
        *back = RenderTarget::new(width, height, settings);
    }

    pub fn settings(&self) -> RenderSettings {
        self.lock_back().settings.clone()
    }

    /// Replaces the settings; waits for any frame in progress to finish.
    pub fn set_settings(&self, settings: RenderSettings) {
        self.lock_back().settings = settings;
    }

    pub fn dimensions(&self) -> (u32, u32) {
        let back = self.lock_back();
        (back.width(), back.height())
    }
}
