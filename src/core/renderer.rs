use crate::core::frame_buffer::FrameBuffer;
use crate::core::geometry_processor::GeometryProcessor;
use crate::core::parallel_rasterizer::ParallelRasterizer;
use crate::io::render_settings::RenderSettings;
use crate::scene::Scene;
use image::RgbImage;
use log::{debug, info, warn};
use std::time::Instant;

/// What a host UI needs from a renderer.
pub trait RenderBackend {
    /// Draws one frame of `scene`, publishes it and returns a copy.
    fn render(&self, scene: &Scene) -> RgbImage;
    fn resize_buffers(&self, width: u32, height: u32);
    /// The last published frame.
    fn image(&self) -> RgbImage;
    fn settings(&self) -> RenderSettings;
    fn set_settings(&self, settings: RenderSettings);
}

/// CPU rasterizer drawing into a double-buffered frame.
#[derive(Debug)]
pub struct Renderer {
    frame_buffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_settings(width, height, RenderSettings::default())
    }

    pub fn with_settings(width: u32, height: u32, settings: RenderSettings) -> Self {
        Renderer {
            frame_buffer: FrameBuffer::new(width, height, settings),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.frame_buffer.dimensions()
    }
}

impl RenderBackend for Renderer {
    fn render(&self, scene: &Scene) -> RgbImage {
        let start_time = Instant::now();

        // Held for the whole pass so settings and size cannot change mid-frame.
        let mut back = self.frame_buffer.lock_back();
        back.clear();
        let settings = back.settings.clone();
        let (width, height) = (back.width(), back.height());

        let camera = scene.camera().filter(|camera| !camera.is_degenerate());
        let light = scene.light();
        let mut triangle_count = 0usize;

        match (camera, light) {
            (Some(camera), Some(light)) => {
                for object in &scene.objects {
                    let triangles = GeometryProcessor::process_object(object, camera, width, height);
                    triangle_count += triangles.len();

                    if settings.render_face {
                        ParallelRasterizer::rasterize_triangles(
                            &triangles,
                            &scene.materials,
                            light,
                            &mut back,
                            settings.texture,
                        );
                    }
                    ParallelRasterizer::draw_overlays(&triangles, &settings, &mut back);
                }
            }
            (None, _) => warn!("No usable camera, drawing background only"),
            (_, None) => warn!("Scene has no light, drawing background only"),
        }

        self.frame_buffer.swap(&mut back);
        drop(back);

        debug!("Rendered {} triangles", triangle_count);
        info!(
            "Frame {}x{} rendered in {:?}",
            width,
            height,
            start_time.elapsed()
        );
        self.frame_buffer.front_image()
    }

    fn resize_buffers(&self, width: u32, height: u32) {
        self.frame_buffer.resize(width, height);
        debug!("Resized frame buffers to {}x{}", width, height);
    }

    fn image(&self) -> RgbImage {
        self.frame_buffer.front_image()
    }

    fn settings(&self) -> RenderSettings {
        self.frame_buffer.settings()
    }

    fn set_settings(&self, settings: RenderSettings) {
        self.frame_buffer.set_settings(settings);
    }
}
