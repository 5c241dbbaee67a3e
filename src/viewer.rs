use crate::core::renderer::{RenderBackend, Renderer};
use crate::io::render_settings::{RenderSettings, VertexShape};
use crate::scene::Scene;
use image::RgbImage;
use log::{info, warn};
use std::path::Path;

/// Command surface a windowing layer drives: loading, settings and movement
/// of the active object. Rendering itself goes through a `RenderBackend`.
pub struct Viewer<R: RenderBackend = Renderer> {
    scene: Scene,
    renderer: R,
}

impl Viewer<Renderer> {
    pub fn new(width: u32, height: u32) -> Self {
        let mut viewer = Viewer::with_backend(Scene::new(), Renderer::new(width, height));
        viewer.update_camera_aspect(width, height);
        viewer
    }
}

impl<R: RenderBackend> Viewer<R> {
    pub fn with_backend(scene: Scene, renderer: R) -> Self {
        Viewer { scene, renderer }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Loads an OBJ and makes it the target of movement commands.
    pub fn load_object<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, String> {
        let index = self.scene.load_object(path)?;
        self.scene.set_active_object(index)?;
        Ok(index)
    }

    /// Renders the scene and returns the new frame.
    pub fn update_model(&self) -> RgbImage {
        self.renderer.render(&self.scene)
    }

    pub fn image(&self) -> RgbImage {
        self.renderer.image()
    }

    /// Resizes both buffers and matches the active camera's aspect ratio.
    pub fn resize_buffers(&mut self, width: u32, height: u32) {
        self.renderer.resize_buffers(width, height);
        self.update_camera_aspect(width, height);
    }

    fn update_camera_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(camera) = self.scene.camera_mut() {
            camera.set_aspect_ratio(width as f32 / height as f32);
        }
    }

    // ===== render settings =====

    pub fn settings(&self) -> RenderSettings {
        self.renderer.settings()
    }

    pub fn change_render_dot_setting(&self, enable: bool, color: [u8; 3], size: i32, shape: VertexShape) {
        let mut settings = self.renderer.settings();
        settings.render_dot = enable;
        settings.vertex_color = color;
        settings.vertex_size = size;
        settings.vertex_shape = shape;
        self.renderer.set_settings(settings);
    }

    pub fn change_render_line_setting(&self, enable: bool, color: [u8; 3], dashed: bool) {
        let mut settings = self.renderer.settings();
        settings.render_line = enable;
        settings.line_color = color;
        settings.line_dashed = dashed;
        self.renderer.set_settings(settings);
    }

    pub fn change_render_face_setting(&self, enable: bool, texture: bool) {
        let mut settings = self.renderer.settings();
        settings.render_face = enable;
        settings.texture = texture;
        self.renderer.set_settings(settings);
    }

    pub fn save_settings<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        self.renderer.settings().save_to_file(path)
    }

    /// Applies a persisted settings file; on failure the current settings stay.
    pub fn load_settings<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let mut settings = self.renderer.settings();
        settings.load_from_file(path)?;
        self.renderer.set_settings(settings);
        Ok(())
    }

    // ===== movement of the active object =====

    fn with_active_object<F>(&mut self, action: &str, f: F) -> bool
    where
        F: FnOnce(&mut crate::scene::Object),
    {
        match self.scene.active_object_mut() {
            Some(object) => {
                f(object);
                true
            }
            None => {
                warn!("Ignoring {}: no object loaded", action);
                false
            }
        }
    }

    pub fn move_by(&mut self, x: f32, y: f32, z: f32) -> bool {
        self.with_active_object("move", |object| object.translate(x, y, z))
    }

    pub fn move_up(&mut self, step: f32) -> bool {
        self.move_by(0.0, step, 0.0)
    }

    pub fn move_down(&mut self, step: f32) -> bool {
        self.move_by(0.0, -step, 0.0)
    }

    pub fn move_left(&mut self, step: f32) -> bool {
        self.move_by(-step, 0.0, 0.0)
    }

    pub fn move_right(&mut self, step: f32) -> bool {
        self.move_by(step, 0.0, 0.0)
    }

    pub fn move_forward(&mut self, step: f32) -> bool {
        self.move_by(0.0, 0.0, -step)
    }

    pub fn move_backward(&mut self, step: f32) -> bool {
        self.move_by(0.0, 0.0, step)
    }

    /// Local rotation by Euler angles in radians.
    pub fn rotate(&mut self, ax: f32, ay: f32, az: f32) -> bool {
        self.with_active_object("rotate", |object| object.rotate(ax, ay, az))
    }

    pub fn rotate_x(&mut self, angle_rad: f32) -> bool {
        self.rotate(angle_rad, 0.0, 0.0)
    }

    pub fn rotate_y(&mut self, angle_rad: f32) -> bool {
        self.rotate(0.0, angle_rad, 0.0)
    }

    pub fn rotate_z(&mut self, angle_rad: f32) -> bool {
        self.rotate(0.0, 0.0, angle_rad)
    }

    /// Local scale. Zero factors would make the transform singular and are refused.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> Result<(), String> {
        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            return Err(format!("Refusing zero scale factor ({}, {}, {})", sx, sy, sz));
        }
        if self.with_active_object("scale", |object| object.scale(sx, sy, sz)) {
            Ok(())
        } else {
            Err("No object loaded".to_string())
        }
    }

    pub fn scale_uniform(&mut self, factor: f32) -> Result<(), String> {
        self.scale(factor, factor, factor)
    }

    pub fn log_summary(&self) {
        info!(
            "Scene: {} objects, {} materials, {} cameras, {} lights",
            self.scene.objects.len(),
            self.scene.materials.len(),
            self.scene.cameras.len(),
            self.scene.lights.len()
        );
    }
}
