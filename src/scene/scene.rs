use crate::geometry::camera::Camera;
use crate::io::obj_loader::load_obj;
use crate::material_system::{Light, MaterialTable};
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::Object;
use log::info;
use std::path::Path;

/// Everything a frame reads: objects, the shared material table, cameras and lights.
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<Object>,
    pub materials: MaterialTable,
    pub cameras: Vec<Camera>,
    pub lights: Vec<Light>,
    active_camera: usize,
    active_object: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            objects: Vec::new(),
            materials: MaterialTable::new(),
            cameras: vec![Camera::default()],
            lights: vec![Light::default()],
            active_camera: 0,
            active_object: 0,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads an OBJ file (and its MTL materials) as a new object.
    pub fn load_object<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, String> {
        let path = path.as_ref();
        let mesh = load_obj(path, &mut self.materials)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "object".to_string());
        info!(
            "Loaded object '{}': {} vertices, {} faces",
            name,
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(self.add_object(Object::new(name, mesh)))
    }

    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_mesh(&mut self, name: &str, mesh: Mesh) -> usize {
        self.add_object(Object::new(name, mesh))
    }

    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    pub fn add_light(&mut self, light: Light) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.cameras.get(self.active_camera)
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.cameras.get_mut(self.active_camera)
    }

    pub fn set_active_camera(&mut self, index: usize) -> Result<(), String> {
        if index >= self.cameras.len() {
            return Err(format!(
                "Camera index {} out of range ({} cameras)",
                index,
                self.cameras.len()
            ));
        }
        self.active_camera = index;
        Ok(())
    }

    /// The light the shader uses.
    pub fn light(&self) -> Option<&Light> {
        self.lights.first()
    }

    pub fn active_object_index(&self) -> usize {
        self.active_object
    }

    pub fn set_active_object(&mut self, index: usize) -> Result<(), String> {
        if index >= self.objects.len() {
            return Err(format!(
                "Object index {} out of range ({} objects)",
                index,
                self.objects.len()
            ));
        }
        self.active_object = index;
        Ok(())
    }

    /// Object targeted by movement commands, `None` while the scene is empty.
    pub fn active_object_mut(&mut self) -> Option<&mut Object> {
        self.objects.get_mut(self.active_object)
    }
}
