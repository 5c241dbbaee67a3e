use crate::material_system::texture::Texture;
use nalgebra::Vector3;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Phong coefficients plus an optional diffuse texture.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub ambient: Vector3<f32>,  // Ka
    pub diffuse: Vector3<f32>,  // Kd
    pub specular: Vector3<f32>, // Ks
    pub shininess: f32,         // Ns
    pub texture: Texture,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            name: "Default".to_string(),
            ambient: Vector3::new(0.2, 0.2, 0.2),
            diffuse: Vector3::new(0.8, 0.8, 0.8),
            specular: Vector3::zeros(),
            shininess: 0.0,
            texture: Texture::default(),
        }
    }
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Material {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_texture(&self) -> bool {
        !self.texture.is_empty()
    }

    /// Shared fallback for faces with no material or an unknown id.
    pub fn fallback() -> &'static Material {
        static FALLBACK: OnceLock<Material> = OnceLock::new();
        FALLBACK.get_or_init(Material::default)
    }
}

/// Materials indexed by id, plus a name lookup.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
    ids: HashMap<String, usize>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `material` and returns its id. Re-adding a name rebinds it to the new entry.
    pub fn add(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        self.ids.insert(material.name.clone(), id);
        self.materials.push(material);
        id
    }

    pub fn get(&self, id: usize) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Material for a face, falling back to the default one.
    pub fn resolve(&self, id: Option<usize>) -> &Material {
        id.and_then(|id| self.get(id))
            .unwrap_or_else(|| Material::fallback())
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
