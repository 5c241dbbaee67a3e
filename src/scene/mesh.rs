use nalgebra::{Vector2, Vector3, Vector4};

/// Homogeneous position (x, y, z, w).
pub type Vertex = Vector4<f32>;
pub type Normal = Vector3<f32>;
pub type UvCoord = Vector2<f32>;

/// A triangle referencing mesh tables by index.
///
/// Position, normal and UV indices are independent, the way OBJ stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertex: [usize; 3],
    pub normal: [usize; 3],
    pub uv: [usize; 3],
    /// `None` when the face was read before any material was bound
    pub material: Option<usize>,
}

impl Face {
    pub fn new(vertex: [usize; 3], normal: [usize; 3], uv: [usize; 3], material: Option<usize>) -> Self {
        Face {
            vertex,
            normal,
            uv,
            material,
        }
    }
}

/// Object-space geometry. Pipeline stages copy these tables and never write back.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub normals: Vec<Normal>,
    pub uvs: Vec<UvCoord>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point with `w = 1` and returns its index.
    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> usize {
        self.vertices.push(Vector4::new(x, y, z, 1.0));
        self.vertices.len() - 1
    }

    pub fn add_normal(&mut self, normal: Normal) -> usize {
        self.normals.push(normal);
        self.normals.len() - 1
    }

    /// Appends a UV, optionally wrapped into [0, 1) by dropping the integer part.
    pub fn add_uv(&mut self, uv: UvCoord, wrap: bool) -> usize {
        let uv = if wrap { uv - uv.map(f32::floor) } else { uv };
        self.uvs.push(uv);
        self.uvs.len() - 1
    }

    /// Adds a face if all of its indices resolve; returns whether it was kept.
    pub fn add_face(&mut self, face: Face) -> bool {
        if !self.face_is_valid(&face) {
            log::warn!("Skipping face with out-of-range index: {:?}", face);
            return false;
        }
        self.faces.push(face);
        true
    }

    pub fn face_is_valid(&self, face: &Face) -> bool {
        face.vertex.iter().all(|&i| i < self.vertices.len())
            && face.normal.iter().all(|&i| i < self.normals.len())
            && face.uv.iter().all(|&i| i < self.uvs.len())
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
