use crate::geometry::camera::Camera;
use crate::geometry::culling::{clip_faces, cull_backfaces};
use crate::geometry::transform::{
    clip_to_screen, compute_normal_matrix, transform_normals, transform_vertices,
};
use crate::scene::mesh::{Face, Normal, UvCoord, Vertex};
use crate::scene::scene_object::Object;
use log::{debug, warn};
use nalgebra::Vector3;
use rayon::prelude::*;

/// A visible triangle ready for scan conversion.
#[derive(Debug, Clone)]
pub struct ScreenTriangle {
    /// (pixel x, pixel y, depth, clip w)
    pub screen: [Vertex; 3],
    /// Camera-space normals
    pub normals: [Normal; 3],
    /// World-space positions, used for the light direction
    pub world: [Vector3<f32>; 3],
    pub uvs: [UvCoord; 3],
    pub material: Option<usize>,
}

/// Runs the per-object vertex stages: world, cull, camera, project, clip, screen.
pub struct GeometryProcessor;

impl GeometryProcessor {
    pub fn process_object(
        object: &Object,
        camera: &Camera,
        frame_width: u32,
        frame_height: u32,
    ) -> Vec<ScreenTriangle> {
        let mesh = &object.mesh;

        // World space
        let Some(model_normal_matrix) = object.transform.normal_matrix() else {
            warn!("Skipping '{}': transform is not invertible", object.name);
            return Vec::new();
        };
        let world_vertices = transform_vertices(&mesh.vertices, object.transform.matrix());
        let world_normals = transform_normals(&mesh.normals, &model_normal_matrix);

        let faces = cull_backfaces(&mesh.faces, &world_vertices, &camera.view_direction());

        // Camera space
        let view_matrix = camera.view_matrix();
        let Some(view_normal_matrix) = compute_normal_matrix(view_matrix) else {
            warn!("Skipping '{}': view matrix is not invertible", object.name);
            return Vec::new();
        };
        let camera_vertices = transform_vertices(&world_vertices, view_matrix);
        let camera_normals = transform_normals(&world_normals, &view_normal_matrix);

        // Clip space
        let clip_vertices = transform_vertices(&camera_vertices, camera.projection_matrix());
        let visible = clip_faces(&faces, &clip_vertices);

        let screen_vertices = clip_to_screen(&clip_vertices, frame_width as f32, frame_height as f32);

        let triangles: Vec<ScreenTriangle> = visible
            .par_iter()
            .filter_map(|face| {
                let triangle = Self::assemble(
                    face,
                    &screen_vertices,
                    &world_vertices,
                    &camera_normals,
                    &mesh.uvs,
                );
                if triangle.is_none() {
                    warn!("Skipping face with out-of-range attribute index: {:?}", face);
                }
                triangle
            })
            .collect();

        debug!(
            "'{}': {} faces, {} after culling, {} after clipping",
            object.name,
            mesh.faces.len(),
            faces.len(),
            triangles.len()
        );
        triangles
    }

    fn assemble(
        face: &Face,
        screen: &[Vertex],
        world: &[Vertex],
        normals: &[Normal],
        uvs: &[UvCoord],
    ) -> Option<ScreenTriangle> {
        let pick = |i: usize| -> Option<(Vertex, Vector3<f32>, Normal, UvCoord)> {
            let position = world.get(face.vertex[i])?;
            let position = if position.w != 0.0 && position.w != 1.0 {
                position.xyz() / position.w
            } else {
                position.xyz()
            };
            Some((
                *screen.get(face.vertex[i])?,
                position,
                *normals.get(face.normal[i])?,
                *uvs.get(face.uv[i])?,
            ))
        };
        let (s0, w0, n0, t0) = pick(0)?;
        let (s1, w1, n1, t1) = pick(1)?;
        let (s2, w2, n2, t2) = pick(2)?;
        Some(ScreenTriangle {
            screen: [s0, s1, s2],
            normals: [n0, n1, n2],
            world: [w0, w1, w2],
            uvs: [t0, t1, t2],
            material: face.material,
        })
    }
}
