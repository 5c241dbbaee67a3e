use crate::scene::mesh::{Face, Vertex};
use nalgebra::Vector3;
use rayon::prelude::*;

/// A face survives culling only if its normal points against the view
/// direction by more than this margin.
const BACKFACE_EPSILON: f32 = 0.001;

fn dehomogenize(v: &Vertex) -> Vector3<f32> {
    if v.w != 0.0 && v.w != 1.0 {
        v.xyz() / v.w
    } else {
        v.xyz()
    }
}

fn vertices_of<'a>(face: &Face, vertices: &'a [Vertex]) -> Option<[&'a Vertex; 3]> {
    Some([
        vertices.get(face.vertex[0])?,
        vertices.get(face.vertex[1])?,
        vertices.get(face.vertex[2])?,
    ])
}

/// Geometric normal of a face, `None` for zero-area faces.
pub fn face_normal(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Option<Vector3<f32>> {
    let p0 = dehomogenize(v0);
    let e1 = dehomogenize(v1) - p0;
    let e2 = dehomogenize(v2) - p0;
    e1.cross(&e2).try_normalize(1e-12)
}

/// Removes faces pointing away from the viewer.
///
/// Every face is tested against one global `view_direction` (target minus eye),
/// not the per-face eye vector. Faces with out-of-range indices or zero area
/// are dropped. Input order is preserved.
pub fn cull_backfaces(faces: &[Face], world_vertices: &[Vertex], view_direction: &Vector3<f32>) -> Vec<Face> {
    faces
        .par_iter()
        .fold(Vec::new, |mut kept, face| {
            let Some([v0, v1, v2]) = vertices_of(face, world_vertices) else {
                log::warn!("Culling skipped face with invalid vertex index: {:?}", face.vertex);
                return kept;
            };
            if let Some(normal) = face_normal(v0, v1, v2) {
                if normal.dot(view_direction) < -BACKFACE_EPSILON {
                    kept.push(*face);
                }
            }
            kept
        })
        .reduce(Vec::new, |mut a, mut b| {
            a.append(&mut b);
            a
        })
}

/// True when the clip-space vertex lies inside the canonical view volume.
///
/// A vertex with `w == 0` (or any non-finite component after the divide) is outside.
#[inline]
pub fn is_inside_view_volume(clip: &Vertex) -> bool {
    if clip.w == 0.0 {
        return false;
    }
    let ndc = clip.xyz() / clip.w;
    ndc.iter().all(|c| c.is_finite() && (-1.0..=1.0).contains(c))
}

/// Rejects every face that has at least one vertex outside the view volume.
/// Faces are never split.
pub fn clip_faces(faces: &[Face], clip_vertices: &[Vertex]) -> Vec<Face> {
    faces
        .par_iter()
        .fold(Vec::new, |mut kept, face| {
            let inside = vertices_of(face, clip_vertices)
                .is_some_and(|vs| vs.iter().all(|v| is_inside_view_volume(v)));
            if inside {
                kept.push(*face);
            }
            kept
        })
        .reduce(Vec::new, |mut a, mut b| {
            a.append(&mut b);
            a
        })
}
