use crate::geometry::culling::face_normal;
use crate::material_system::{Material, MaterialTable, Texture};
use crate::scene::mesh::{Face, Mesh};
use log::{debug, info, warn};
use nalgebra::{Vector2, Vector3};
use std::path::Path;

/// Converts MTL materials into the table and returns their ids in file order.
fn register_materials(
    materials: Vec<tobj::Material>,
    base_path: &Path,
    table: &mut MaterialTable,
) -> Vec<usize> {
    materials
        .into_iter()
        .map(|mat| {
            let mut material = Material::new(mat.name.clone());
            if let Some(ka) = mat.ambient {
                material.ambient = Vector3::from(ka);
            }
            if let Some(kd) = mat.diffuse {
                material.diffuse = Vector3::from(kd);
            }
            if let Some(ks) = mat.specular {
                material.specular = Vector3::from(ks);
            }
            if let Some(ns) = mat.shininess {
                material.shininess = ns;
            }
            if let Some(tex_name) = mat.diffuse_texture.as_deref() {
                let texture_path = base_path.join(tex_name);
                match Texture::from_file(&texture_path) {
                    Ok(texture) => material.texture = texture,
                    Err(e) => warn!("Material '{}' stays untextured: {}", mat.name, e),
                }
            }
            table.add(material)
        })
        .collect()
}

/// Loads a triangulated OBJ (plus MTL) into a single mesh.
///
/// Material ids in the returned faces refer to `materials`. Missing normals are
/// replaced by per-face normals, missing UVs by one shared (0, 0), and UVs are
/// wrapped into [0, 1). Faces with bad indices are skipped.
pub fn load_obj<P: AsRef<Path>>(path: P, materials: &mut MaterialTable) -> Result<Mesh, String> {
    let obj_path = path.as_ref();
    if !obj_path.exists() {
        return Err(format!("OBJ file '{}' not found", obj_path.display()));
    }
    let base_path = obj_path.parent().unwrap_or_else(|| Path::new("."));

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
    };

    let (models, materials_result) = tobj::load_obj(obj_path, &load_options)
        .map_err(|e| format!("Failed to load OBJ '{}': {}", obj_path.display(), e))?;

    let material_ids = match materials_result {
        Ok(mats) => {
            if !mats.is_empty() {
                info!("Loaded {} materials from MTL", mats.len());
            }
            register_materials(mats, base_path, materials)
        }
        Err(e) => {
            warn!("No materials for '{}': {}", obj_path.display(), e);
            Vec::new()
        }
    };

    let mut mesh = Mesh::new();
    for model in &models {
        append_model(&mut mesh, &model.mesh, &material_ids, &model.name);
    }

    if mesh.faces.is_empty() {
        warn!("'{}' contains no usable faces", obj_path.display());
    }
    Ok(mesh)
}

fn append_model(mesh: &mut Mesh, source: &tobj::Mesh, material_ids: &[usize], name: &str) {
    let vertex_base = mesh.vertices.len();
    for p in source.positions.chunks_exact(3) {
        mesh.add_vertex(p[0], p[1], p[2]);
    }

    let normal_base = mesh.normals.len();
    for n in source.normals.chunks_exact(3) {
        mesh.add_normal(Vector3::new(n[0], n[1], n[2]));
    }

    let uv_base = mesh.uvs.len();
    for t in source.texcoords.chunks_exact(2) {
        mesh.add_uv(Vector2::new(t[0], t[1]), true);
    }

    let has_normals = !source.normal_indices.is_empty() && !source.normals.is_empty();
    let has_uvs = !source.texcoord_indices.is_empty() && !source.texcoords.is_empty();
    let shared_uv = if has_uvs {
        None
    } else {
        Some(mesh.add_uv(Vector2::zeros(), false))
    };

    let material = source.material_id.and_then(|local| {
        let id = material_ids.get(local).copied();
        if id.is_none() {
            warn!("Model '{}' references unknown material {}", name, local);
        }
        id
    });

    let mut skipped = 0usize;
    for (corner, tri) in source.indices.chunks_exact(3).enumerate() {
        let vertex = [
            vertex_base + tri[0] as usize,
            vertex_base + tri[1] as usize,
            vertex_base + tri[2] as usize,
        ];

        let normal = if has_normals {
            match corner_indices(&source.normal_indices, corner) {
                Some(idx) => idx.map(|i| normal_base + i),
                None => {
                    skipped += 1;
                    continue;
                }
            }
        } else {
            let flat = match (
                mesh.vertices.get(vertex[0]),
                mesh.vertices.get(vertex[1]),
                mesh.vertices.get(vertex[2]),
            ) {
                (Some(v0), Some(v1), Some(v2)) => face_normal(v0, v1, v2).unwrap_or_else(Vector3::z),
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            let idx = mesh.add_normal(flat);
            [idx; 3]
        };

        let uv = match shared_uv {
            Some(idx) => [idx; 3],
            None => match corner_indices(&source.texcoord_indices, corner) {
                Some(idx) => idx.map(|i| uv_base + i),
                None => {
                    skipped += 1;
                    continue;
                }
            },
        };

        if !mesh.add_face(Face::new(vertex, normal, uv, material)) {
            skipped += 1;
        }
    }

    if skipped > 0 {
        warn!("Model '{}': skipped {} invalid faces", name, skipped);
    }
    debug!(
        "Model '{}': {} positions, {} triangles",
        name,
        source.positions.len() / 3,
        source.indices.len() / 3
    );
}

fn corner_indices(indices: &[u32], triangle: usize) -> Option<[usize; 3]> {
    let start = triangle * 3;
    let tri = indices.get(start..start + 3)?;
    Some([tri[0] as usize, tri[1] as usize, tri[2] as usize])
}
