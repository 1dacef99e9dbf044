//! Binary glTF decoding into [`MeshData`].

use crate::error::AssetError;
use crate::mesh::{MeshData, Vertex};
use glam::{Mat3, Mat4, Vec3};

fn decode_err(path: &str, reason: impl ToString) -> AssetError {
    AssetError::Decode {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Decode a `.glb` (or self-contained `.gltf`) into one merged mesh.
///
/// All triangle primitives reachable from the default scene are flattened with
/// their node transforms. PBR factors are baked into vertex attributes;
/// textures are ignored.
pub fn decode_glb(path: &str, bytes: &[u8]) -> Result<MeshData, AssetError> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| decode_err(path, e))?;
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| decode_err(path, "no scene"))?;

    let mut mesh = MeshData::default();
    for node in scene.nodes() {
        visit(&node, Mat4::IDENTITY, &buffers, &mut mesh);
    }
    if mesh.is_empty() {
        return Err(decode_err(path, "no triangle primitives"));
    }
    Ok(mesh)
}

fn visit(node: &gltf::Node<'_>, parent: Mat4, buffers: &[gltf::buffer::Data], out: &mut MeshData) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(m) = node.mesh() {
        for primitive in m.primitives() {
            if primitive.mode() == gltf::mesh::Mode::Triangles {
                append_primitive(&primitive, world, buffers, out);
            }
        }
    }
    for child in node.children() {
        visit(&child, world, buffers, out);
    }
}

fn append_primitive(
    primitive: &gltf::Primitive<'_>,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) {
    let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
    let Some(positions) = reader.read_positions() else {
        return;
    };
    let positions: Vec<Vec3> = positions.map(Vec3::from_array).collect();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(i) => i.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    if indices.iter().any(|&i| i as usize >= positions.len()) {
        log::warn!("[asset] skipping primitive with out-of-range indices");
        return;
    }
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(n) => n.map(Vec3::from_array).collect(),
        None => face_normals(&positions, &indices),
    };

    let material = primitive.material();
    let pbr = material.pbr_metallic_roughness();
    let color = pbr.base_color_factor();
    let emissive = material.emissive_factor();
    let glow = if emissive.iter().any(|c| *c > 0.0) { 1.0 } else { 0.0 };
    let metal_rough = [pbr.metallic_factor(), pbr.roughness_factor()];

    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    let base = out.vertices.len() as u32;
    out.vertices
        .extend(positions.iter().zip(&normals).map(|(p, n)| Vertex {
            position: world.transform_point3(*p).to_array(),
            normal: (normal_matrix * *n).normalize_or_zero().to_array(),
            color,
            emissive: [emissive[0], emissive[1], emissive[2], glow],
            material: metal_rough,
        }));
    out.indices.extend(indices.iter().map(|i| base + i));
}

fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        for i in [a, b, c] {
            normals[i] += n;
        }
    }
    normals.iter().map(|n| n.normalize_or_zero()).collect()
}
