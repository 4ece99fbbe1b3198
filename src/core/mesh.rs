// glTF → CPU mesh extraction.
//
// Node transforms of the default scene are baked into the vertices so the
// renderer only has to apply the model transform. Buffers are resolved by
// the caller (fetched, embedded GLB blob, or `data:` URI).

use super::framing::Aabb;
use super::model::ModelTransform;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use glam::{Mat3, Mat4, Vec3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("glTF parse error: {0}")]
    Parse(#[from] gltf::Error),
    #[error("buffer {0} is missing")]
    MissingBuffer(usize),
    #[error("malformed data URI")]
    DataUri,
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("no triangle geometry found")]
    NoGeometry,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct CpuPrimitive {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct CpuModel {
    pub primitives: Vec<CpuPrimitive>,
}

impl CpuModel {
    /// Build from a parsed document and its resolved buffers (indexed like
    /// `document.buffers()`).
    pub fn from_gltf(document: &gltf::Document, buffers: &[Vec<u8>]) -> Result<Self, MeshError> {
        for b in document.buffers() {
            if buffers.get(b.index()).is_none() {
                return Err(MeshError::MissingBuffer(b.index()));
            }
        }
        let mut model = CpuModel::default();
        match document.default_scene().or_else(|| document.scenes().next()) {
            Some(scene) => {
                for node in scene.nodes() {
                    gather_node(&mut model, &node, Mat4::IDENTITY, buffers);
                }
            }
            None => {
                for mesh in document.meshes() {
                    push_mesh(&mut model, &mesh, Mat4::IDENTITY, buffers);
                }
            }
        }
        if model.primitives.is_empty() {
            return Err(MeshError::NoGeometry);
        }
        Ok(model)
    }

    /// Parse `.gltf` JSON or `.glb` bytes. Returns the document plus the
    /// embedded GLB blob, if any.
    pub fn parse(bytes: &[u8]) -> Result<(gltf::Document, Option<Vec<u8>>), MeshError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        Ok((document, blob))
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.vertices.len()).sum()
    }

    /// World-space bounds of every vertex under `transform`.
    pub fn bounds(&self, transform: &ModelTransform) -> Aabb {
        let m = transform.matrix();
        Aabb::from_points(self.primitives.iter().flat_map(|p| {
            p.vertices
                .iter()
                .map(move |v| m.transform_point3(Vec3::from_array(v.position)))
        }))
    }
}

fn gather_node(model: &mut CpuModel, node: &gltf::Node<'_>, parent: Mat4, buffers: &[Vec<u8>]) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;
    if let Some(mesh) = node.mesh() {
        push_mesh(model, &mesh, world, buffers);
    }
    for child in node.children() {
        gather_node(model, &child, world, buffers);
    }
}

fn push_mesh(model: &mut CpuModel, mesh: &gltf::Mesh<'_>, world: Mat4, buffers: &[Vec<u8>]) {
    let normal_m = Mat3::from_mat4(world).inverse().transpose();
    for prim in mesh.primitives() {
        if prim.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "[mesh] skipping primitive {} of mesh {:?}: mode {:?}",
                prim.index(),
                mesh.name(),
                prim.mode()
            );
            continue;
        }
        let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.as_slice()));
        let positions: Vec<Vec3> = match reader.read_positions() {
            Some(it) => it.map(|p| world.transform_point3(Vec3::from_array(p))).collect(),
            None => continue,
        };
        let indices: Vec<u32> = match reader.read_indices() {
            Some(ix) => ix.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(it) => it
                .map(|n| (normal_m * Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => smooth_normals(&positions, &indices),
        };
        let vertices = positions
            .iter()
            .zip(normals.iter().chain(std::iter::repeat(&Vec3::Y)))
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();
        model.primitives.push(CpuPrimitive {
            vertices,
            indices,
            base_color: prim.material().pbr_metallic_roughness().base_color_factor(),
        });
    }
}

/// Area-weighted vertex normals for meshes exported without them.
pub fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}

/// Decode a base64 `data:` URI. Returns `None` when `uri` is not one.
pub fn decode_data_uri(uri: &str) -> Option<Result<Vec<u8>, MeshError>> {
    let rest = uri.strip_prefix("data:")?;
    let Some((meta, payload)) = rest.split_once(',') else {
        return Some(Err(MeshError::DataUri));
    };
    if !meta.ends_with(";base64") {
        return Some(Err(MeshError::DataUri));
    }
    Some(BASE64.decode(payload.as_bytes()).map_err(MeshError::from))
}

/// Resolve a buffer URI relative to the URL of the glTF file itself.
pub fn resolve_relative(asset_url: &str, uri: &str) -> String {
    if uri.starts_with('/') || uri.contains("://") {
        return uri.to_string();
    }
    match asset_url.rfind('/') {
        Some(i) => format!("{}{}", &asset_url[..=i], uri),
        None => uri.to_string(),
    }
}
