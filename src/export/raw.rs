//! Raw geometry export for custom rendering.

use crate::mesher::Model;
use crate::texture::{TextureCache, TextureId};
use std::collections::HashMap;

/// One texture image referenced by the exported faces.
#[derive(Debug, Clone)]
pub struct RawTexture {
    /// Resolved texture path.
    pub path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 pixel data.
    pub rgba: Vec<u8>,
    /// Whether any pixel is not fully opaque (needs blending).
    pub transparent: bool,
}

/// Raw model data for custom use.
///
/// Every face contributes four vertices and two triangles (0-1-2, 0-2-3).
#[derive(Debug, Clone)]
pub struct RawModelData {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Texture coordinates (0-1 range).
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices (3 per triangle).
    pub indices: Vec<u32>,
    /// Index into `textures` for each face.
    pub face_textures: Vec<usize>,
    /// Textures used by the faces, in first-use order.
    pub textures: Vec<RawTexture>,
}

/// Export a built model and the textures it uses.
pub fn export_raw(model: &Model, cache: &TextureCache) -> RawModelData {
    let mut positions = Vec::with_capacity(model.faces.len() * 4);
    let mut uvs = Vec::with_capacity(model.faces.len() * 4);
    let mut indices = Vec::with_capacity(model.faces.len() * 6);
    let mut face_textures = Vec::with_capacity(model.faces.len());

    // Slots are assigned in first-use order.
    let mut used: Vec<TextureId> = Vec::new();
    let mut slots: HashMap<TextureId, usize> = HashMap::new();

    for face in &model.faces {
        let base = positions.len() as u32;
        let [u0, v0, u1, v1] = face.normalized_uv();

        positions.extend(face.vertices.iter().map(|v| v.to_array()));
        uvs.extend([[u0, v0], [u1, v0], [u1, v1], [u0, v1]]);
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);

        let slot = *slots.entry(face.texture).or_insert_with(|| {
            used.push(face.texture);
            used.len() - 1
        });
        face_textures.push(slot);
    }

    let textures = used
        .iter()
        .map(|&id| {
            let image = cache.get(id);
            RawTexture {
                path: cache.path(id).to_string(),
                width: image.width,
                height: image.height,
                rgba: image.pixels.clone(),
                transparent: image.has_transparency(),
            }
        })
        .collect();

    RawModelData {
        positions,
        uvs,
        indices,
        face_textures,
        textures,
    }
}

impl RawModelData {
    /// Get positions as a flat array.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.iter().copied()).collect()
    }

    /// Get UVs as a flat array.
    pub fn uvs_flat(&self) -> Vec<f32> {
        self.uvs.iter().flat_map(|uv| uv.iter().copied()).collect()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
