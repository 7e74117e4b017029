//! Face generation from resolved definitions.
//!
//! This module converts a merged definition into textured quads and
//! applies the model transform to them.

pub mod geometry;

pub use geometry::{build_quads, corners, face_corner_indices, resolve_face};

use crate::definition::Definition;
use crate::error::Result;
use crate::texture::{resolve_reference, TextureCache, TextureId, TextureSource};
use crate::types::{BoundingBox, Direction, Transform};
use glam::Vec3;
use std::collections::BTreeSet;

/// A resolved, textured quad.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Which side of its element this face is.
    pub direction: Direction,
    /// Corner positions in winding order; always coplanar.
    pub vertices: [Vec3; 4],
    /// Texture in the owning cache.
    pub texture: TextureId,
    /// UV rectangle [u0, v0, u1, v1] in 0-16 tile units.
    pub uv: [f32; 4],
}

impl Face {
    /// Get normalized UV coordinates (0-1 range).
    pub fn normalized_uv(&self) -> [f32; 4] {
        self.uv.map(|c| c / 16.0)
    }
}

/// A model ready for projection: its definition and faces.
#[derive(Debug, Clone)]
pub struct Model {
    /// The fully merged definition the faces came from.
    pub definition: Definition,
    /// Faces in paint order (element order, then face-key order).
    pub faces: Vec<Face>,
}

impl Model {
    /// The transform declared by the definition.
    pub fn transform(&self) -> Transform {
        self.definition.effective_transform()
    }

    /// Apply the model transform to every face vertex in place.
    pub fn apply_transform(&mut self) {
        let transform = self.transform();
        apply_transform(&mut self.faces, &transform);
    }

    /// Bounding box of all face vertices.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(
            self.faces
                .iter()
                .flat_map(|f| f.vertices.iter().map(|v| v.to_array())),
        )
    }
}

/// Distinct literal texture paths referenced by the definition's faces.
pub fn texture_paths(definition: &Definition) -> Result<BTreeSet<String>> {
    let mut paths = BTreeSet::new();
    for element in &definition.elements {
        for face in element.faces.values() {
            paths.insert(resolve_reference(&face.texture, &definition.textures)?);
        }
    }
    Ok(paths)
}

/// Load every texture the definition needs, then build its faces.
///
/// Texture loads run as one joined batch; faces are only resolved once
/// the whole batch has landed in the cache.
pub fn build_faces(
    definition: &Definition,
    cache: &mut TextureCache,
    source: &dyn TextureSource,
) -> Result<Vec<Face>> {
    let paths = texture_paths(definition)?;
    cache.load_batch(paths.iter().map(String::as_str), source)?;

    let mut faces = Vec::with_capacity(definition.face_count());
    for element in &definition.elements {
        for (direction, vertices) in build_quads(element) {
            let spec = &element.faces[&direction];
            faces.push(resolve_face(
                direction,
                vertices,
                spec,
                &definition.textures,
                cache,
            )?);
        }
    }

    log::debug!(
        "Built {} faces from {} elements",
        faces.len(),
        definition.elements.len()
    );

    Ok(faces)
}

/// Transform every vertex of every face in place.
pub fn apply_transform(faces: &mut [Face], transform: &Transform) {
    if transform.is_identity() {
        return;
    }
    transform.apply_all(faces.iter_mut().flat_map(|f| f.vertices.iter_mut()));
}
