//! Cuboid element to quad geometry.

use super::Face;
use crate::definition::{Element, FaceSpec};
use crate::error::{RasterError, Result};
use crate::texture::{resolve_reference, TextureCache};
use crate::types::Direction;
use glam::Vec3;
use std::collections::BTreeMap;

/// Corner indices for each face key, into the array from [`corners`].
///
/// Corners 0-3 lie on the `from.z` plane and 4-7 on the `to.z` plane, so
/// "up" and "down" are the two z-planes that face the default camera.
pub fn face_corner_indices(direction: Direction) -> [usize; 4] {
    match direction {
        Direction::North => [0, 1, 5, 4],
        Direction::South => [3, 2, 6, 7],
        Direction::East => [1, 2, 6, 5],
        Direction::West => [0, 3, 7, 4],
        Direction::Up => [0, 1, 2, 3],
        Direction::Down => [4, 5, 6, 7],
    }
}

/// The 8 corners of an element's box.
pub fn corners(element: &Element) -> [Vec3; 8] {
    let f = element.from;
    let t = element.to;
    [
        Vec3::new(f[0], f[1], f[2]),
        Vec3::new(t[0], f[1], f[2]),
        Vec3::new(t[0], t[1], f[2]),
        Vec3::new(f[0], t[1], f[2]),
        Vec3::new(f[0], f[1], t[2]),
        Vec3::new(t[0], f[1], t[2]),
        Vec3::new(t[0], t[1], t[2]),
        Vec3::new(f[0], t[1], t[2]),
    ]
}

/// Quad vertices for each face the element declares, in face-key order.
/// Faces the element does not declare produce nothing.
pub fn build_quads(element: &Element) -> BTreeMap<Direction, [Vec3; 4]> {
    let corners = corners(element);
    element
        .faces
        .keys()
        .map(|&direction| {
            let quad = face_corner_indices(direction).map(|i| corners[i]);
            (direction, quad)
        })
        .collect()
}

/// Turn a face spec into a renderable face. The texture must already be in
/// the cache.
pub fn resolve_face(
    direction: Direction,
    vertices: [Vec3; 4],
    spec: &FaceSpec,
    textures: &BTreeMap<String, String>,
    cache: &TextureCache,
) -> Result<Face> {
    let path = resolve_reference(&spec.texture, textures)?;
    let texture = cache.id(&path).ok_or_else(|| RasterError::TextureLoad {
        path: path.clone(),
        reason: "texture was not loaded before face resolution".to_string(),
    })?;

    Ok(Face {
        direction,
        vertices,
        texture,
        uv: spec.uv_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::RasterImage;

    fn cube() -> Element {
        Element::new([0.0, 0.0, 0.0], [16.0, 16.0, 16.0])
    }

    #[test]
    fn test_only_declared_faces_emitted() {
        let element = cube()
            .with_face(Direction::Up, FaceSpec::new("#top"))
            .with_face(Direction::North, FaceSpec::new("#side"));

        let quads = build_quads(&element);
        assert_eq!(quads.len(), 2);
        assert_eq!(
            quads.keys().copied().collect::<Vec<_>>(),
            vec![Direction::North, Direction::Up]
        );
    }

    #[test]
    fn test_up_face_corners() {
        let element = Element::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0])
            .with_face(Direction::Up, FaceSpec::new("#t"));
        let quads = build_quads(&element);
        assert_eq!(
            quads[&Direction::Up],
            [
                Vec3::new(1.0, 2.0, 3.0),
                Vec3::new(4.0, 2.0, 3.0),
                Vec3::new(4.0, 5.0, 3.0),
                Vec3::new(1.0, 5.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_every_face_is_planar_and_distinct() {
        let mut element = cube();
        for dir in Direction::ALL {
            element = element.with_face(dir, FaceSpec::new("#t"));
        }
        let quads = build_quads(&element);
        assert_eq!(quads.len(), 6);

        for quad in quads.values() {
            let normal = (quad[1] - quad[0]).cross(quad[2] - quad[0]);
            assert!(normal.length() > 0.0);
            for v in quad {
                assert!((*v - quad[0]).dot(normal).abs() < 1e-3);
            }
            // Each quad lies on a single axis-aligned plane.
            let constant_axes = (0..3)
                .filter(|&axis| quad.iter().all(|v| v[axis] == quad[0][axis]))
                .count();
            assert_eq!(constant_axes, 1);
        }
    }

    #[test]
    fn test_resolve_face_default_uv() {
        let mut cache = TextureCache::new();
        let id = cache.insert("block/stone", RasterImage::filled(16, 16, [0, 0, 0, 255]));
        let textures: BTreeMap<String, String> =
            [("all".to_string(), "block/stone".to_string())].into_iter().collect();

        let spec = FaceSpec::new("#all");
        let face = resolve_face(Direction::Up, [Vec3::ZERO; 4], &spec, &textures, &cache).unwrap();
        assert_eq!(face.texture, id);
        assert_eq!(face.uv, [0.0, 0.0, 16.0, 16.0]);

        let spec = FaceSpec::new("#all").with_uv([4.0, 4.0, 8.0, 8.0]);
        let face = resolve_face(Direction::Up, [Vec3::ZERO; 4], &spec, &textures, &cache).unwrap();
        assert_eq!(face.uv, [4.0, 4.0, 8.0, 8.0]);
    }

    #[test]
    fn test_resolve_face_requires_loaded_texture() {
        let cache = TextureCache::new();
        let textures = BTreeMap::new();
        let spec = FaceSpec::new("block/unloaded");
        assert!(matches!(
            resolve_face(Direction::Up, [Vec3::ZERO; 4], &spec, &textures, &cache),
            Err(RasterError::TextureLoad { .. })
        ));
    }
}
