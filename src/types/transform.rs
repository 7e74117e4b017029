//! Model transform and the scale/rotate/translate pipeline.

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// A model-level transform.
///
/// Applied to every vertex as scale, then rotate, then translate, so scale
/// and rotation both act about the model's local origin before the offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Offset added last.
    pub translate: [f32; 3],
    /// Euler angles in degrees, applied about X, then Y, then Z.
    pub rotate: [f32; 3],
    /// Per-axis scale factors.
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: [0.0, 0.0, 0.0],
        rotate: [0.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
    };

    pub fn new(translate: [f32; 3], rotate: [f32; 3], scale: [f32; 3]) -> Self {
        Self {
            translate,
            rotate,
            scale,
        }
    }

    /// Check if applying this transform leaves every vertex unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Combined rotation matrix: X first, then Y, then Z (right-handed).
    pub fn rotation_matrix(&self) -> Mat3 {
        let [rx, ry, rz] = self.rotate;
        Mat3::from_rotation_z(rz.to_radians())
            * Mat3::from_rotation_y(ry.to_radians())
            * Mat3::from_rotation_x(rx.to_radians())
    }

    /// Transform a single vertex.
    pub fn apply(&self, vertex: Vec3) -> Vec3 {
        self.apply_with(&self.rotation_matrix(), vertex)
    }

    /// Transform vertices in place, computing the rotation once.
    pub fn apply_all<'v>(&self, vertices: impl IntoIterator<Item = &'v mut Vec3>) {
        let rotation = self.rotation_matrix();
        for vertex in vertices {
            *vertex = self.apply_with(&rotation, *vertex);
        }
    }

    fn apply_with(&self, rotation: &Mat3, vertex: Vec3) -> Vec3 {
        let scaled = vertex * Vec3::from(self.scale);
        let rotated = *rotation * scaled;
        rotated + Vec3::from(self.translate)
    }
}
