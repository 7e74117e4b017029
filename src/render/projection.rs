//! 3D to 2D projection.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Focal scale used by the perspective projection.
pub const PERSPECTIVE_FOV: f32 = 500.0;

/// Horizontal offset applied by the orthographic projection.
pub const ORTHOGRAPHIC_X_OFFSET: f32 = 1.0;

/// Projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Drop z and shift x by a fixed offset.
    #[default]
    Orthographic,
    /// Divide by distance from a camera on the z axis.
    Perspective,
}

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "orthographic" | "ortho" => Ok(Projection::Orthographic),
            "perspective" => Ok(Projection::Perspective),
            _ => Err(format!("Unknown projection: '{}'", s)),
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Projection::Orthographic => write!(f, "orthographic"),
            Projection::Perspective => write!(f, "perspective"),
        }
    }
}

/// Project one vertex to screen space.
pub fn project(vertex: Vec3, mode: Projection, camera_z: f32) -> Vec2 {
    match mode {
        Projection::Orthographic => Vec2::new(vertex.x + ORTHOGRAPHIC_X_OFFSET, vertex.y),
        Projection::Perspective => {
            let depth = vertex.z + camera_z;
            // A vertex level with the camera would divide by zero; pass it through.
            if depth == 0.0 {
                return Vec2::new(vertex.x, vertex.y);
            }
            Vec2::new(
                vertex.x * PERSPECTIVE_FOV / depth,
                vertex.y * PERSPECTIVE_FOV / depth,
            )
        }
    }
}

/// Project a quad, preserving vertex order.
pub fn project_quad(vertices: &[Vec3; 4], mode: Projection, camera_z: f32) -> [Vec2; 4] {
    vertices.map(|v| project(v, mode, camera_z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthographic() {
        assert_eq!(
            project(Vec3::new(3.0, 4.0, 5.0), Projection::Orthographic, 500.0),
            Vec2::new(4.0, 4.0)
        );
    }

    #[test]
    fn test_perspective_origin() {
        assert_eq!(
            project(Vec3::ZERO, Projection::Perspective, 500.0),
            Vec2::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_perspective_divides_by_depth() {
        let p = project(Vec3::new(10.0, -20.0, 500.0), Projection::Perspective, 500.0);
        assert_eq!(p, Vec2::new(5.0, -10.0));
    }

    #[test]
    fn test_perspective_zero_depth_fallback() {
        let p = project(Vec3::new(7.0, 8.0, -500.0), Projection::Perspective, 500.0);
        assert_eq!(p, Vec2::new(7.0, 8.0));
    }

    #[test]
    fn test_project_quad_preserves_order() {
        let quad = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let projected = project_quad(&quad, Projection::Orthographic, 0.0);
        assert_eq!(
            projected,
            [
                Vec2::new(1.0, 0.0),
                Vec2::new(2.0, 0.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_projection_from_str() {
        assert_eq!("perspective".parse::<Projection>(), Ok(Projection::Perspective));
        assert_eq!("Orthographic".parse::<Projection>(), Ok(Projection::Orthographic));
        assert!("fisheye".parse::<Projection>().is_err());
        assert_eq!(Projection::default(), Projection::Orthographic);
    }
}
