//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::Direction;
pub use transform::Transform;

/// Strip a namespace prefix from a resource identifier.
/// "minecraft:block/stone" -> "block/stone"
/// "block/stone" -> "block/stone"
pub fn strip_namespace(resource_location: &str) -> &str {
    match resource_location.split_once(':') {
        Some((_, path)) => path,
        None => resource_location,
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn from_points(points: impl Iterator<Item = [f32; 3]>) -> Option<Self> {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        let mut has_points = false;

        for p in points {
            has_points = true;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn dimensions(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("minecraft:block/stone"), "block/stone");
        assert_eq!(strip_namespace("mymod:item/custom"), "item/custom");
        assert_eq!(strip_namespace("block/stone"), "block/stone");
    }

    #[test]
    fn test_bounding_box_from_points() {
        let bounds = BoundingBox::from_points(
            [[0.0, 2.0, -1.0], [4.0, -3.0, 1.0]].into_iter(),
        )
        .unwrap();
        assert_eq!(bounds.min, [0.0, -3.0, -1.0]);
        assert_eq!(bounds.max, [4.0, 2.0, 1.0]);
        assert_eq!(bounds.dimensions(), [4.0, 5.0, 2.0]);

        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }
}
