//! Bounding volumes for ray queries

use crate::foundation::math::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new box from min and max points
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, `None` for no points
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Self::new(point, point),
                Some(Self { min, max }) => Self::new(min.inf(&point), max.sup(&point)),
            })
        })
    }

    /// Get the center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Slab test: distance to the entry point, or 0 when the origin is inside
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let mut near = f32::NEG_INFINITY;
        let mut far = f32::INFINITY;
        for axis in 0..3 {
            let inv = if direction[axis] == 0.0 {
                f32::INFINITY
            } else {
                1.0 / direction[axis]
            };
            let t1 = (self.min[axis] - origin[axis]) * inv;
            let t2 = (self.max[axis] - origin[axis]) * inv;
            // 0 × inf is NaN when the origin sits on a slab of a parallel ray
            let (t1, t2) = (
                if t1.is_nan() { f32::NEG_INFINITY } else { t1 },
                if t2.is_nan() { f32::INFINITY } else { t2 },
            );
            near = near.max(t1.min(t2));
            far = far.min(t1.max(t2));
        }

        (far >= near && far >= 0.0).then(|| near.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_from_points() {
        let bounds = Aabb::from_points([Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 3.0, 0.5)]).unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 0.5));
        assert_eq!(bounds.center(), Vec3::new(0.0, 0.5, 0.25));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_contains_point() {
        let bounds = unit_box();
        assert!(bounds.contains_point(Vec3::zeros()));
        assert!(bounds.contains_point(Vec3::new(1.0, 1.0, 1.0)));
        assert!(!bounds.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_ray_hits_and_misses() {
        let bounds = unit_box();
        assert_eq!(bounds.intersect_ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)), Some(4.0));
        assert_eq!(bounds.intersect_ray(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0)), Some(0.0));
        assert_eq!(bounds.intersect_ray(Vec3::new(-5.0, 3.0, 0.0), Vec3::new(1.0, 0.0, 0.0)), None);
        assert_eq!(bounds.intersect_ray(Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_flat_box_is_hit_edge_on() {
        // A wall quad has zero thickness along its normal
        let wall = Aabb::new(Vec3::new(-1.0, -1.0, 1.0), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(wall.intersect_ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0)), Some(1.0));
        assert!(wall.intersect_ray(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)).is_some());
    }
}
