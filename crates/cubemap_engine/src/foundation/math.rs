//! Math utilities and types
//!
//! Provides the vector and transform types shared by geometry, reflection
//! sampling and the preview renderer.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Transform representing position and per-axis scale
///
/// Applied to a point as scale, then translation. Visuals in the cubemap scene
/// are only ever scaled and translated.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from a translation vector
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a uniform scaling transform
    pub fn from_uniform_scale(factor: f32) -> Self {
        Self {
            scale: Vec3::new(factor, factor, factor),
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        let matrix = self.to_matrix();
        matrix.transform_point(&point)
    }

    /// Combine this transform with another
    ///
    /// The result applies `other` first and `self` second.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.scale.component_mul(&other.position),
            scale: self.scale.component_mul(&other.scale),
        }
    }

    /// Append a uniform scale after the current transform
    ///
    /// Mirrors the chained `visual.scale(f).translate(v)` style: a scale applied
    /// after a translation also scales that translation.
    pub fn then_scale(&self, factor: f32) -> Self {
        Self::from_uniform_scale(factor).combine(self)
    }

    /// Append a translation after the current transform
    pub fn then_translate(&self, offset: Vec3) -> Self {
        Self::from_translation(offset).combine(self)
    }
}

/// Reflect `incident` about the plane with unit normal `normal`
///
/// Same contract as GLSL `reflect`: `normal` must already be normalized.
pub fn reflect(incident: &Vec3, normal: &Vec3) -> Vec3 {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Map a coordinate in `[-scale, scale]` onto `[0, 1]`
pub fn remap_axis(coord: f32, scale: f32) -> f32 {
    0.5 * coord / scale + 0.5
}

/// Inverse of [`remap_axis`]: map `[0, 1]` back onto `[-scale, scale]`
pub fn unmap_axis(unit: f32, scale: f32) -> f32 {
    (unit - 0.5) * 2.0 * scale
}

/// Angle helpers
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }
}
