//! Face extraction: slicing a flat cube buffer into six independent quads

use super::cube::{
    CubeFace, FACE_COUNT, FLOATS_PER_FACE, INDICES_PER_FACE, VERTICES_PER_FACE,
};
use super::GeometryError;
use crate::foundation::math::Vec3;

/// Unit-quad texture coordinates, one pair per vertex
pub const DEFAULT_FACE_UV: [f32; 8] = [
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,
];

/// One quad face of the cube
///
/// Triangle indices are local to the face's own 4 vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// 4 vertex positions, xyz each
    pub positions: [f32; FLOATS_PER_FACE],

    /// 2 triangles indexing into this face's vertices
    pub triangles: [u16; INDICES_PER_FACE],

    /// Texture coordinates, one uv pair per vertex
    pub texture_uv: [f32; VERTICES_PER_FACE * 2],
}

impl Face {
    /// Create a face with the default unit-quad texture coordinates
    pub const fn new(positions: [f32; FLOATS_PER_FACE], triangles: [u16; INDICES_PER_FACE]) -> Self {
        Self {
            positions,
            triangles,
            texture_uv: DEFAULT_FACE_UV,
        }
    }

    /// Replace the texture coordinates
    #[must_use]
    pub const fn with_texture_uv(mut self, texture_uv: [f32; VERTICES_PER_FACE * 2]) -> Self {
        self.texture_uv = texture_uv;
        self
    }

    /// Position of vertex `index`, for `index` in `0..4`
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        let start = index.checked_mul(3)?;
        self.positions
            .get(start..start.checked_add(3)?)
            .map(Vec3::from_column_slice)
    }

    /// The axis plane all four vertices lie on, if any
    ///
    /// Returns `None` for a quad that is not axis-aligned or sits on a plane
    /// through the origin.
    pub fn plane(&self) -> Option<CubeFace> {
        let first = self.vertex(0)?;
        (0..3).find_map(|axis| {
            let value = first[axis];
            let shared = (1..VERTICES_PER_FACE).all(|i| {
                self.vertex(i)
                    .is_some_and(|vertex| approx::relative_eq!(vertex[axis], value, epsilon = 1e-6))
            });
            if shared && value.abs() > 1e-6 {
                CubeFace::from_axis(axis, value > 0.0)
            } else {
                None
            }
        })
    }
}

/// Slice a flat cube position/triangle buffer into six faces
///
/// `positions` must hold exactly 72 floats. `triangles` may be either:
/// - 6 indices (legacy layout): the same local pattern reused for every face;
/// - 36 indices (per-face layout): face `i` reads `[6i, 6i + 6)` and rebases
///   them by `-4i`.
///
/// Every resulting index must address one of the face's own 4 vertices.
pub fn extract_faces(positions: &[f32], triangles: &[u16]) -> Result<Vec<Face>, GeometryError> {
    let expected_positions = FACE_COUNT * FLOATS_PER_FACE;
    if positions.len() != expected_positions {
        return Err(GeometryError::InvalidGeometry(format!(
            "expected {expected_positions} position floats, got {}",
            positions.len()
        )));
    }

    let shared_pattern = match triangles.len() {
        INDICES_PER_FACE => true,
        n if n == FACE_COUNT * INDICES_PER_FACE => false,
        n => {
            return Err(GeometryError::InvalidGeometry(format!(
                "expected {INDICES_PER_FACE} or {} triangle indices, got {n}",
                FACE_COUNT * INDICES_PER_FACE
            )))
        }
    };

    (0..FACE_COUNT)
        .map(|face_index| {
            let mut face_positions = [0.0; FLOATS_PER_FACE];
            face_positions.copy_from_slice(
                &positions[face_index * FLOATS_PER_FACE..(face_index + 1) * FLOATS_PER_FACE],
            );

            let (source, base) = if shared_pattern {
                (&triangles[..INDICES_PER_FACE], 0)
            } else {
                (
                    &triangles[face_index * INDICES_PER_FACE..(face_index + 1) * INDICES_PER_FACE],
                    face_index * VERTICES_PER_FACE,
                )
            };

            let mut face_triangles = [0u16; INDICES_PER_FACE];
            for (slot, &global) in face_triangles.iter_mut().zip(source) {
                let local = usize::from(global)
                    .checked_sub(base)
                    .filter(|&local| local < VERTICES_PER_FACE)
                    .ok_or_else(|| {
                        GeometryError::InvalidGeometry(format!(
                            "face {face_index} references vertex {global} outside its quad"
                        ))
                    })?;
                *slot = local as u16;
            }

            Ok(Face::new(face_positions, face_triangles))
        })
        .collect()
}
