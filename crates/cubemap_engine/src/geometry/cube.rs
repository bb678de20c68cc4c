//! Canonical cube primitive and the six cube face slots
//!
//! The cube is stored as 24 non-shared vertices (4 per face) so every face can
//! carry its own texture coordinates. Faces are laid out in the order
//! `+Z, +X, -Z, -X, +Y, -Y`.
//!
//! # Vertex Order
//! Within each face the 4 vertices are ordered so that the default UV table
//! (`(0,0),(1,0),(1,1),(0,1)`, with the top/bottom overrides) places every
//! texel exactly where the reflection sampler looks it up. A skybox wall and
//! its reflection in the sphere therefore always show the same image region.

use serde::{Deserialize, Serialize};

/// Number of faces on a cube
pub const FACE_COUNT: usize = 6;

/// Vertices per quad face
pub const VERTICES_PER_FACE: usize = 4;

/// Position floats per face (4 vertices × xyz)
pub const FLOATS_PER_FACE: usize = VERTICES_PER_FACE * 3;

/// Triangle indices per face (2 triangles)
pub const INDICES_PER_FACE: usize = 6;

/// Local triangle pattern shared by every quad face
pub const QUAD_TRIANGLES: [u16; INDICES_PER_FACE] = [0, 1, 2, 0, 2, 3];

/// One of the six axis-aligned cube face planes
///
/// Each slot is also the name of a texture binding in the reflection shader.
/// Those names come from the shader and do not describe the axis:
///
/// | Slot   | Plane | Sampler  |
/// |--------|-------|----------|
/// | `PosZ` | z = + | `front`  |
/// | `NegZ` | z = - | `back`   |
/// | `PosX` | x = + | `left`   |
/// | `NegX` | x = - | `right`  |
/// | `PosY` | y = + | `top`    |
/// | `NegY` | y = - | `bottom` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeFace {
    /// +X plane
    PosX,
    /// -X plane
    NegX,
    /// +Y plane
    PosY,
    /// -Y plane
    NegY,
    /// +Z plane
    PosZ,
    /// -Z plane
    NegZ,
}

impl CubeFace {
    /// All six slots in storage order
    pub const ALL: [Self; FACE_COUNT] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Dense index in `0..6`, matching [`CubeFace::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::PosX => 0,
            Self::NegX => 1,
            Self::PosY => 2,
            Self::NegY => 3,
            Self::PosZ => 4,
            Self::NegZ => 5,
        }
    }

    /// Vector component the face is perpendicular to (x = 0, y = 1, z = 2)
    pub const fn axis(self) -> usize {
        match self {
            Self::PosX | Self::NegX => 0,
            Self::PosY | Self::NegY => 1,
            Self::PosZ | Self::NegZ => 2,
        }
    }

    /// Whether the face lies on the positive side of its axis
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// Slot for an axis and side
    pub const fn from_axis(axis: usize, positive: bool) -> Option<Self> {
        match (axis, positive) {
            (0, true) => Some(Self::PosX),
            (0, false) => Some(Self::NegX),
            (1, true) => Some(Self::PosY),
            (1, false) => Some(Self::NegY),
            (2, true) => Some(Self::PosZ),
            (2, false) => Some(Self::NegZ),
            _ => None,
        }
    }

    /// Texture binding name used by the reflection shader
    pub const fn sampler_name(self) -> &'static str {
        match self {
            Self::PosZ => "front",
            Self::NegZ => "back",
            Self::PosX => "left",
            Self::NegX => "right",
            Self::PosY => "top",
            Self::NegY => "bottom",
        }
    }
}

/// Flat cube geometry: 72 position floats and a triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGeometry {
    /// Vertex positions, 3 floats per vertex, 4 vertices per face
    pub positions: Vec<f32>,

    /// Triangle indices into `positions`
    pub triangles: Vec<u16>,
}

impl CubeGeometry {
    /// The canonical cube spanning `[-1, 1]` on every axis
    ///
    /// Triangles use the per-face layout (36 indices, each face offset by 4).
    pub fn unit() -> Self {
        #[rustfmt::skip]
        let positions = vec![
            // +Z ("front" sampler)
            -1.0, -1.0,  1.0,    1.0, -1.0,  1.0,    1.0,  1.0,  1.0,   -1.0,  1.0,  1.0,
            // +X ("left" sampler)
             1.0, -1.0,  1.0,    1.0, -1.0, -1.0,    1.0,  1.0, -1.0,    1.0,  1.0,  1.0,
            // -Z ("back" sampler)
             1.0, -1.0, -1.0,   -1.0, -1.0, -1.0,   -1.0,  1.0, -1.0,    1.0,  1.0, -1.0,
            // -X ("right" sampler)
            -1.0, -1.0, -1.0,   -1.0, -1.0,  1.0,   -1.0,  1.0,  1.0,   -1.0,  1.0, -1.0,
            // +Y, laid out for the mirrored top UVs
             1.0,  1.0,  1.0,    1.0,  1.0, -1.0,   -1.0,  1.0, -1.0,   -1.0,  1.0,  1.0,
            // -Y, laid out for the reversed bottom UVs
             1.0, -1.0, -1.0,    1.0, -1.0,  1.0,   -1.0, -1.0,  1.0,   -1.0, -1.0, -1.0,
        ];

        let triangles = (0..FACE_COUNT)
            .flat_map(|face| {
                let base = (face * VERTICES_PER_FACE) as u16;
                QUAD_TRIANGLES.iter().map(move |&local| base + local)
            })
            .collect();

        Self { positions, triangles }
    }

    /// The legacy 6-index triangle list, reused verbatim by every face
    pub fn legacy_triangles() -> Vec<u16> {
        QUAD_TRIANGLES.to_vec()
    }

    /// Number of vertices described by `positions`
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}
