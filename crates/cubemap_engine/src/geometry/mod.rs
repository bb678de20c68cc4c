//! Scene geometry: the cube primitive, face extraction and the sphere mesh

pub mod cube;
pub mod face;
pub mod sphere;

pub use cube::{CubeFace, CubeGeometry, FACE_COUNT};
pub use face::{extract_faces, Face, DEFAULT_FACE_UV};
pub use sphere::SphereGeometry;

use thiserror::Error;

/// Geometry construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Position or triangle arrays do not match the expected layout
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}
