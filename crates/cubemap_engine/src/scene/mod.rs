//! # Scene Assembly
//!
//! Turns face images, the cube primitive and the sphere into backend visuals:
//! six emissive skybox walls and one sphere running the reflection program.

pub mod assembler;


pub use assembler::{AssembledScene, SceneAssembler, WallVisual};

use thiserror::Error;

use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::geometry::GeometryError;
use crate::render::RenderError;

/// Scene construction errors
///
/// Every variant is fatal; a failed build registers nothing with the scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// An image could not be loaded or oriented
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Cube or sphere geometry is malformed
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// The backend refused a resource
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The scene configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
