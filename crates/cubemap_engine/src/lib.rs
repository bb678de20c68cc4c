//! # Cubemap Engine
//!
//! A cubemap skybox with an analytically reflective sphere at its center,
//! assembled against a pluggable render backend.
//!
//! ## Features
//!
//! - **Skybox Assembly**: six textured walls from one cube primitive and a face layout table
//! - **Analytic Reflection**: per-fragment exit-face lookup with a selectable tie-break policy
//! - **Asset Loading**: six-face PNG sets or a single shared JPEG
//! - **Headless Backend**: slot-map resource store plus a CPU preview renderer
//! - **Configuration**: TOML/RON files with defaults for every value
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cubemap_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut backend = HeadlessBackend::new();
//!
//!     let assembler = SceneAssembler::new(config.scene.clone())?;
//!     let scene = assembler.assemble_from_assets(&mut backend, &config.assets)?;
//!     log::info!("{} visuals registered", scene.visuals().count());
//!
//!     let mut camera = Camera::perspective(
//!         config.scene.camera_position,
//!         config.preview.fov_degrees,
//!         config.preview.aspect(),
//!         0.1,
//!         100.0,
//!     );
//!     camera.set_target(config.scene.camera_target);
//!     render_preview(&backend, &camera, &config.preview)?.save_png(&config.preview.output_path)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod geometry;
pub mod layout;
pub mod reflection;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, CubemapSource, FaceImages, ImageData},
        core::{ApplicationConfig, AssetConfig, Config, ConfigError, PreviewConfig, SceneConfig},
        foundation::math::{Point3, Transform, Vec2, Vec3},
        geometry::{CubeFace, CubeGeometry, SphereGeometry},
        layout::{FaceLabel, FaceLayout, LayoutPreset},
        reflection::{ReflectionSampler, SelectionPolicy},
        render::{render_preview, Camera, HeadlessBackend, RenderBackend, RenderError},
        scene::{AssembledScene, SceneAssembler, SceneError},
    };
}
