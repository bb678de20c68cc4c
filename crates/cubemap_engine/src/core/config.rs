//! # Application Configuration
//!
//! All tunables of the cubemap scene in one serializable tree. Every section
//! carries `#[serde(default)]`, so a config file only needs the values it
//! changes.
//!
//! ## Sections
//!
//! - **Engine**: logging
//! - **Scene**: cube scale, sphere tessellation, camera, reflection policy, face layout
//! - **Assets**: where the face images live and how they are packaged
//! - **Preview**: the CPU preview render

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::assets::CubemapSource;
use crate::foundation::math::Vec3;
use crate::layout::{FaceLayout, LayoutPreset};
use crate::reflection::{ReflectionSampler, SelectionPolicy};

/// # Engine Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Scene Configuration
///
/// Geometry, camera and shading parameters of the skybox + sphere scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Cube half-extent; also the reflection sampler's `scale`
    pub scale: f32,
    /// Where the skybox is translated after scaling
    pub cube_position: Vec3,
    /// Sphere tessellation as (latitude bands, longitude segments)
    pub sphere_segments: (u32, u32),
    /// The sphere is scaled by `scale / sphere_scale_divisor`
    pub sphere_scale_divisor: f32,
    /// Camera position in world space
    pub camera_position: Vec3,
    /// Point the camera looks at
    pub camera_target: Vec3,
    /// Which face wins when the reflected ray is ambiguous
    pub policy: SelectionPolicy,
    /// Ambient light color for the emissive skybox walls
    pub ambient: Vec3,
    /// Named face layout
    pub layout_preset: LayoutPreset,
    /// Explicit layout table; overrides `layout_preset` when set
    pub custom_layout: Option<FaceLayout>,
}

impl SceneConfig {
    /// Create the default scene: a cube of half-extent 5 around a sphere of radius 1.25
    pub fn new() -> Self {
        Self {
            scale: 5.0,
            cube_position: Vec3::zeros(),
            sphere_segments: (20, 20),
            sphere_scale_divisor: 4.0,
            camera_position: Vec3::new(3.0, 3.0, 1.0),
            camera_target: Vec3::zeros(),
            policy: SelectionPolicy::default(),
            ambient: Vec3::new(1.0, 1.0, 1.0),
            layout_preset: LayoutPreset::default(),
            custom_layout: None,
        }
    }

    /// Set the cube half-extent
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the reflection selection policy
    #[must_use]
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the face layout preset
    #[must_use]
    pub fn with_layout_preset(mut self, preset: LayoutPreset) -> Self {
        self.layout_preset = preset;
        self
    }

    /// The face layout in effect
    pub fn face_layout(&self) -> FaceLayout {
        self.custom_layout
            .clone()
            .unwrap_or_else(|| FaceLayout::from_preset(self.layout_preset))
    }

    /// Uniform scale applied to the unit sphere
    pub fn sphere_scale(&self) -> f32 {
        self.scale / self.sphere_scale_divisor
    }

    /// CPU sampler matching the GPU program's uniforms
    pub fn reflection_sampler(&self) -> ReflectionSampler {
        ReflectionSampler::new(self.scale, self.policy)
    }

    /// Validate the scene parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Invalid(format!("scale must be positive, got {}", self.scale)));
        }
        if !(self.sphere_scale_divisor.is_finite() && self.sphere_scale_divisor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sphere_scale_divisor must be positive, got {}",
                self.sphere_scale_divisor
            )));
        }
        if self.sphere_scale() >= self.scale {
            return Err(ConfigError::Invalid(format!(
                "sphere radius {} must be smaller than the cube half-extent {}",
                self.sphere_scale(),
                self.scale
            )));
        }
        let (lat, lon) = self.sphere_segments;
        if lat < 2 || lon < 3 {
            return Err(ConfigError::Invalid(format!(
                "sphere needs at least 2 latitude bands and 3 longitude segments, got {lat}x{lon}"
            )));
        }
        if (self.camera_position - self.camera_target).norm() < f32::EPSILON {
            return Err(ConfigError::Invalid("camera position equals camera target".to_string()));
        }
        if self.ambient.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(ConfigError::Invalid(format!("ambient color must be non-negative, got {:?}", self.ambient)));
        }
        self.face_layout().validate()
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Asset Configuration
///
/// Location and packaging of the cubemap images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for assets
    pub asset_root: String,
    /// Image set name, e.g. `Field` for `FieldCubeMap/FieldFront.png`
    pub image_name: String,
    /// Six separate faces or one shared image
    pub source: CubemapSource,
}

impl AssetConfig {
    /// Create a new asset configuration
    pub fn new() -> Self {
        Self {
            asset_root: "assets".to_string(),
            image_name: "Field".to_string(),
            source: CubemapSource::default(),
        }
    }

    /// Set assets directory
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<String>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Set the image set name
    #[must_use]
    pub fn with_image_name(mut self, name: impl Into<String>) -> Self {
        self.image_name = name.into();
        self
    }

    /// Validate the asset settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_name.is_empty() {
            return Err(ConfigError::Invalid("image name cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Preview Configuration
///
/// Output of the CPU preview renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Background color (RGBA)
    pub clear_color: [f32; 4],
    /// Where the PNG is written
    pub output_path: String,
}

impl PreviewConfig {
    /// Create a new preview configuration
    pub fn new() -> Self {
        Self {
            width: 1024,
            height: 768,
            fov_degrees: 60.0,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            output_path: "reflection_preview.png".to_string(),
        }
    }

    /// Set the output resolution
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Validate the preview settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "preview size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "field of view must be within (0, 180) degrees, got {}",
                self.fov_degrees
            )));
        }
        if self.output_path.is_empty() {
            return Err(ConfigError::Invalid("preview output path cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Scene configuration
    pub scene: SceneConfig,
    /// Asset configuration
    pub assets: AssetConfig,
    /// Preview renderer configuration
    pub preview: PreviewConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate()?;
        self.assets.validate()?;
        self.preview.validate()
    }
}

impl Config for ApplicationConfig {}
