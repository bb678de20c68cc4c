//! Backend abstraction for the rendering system
//!
//! Scene assembly talks to the renderer only through [`RenderBackend`]. The
//! trait creates opaque resources (textures, geometry, shadings, surfaces,
//! visuals), positions visuals, and registers them with the scene.

use thiserror::Error;

use crate::assets::ImageData;
use crate::foundation::collections::TypedHandle;
use crate::foundation::math::Vec3;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle tag for texture resources
#[derive(Debug)]
pub enum TextureTag {}

/// Handle tag for geometry resources
#[derive(Debug)]
pub enum GeometryTag {}

/// Handle tag for shading resources
#[derive(Debug)]
pub enum ShadingTag {}

/// Handle tag for surfaces (shading + geometry)
#[derive(Debug)]
pub enum SurfaceTag {}

/// Handle tag for named, placeable visuals
#[derive(Debug)]
pub enum VisualTag {}

/// Handle to an uploaded texture
pub type TextureHandle = TypedHandle<TextureTag>;

/// Handle to uploaded geometry
pub type GeometryHandle = TypedHandle<GeometryTag>;

/// Handle to a compiled shading
pub type ShadingHandle = TypedHandle<ShadingTag>;

/// Handle to a surface
pub type SurfaceHandle = TypedHandle<SurfaceTag>;

/// Handle to a visual
pub type VisualHandle = TypedHandle<VisualTag>;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Resource creation failed, typically due to invalid data
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// A handle does not belong to this backend or was never created
    #[error("Unknown {0} handle")]
    UnknownHandle(&'static str),

    /// A shader sampler has no texture bound to it
    #[error("Missing texture binding for sampler '{0}'")]
    MissingBinding(String),

    /// Texture bindings are inconsistent
    #[error("Invalid texture binding: {0}")]
    InvalidBinding(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Vertex data handed to [`RenderBackend::create_geometry`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryData {
    /// Positions, 3 floats per vertex
    pub positions: Vec<f32>,
    /// Texture coordinates, 2 floats per vertex
    pub texture_uv: Vec<f32>,
    /// Triangle list indexing the vertices
    pub triangles: Vec<u16>,
}

/// Floats per interleaved vertex: position (3) + uv (2)
pub const INTERLEAVED_STRIDE: usize = 5;

impl GeometryData {
    /// Bundle the three arrays
    pub fn new(positions: Vec<f32>, texture_uv: Vec<f32>, triangles: Vec<u16>) -> Self {
        Self {
            positions,
            texture_uv,
            triangles,
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position of vertex `index`, if it exists
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let start = index.checked_mul(3)?;
        self.positions
            .get(start..start.checked_add(3)?)
            .map(Vec3::from_column_slice)
    }

    /// Check array lengths agree and every index addresses a vertex
    pub fn validate(&self) -> BackendResult<()> {
        if self.positions.len() % 3 != 0 || self.positions.is_empty() {
            return Err(RenderError::ResourceCreationFailed(format!(
                "position array length {} is not a non-empty multiple of 3",
                self.positions.len()
            )));
        }
        let vertices = self.vertex_count();
        if self.texture_uv.len() != vertices * 2 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "expected {} texture coordinates for {vertices} vertices, got {}",
                vertices * 2,
                self.texture_uv.len()
            )));
        }
        if self.triangles.is_empty() || self.triangles.len() % 3 != 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "triangle list length {} is not a non-empty multiple of 3",
                self.triangles.len()
            )));
        }
        if let Some(index) = self.triangles.iter().find(|&&i| usize::from(i) >= vertices) {
            return Err(RenderError::ResourceCreationFailed(format!(
                "triangle index {index} out of range for {vertices} vertices"
            )));
        }
        Ok(())
    }

    /// Interleaved `[x, y, z, u, v]` vertex stream
    pub fn interleaved(&self) -> Vec<f32> {
        self.positions
            .chunks_exact(3)
            .zip(self.texture_uv.chunks_exact(2))
            .flat_map(|(position, uv)| position.iter().chain(uv).copied())
            .collect()
    }

    /// Vertex and index streams as raw bytes, ready for a GPU buffer upload
    pub fn to_bytes(&self) -> (Vec<u8>, Vec<u8>) {
        let vertices = self.interleaved();
        (
            bytemuck::cast_slice(&vertices).to_vec(),
            bytemuck::cast_slice(&self.triangles).to_vec(),
        )
    }
}

/// How a surface is colored
#[derive(Debug, Clone, PartialEq)]
pub enum ShadingDescriptor {
    /// Unlit texture modulated by an ambient light color
    Emissive {
        /// Color texture
        texture: TextureHandle,
        /// Ambient light color
        ambient: Vec3,
    },
    /// User program with named texture bindings and float uniforms
    Custom(CustomShading),
}

/// Sources and inputs of a custom shading program
#[derive(Debug, Clone, PartialEq)]
pub struct CustomShading {
    /// GLSL vertex stage
    pub vertex_source: String,
    /// GLSL fragment stage
    pub fragment_source: String,
    /// Sampler name → texture
    pub textures: Vec<(String, TextureHandle)>,
    /// Uniform name → value
    pub uniforms: Vec<(String, f32)>,
}

impl CustomShading {
    /// Value of the float uniform `name`
    pub fn uniform(&self, name: &str) -> Option<f32> {
        self.uniforms
            .iter()
            .find(|(uniform, _)| uniform == name)
            .map(|&(_, value)| value)
    }

    /// Texture bound to sampler `name`
    pub fn texture(&self, name: &str) -> Option<TextureHandle> {
        self.textures
            .iter()
            .find(|(sampler, _)| sampler == name)
            .map(|&(_, texture)| texture)
    }
}

/// Main rendering backend trait
///
/// Creation calls return opaque handles owned by the backend. Visuals only
/// become visible once passed to [`RenderBackend::add_to_scene`].
pub trait RenderBackend {
    /// Upload an image; ownership moves to the backend
    fn create_texture(&mut self, image: ImageData) -> BackendResult<TextureHandle>;

    /// Upload positions, texture coordinates and triangles
    fn create_geometry(&mut self, geometry: GeometryData) -> BackendResult<GeometryHandle>;

    /// Compile a shading
    fn create_shading(&mut self, shading: ShadingDescriptor) -> BackendResult<ShadingHandle>;

    /// Pair a shading with geometry
    fn create_surface(&mut self, shading: ShadingHandle, geometry: GeometryHandle) -> BackendResult<SurfaceHandle>;

    /// Create a named visual showing `surface`, with an identity transform
    fn create_visual(&mut self, name: &str, surface: SurfaceHandle) -> BackendResult<VisualHandle>;

    /// Scale a visual uniformly, after its current transform
    fn scale_visual(&mut self, visual: VisualHandle, factor: f32) -> BackendResult<()>;

    /// Translate a visual, after its current transform
    fn translate_visual(&mut self, visual: VisualHandle, offset: Vec3) -> BackendResult<()>;

    /// Register a visual with the rendered scene
    fn add_to_scene(&mut self, visual: VisualHandle) -> BackendResult<()>;
}
