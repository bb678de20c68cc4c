//! In-memory render backend
//!
//! Stores every resource in a slot map and records visual transforms and scene
//! membership. Used by tests and by the CPU preview renderer.

use crate::assets::ImageData;
use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::foundation::math::{Transform, Vec3};

use super::backend::{
    BackendResult, GeometryData, GeometryHandle, RenderBackend, RenderError, ShadingDescriptor,
    ShadingHandle, SurfaceHandle, TextureHandle, VisualHandle,
};

/// Shading paired with geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    /// How the geometry is colored
    pub shading: ShadingHandle,
    /// What is drawn
    pub geometry: GeometryHandle,
}

/// Named placement of a surface
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    /// Name given at creation
    pub name: String,
    /// Surface shown by this visual
    pub surface: SurfaceHandle,
    /// Model transform, composed from scale/translate calls in order
    pub transform: Transform,
}

/// Geometry plus the byte streams a GPU buffer upload would receive
#[derive(Debug)]
struct UploadedGeometry {
    data: GeometryData,
    vertex_bytes: Vec<u8>,
    index_bytes: Vec<u8>,
}

/// Backend that keeps everything on the CPU
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    textures: HandleMap<ImageData>,
    geometries: HandleMap<UploadedGeometry>,
    shadings: HandleMap<ShadingDescriptor>,
    surfaces: HandleMap<Surface>,
    visuals: HandleMap<Visual>,
    scene: Vec<VisualHandle>,
    resource_limit: Option<usize>,
}

impl HeadlessBackend {
    /// Empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that refuses to create more than `limit` resources in total
    ///
    /// Simulates running out of GPU memory part way through a scene build.
    pub fn with_resource_limit(limit: usize) -> Self {
        Self {
            resource_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Total number of created resources of every kind
    pub fn resource_count(&self) -> usize {
        self.textures.len() + self.geometries.len() + self.shadings.len() + self.surfaces.len() + self.visuals.len()
    }

    fn reserve(&self, kind: &str) -> BackendResult<()> {
        match self.resource_limit {
            Some(limit) if self.resource_count() >= limit => Err(RenderError::ResourceCreationFailed(format!(
                "resource limit of {limit} reached while creating {kind}"
            ))),
            _ => Ok(()),
        }
    }

    /// Uploaded image for `handle`
    pub fn texture(&self, handle: TextureHandle) -> BackendResult<&ImageData> {
        self.textures.get(handle.key()).ok_or(RenderError::UnknownHandle("texture"))
    }

    fn uploaded(&self, handle: GeometryHandle) -> BackendResult<&UploadedGeometry> {
        self.geometries.get(handle.key()).ok_or(RenderError::UnknownHandle("geometry"))
    }

    /// Uploaded geometry for `handle`
    pub fn geometry(&self, handle: GeometryHandle) -> BackendResult<&GeometryData> {
        self.uploaded(handle).map(|uploaded| &uploaded.data)
    }

    /// Interleaved vertex bytes and index bytes stored for `handle`
    pub fn geometry_bytes(&self, handle: GeometryHandle) -> BackendResult<(&[u8], &[u8])> {
        self.uploaded(handle)
            .map(|uploaded| (uploaded.vertex_bytes.as_slice(), uploaded.index_bytes.as_slice()))
    }

    /// Bytes held by every geometry upload stream
    pub fn uploaded_bytes(&self) -> usize {
        self.geometries
            .values()
            .map(|uploaded| uploaded.vertex_bytes.len() + uploaded.index_bytes.len())
            .sum()
    }

    /// Shading descriptor for `handle`
    pub fn shading(&self, handle: ShadingHandle) -> BackendResult<&ShadingDescriptor> {
        self.shadings.get(handle.key()).ok_or(RenderError::UnknownHandle("shading"))
    }

    /// Surface for `handle`
    pub fn surface(&self, handle: SurfaceHandle) -> BackendResult<&Surface> {
        self.surfaces.get(handle.key()).ok_or(RenderError::UnknownHandle("surface"))
    }

    /// Visual for `handle`
    pub fn visual(&self, handle: VisualHandle) -> BackendResult<&Visual> {
        self.visuals.get(handle.key()).ok_or(RenderError::UnknownHandle("visual"))
    }

    fn visual_mut(&mut self, handle: VisualHandle) -> BackendResult<&mut Visual> {
        self.visuals.get_mut(handle.key()).ok_or(RenderError::UnknownHandle("visual"))
    }

    /// Visuals registered with the scene, in registration order
    pub fn scene_visuals(&self) -> impl Iterator<Item = (VisualHandle, &Visual)> + '_ {
        self.scene
            .iter()
            .filter_map(|&handle| self.visuals.get(handle.key()).map(|visual| (handle, visual)))
    }

    /// First scene visual called `name`
    pub fn find_visual(&self, name: &str) -> Option<(VisualHandle, &Visual)> {
        self.scene_visuals().find(|(_, visual)| visual.name == name)
    }

    /// Whether `visual` has been added to the scene
    pub fn is_in_scene(&self, visual: VisualHandle) -> bool {
        self.scene.contains(&visual)
    }

    fn check_shading_inputs(&self, shading: &ShadingDescriptor) -> BackendResult<()> {
        match shading {
            ShadingDescriptor::Emissive { texture, .. } => self.texture(*texture).map(|_| ()),
            ShadingDescriptor::Custom(custom) => {
                if custom.vertex_source.trim().is_empty() || custom.fragment_source.trim().is_empty() {
                    return Err(RenderError::ResourceCreationFailed(
                        "custom shading needs vertex and fragment sources".to_string(),
                    ));
                }
                for (name, texture) in &custom.textures {
                    self.texture(*texture)
                        .map_err(|_| RenderError::MissingBinding(name.clone()))?;
                }
                Ok(())
            }
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_texture(&mut self, image: ImageData) -> BackendResult<TextureHandle> {
        self.reserve("texture")?;
        image.to_rgba_image().map_err(|e| RenderError::ResourceCreationFailed(e.to_string()))?;
        log::debug!("Created {}x{} texture", image.width, image.height);
        Ok(TypedHandle::new(self.textures.insert(image)))
    }

    fn create_geometry(&mut self, geometry: GeometryData) -> BackendResult<GeometryHandle> {
        self.reserve("geometry")?;
        geometry.validate()?;
        let (vertex_bytes, index_bytes) = geometry.to_bytes();
        log::debug!(
            "Created geometry with {} vertices, {} triangles ({} bytes)",
            geometry.vertex_count(),
            geometry.triangles.len() / 3,
            vertex_bytes.len() + index_bytes.len()
        );
        Ok(TypedHandle::new(self.geometries.insert(UploadedGeometry {
            data: geometry,
            vertex_bytes,
            index_bytes,
        })))
    }

    fn create_shading(&mut self, shading: ShadingDescriptor) -> BackendResult<ShadingHandle> {
        self.reserve("shading")?;
        self.check_shading_inputs(&shading)?;
        Ok(TypedHandle::new(self.shadings.insert(shading)))
    }

    fn create_surface(&mut self, shading: ShadingHandle, geometry: GeometryHandle) -> BackendResult<SurfaceHandle> {
        self.reserve("surface")?;
        self.shading(shading)?;
        self.geometry(geometry)?;
        Ok(TypedHandle::new(self.surfaces.insert(Surface { shading, geometry })))
    }

    fn create_visual(&mut self, name: &str, surface: SurfaceHandle) -> BackendResult<VisualHandle> {
        self.reserve("visual")?;
        self.surface(surface)?;
        Ok(TypedHandle::new(self.visuals.insert(Visual {
            name: name.to_string(),
            surface,
            transform: Transform::identity(),
        })))
    }

    fn scale_visual(&mut self, visual: VisualHandle, factor: f32) -> BackendResult<()> {
        let visual = self.visual_mut(visual)?;
        visual.transform = visual.transform.then_scale(factor);
        Ok(())
    }

    fn translate_visual(&mut self, visual: VisualHandle, offset: Vec3) -> BackendResult<()> {
        let visual = self.visual_mut(visual)?;
        visual.transform = visual.transform.then_translate(offset);
        Ok(())
    }

    fn add_to_scene(&mut self, visual: VisualHandle) -> BackendResult<()> {
        let name = self.visual(visual)?.name.clone();
        if self.is_in_scene(visual) {
            return Err(RenderError::BackendError(format!("visual '{name}' is already in the scene")));
        }
        log::debug!("Added visual '{name}' to scene");
        self.scene.push(visual);
        Ok(())
    }
}
