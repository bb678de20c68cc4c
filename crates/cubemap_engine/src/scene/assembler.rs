//! Builds the skybox + reflective sphere scene against a [`RenderBackend`]
//!
//! All resources are created first and registered with the scene only once
//! every one of them exists. An error anywhere leaves the scene empty.

use crate::assets::{load_face_images, FaceImages};
use crate::core::config::{AssetConfig, SceneConfig};
use crate::geometry::{extract_faces, CubeFace, CubeGeometry, Face, GeometryError, SphereGeometry, FACE_COUNT};
use crate::layout::{FaceLabel, FaceLayout};
use crate::reflection::reflection_shading;
use crate::render::{GeometryData, RenderBackend, ShadingDescriptor, TextureHandle, VisualHandle};

use super::SceneError;

/// Name of the sphere visual
pub const SPHERE_VISUAL_NAME: &str = "sphere";

/// One skybox wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallVisual {
    /// Image shown on the wall
    pub label: FaceLabel,
    /// Plane the wall lies on; also its reflection sampler slot
    pub face: CubeFace,
    /// Uploaded, oriented image
    pub texture: TextureHandle,
    /// The wall's visual
    pub visual: VisualHandle,
}

/// Handles of everything the assembler registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledScene {
    /// Walls in extracted face order
    pub walls: Vec<WallVisual>,
    /// The reflective sphere
    pub sphere: VisualHandle,
}

impl AssembledScene {
    /// Wall lying on `face`
    pub fn wall(&self, face: CubeFace) -> Option<&WallVisual> {
        self.walls.iter().find(|wall| wall.face == face)
    }

    /// Wall showing `label`
    pub fn wall_with_label(&self, label: FaceLabel) -> Option<&WallVisual> {
        self.walls.iter().find(|wall| wall.label == label)
    }

    /// Every registered visual, walls first
    pub fn visuals(&self) -> impl Iterator<Item = VisualHandle> + '_ {
        self.walls.iter().map(|wall| wall.visual).chain(std::iter::once(self.sphere))
    }
}

/// Scene builder for one validated [`SceneConfig`]
#[derive(Debug, Clone)]
pub struct SceneAssembler {
    config: SceneConfig,
    layout: FaceLayout,
}

impl SceneAssembler {
    /// Validate `config` and resolve its face layout
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let layout = config.face_layout();
        Ok(Self { config, layout })
    }

    /// Configuration in use
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Face layout in use
    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    /// Load the face images described by `assets`, then assemble
    pub fn assemble_from_assets<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        assets: &AssetConfig,
    ) -> Result<AssembledScene, SceneError> {
        let images = load_face_images(assets)?;
        self.assemble(backend, &images)
    }

    /// Assemble with the canonical unit cube
    pub fn assemble<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        images: &FaceImages,
    ) -> Result<AssembledScene, SceneError> {
        self.assemble_with_geometry(backend, images, &CubeGeometry::unit())
    }

    /// Assemble with an explicit cube buffer
    ///
    /// Each extracted face must lie on a distinct axis plane; that plane decides
    /// which reflection sampler the face's image is bound to.
    pub fn assemble_with_geometry<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        images: &FaceImages,
        cube: &CubeGeometry,
    ) -> Result<AssembledScene, SceneError> {
        let faces = extract_faces(&cube.positions, &cube.triangles)?;
        let planes = face_planes(&faces)?;
        let config = &self.config;

        // Orient every image before the first upload
        let mut prepared = Vec::with_capacity(FACE_COUNT);
        for (index, face) in faces.into_iter().enumerate() {
            let entry = self.layout.face(index).ok_or_else(|| {
                GeometryError::InvalidGeometry(format!("face layout has no entry for face {index}"))
            })?;
            let image = entry.transform.apply(images.get(entry.label))?;
            prepared.push((entry, face.with_texture_uv(entry.texture_uv), image));
        }
        let (latitude, longitude) = config.sphere_segments;
        let sphere_mesh = SphereGeometry::new(latitude, longitude)?;

        let mut walls = Vec::with_capacity(FACE_COUNT);
        for ((index, (entry, face, image)), plane) in prepared.into_iter().enumerate().zip(planes) {
            log::debug!(
                "Face {index}: '{}' on {plane:?} ({} ops, {}x{})",
                entry.label.name(),
                entry.transform.ops.len(),
                image.width,
                image.height
            );

            let texture = backend.create_texture(image)?;
            let geometry = backend.create_geometry(GeometryData::new(
                face.positions.to_vec(),
                face.texture_uv.to_vec(),
                face.triangles.to_vec(),
            ))?;
            let shading = backend.create_shading(ShadingDescriptor::Emissive {
                texture,
                ambient: config.ambient,
            })?;
            let surface = backend.create_surface(shading, geometry)?;
            let visual = backend.create_visual(entry.label.name(), surface)?;
            backend.scale_visual(visual, config.scale)?;
            backend.translate_visual(visual, config.cube_position)?;

            walls.push(WallVisual {
                label: entry.label,
                face: plane,
                texture,
                visual,
            });
        }

        let sphere = self.create_sphere(backend, sphere_mesh, &walls)?;
        let scene = AssembledScene { walls, sphere };

        for visual in scene.visuals() {
            backend.add_to_scene(visual)?;
        }
        log::info!(
            "Assembled cubemap scene: {} walls at scale {}, sphere {}x{} at scale {}, {:?}",
            scene.walls.len(),
            config.scale,
            config.sphere_segments.0,
            config.sphere_segments.1,
            config.sphere_scale(),
            config.policy
        );
        Ok(scene)
    }

    fn create_sphere<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        sphere: SphereGeometry,
        walls: &[WallVisual],
    ) -> Result<VisualHandle, SceneError> {
        let geometry = backend.create_geometry(GeometryData::new(sphere.positions, sphere.texture_uv, sphere.triangles))?;

        let bindings: Vec<_> = walls.iter().map(|wall| (wall.face, wall.texture)).collect();
        let shading = backend.create_shading(reflection_shading(&bindings, &self.config.reflection_sampler())?)?;
        let surface = backend.create_surface(shading, geometry)?;
        let visual = backend.create_visual(SPHERE_VISUAL_NAME, surface)?;
        backend.scale_visual(visual, self.config.sphere_scale())?;
        Ok(visual)
    }
}

/// Plane of every face; each plane must occur exactly once
fn face_planes(faces: &[Face]) -> Result<Vec<CubeFace>, GeometryError> {
    let mut seen = [false; FACE_COUNT];
    faces
        .iter()
        .enumerate()
        .map(|(index, face)| {
            let plane = face.plane().ok_or_else(|| {
                GeometryError::InvalidGeometry(format!("face {index} does not lie on a cube plane"))
            })?;
            if std::mem::replace(&mut seen[plane.index()], true) {
                return Err(GeometryError::InvalidGeometry(format!(
                    "face {index} lies on {plane:?}, which another face already covers"
                )));
            }
            Ok(plane)
        })
        .collect()
}
