//! CPU preview of a headless scene
//!
//! Casts one primary ray per pixel against every scene visual. Emissive
//! surfaces show their texture times the ambient color. The reflection
//! program is evaluated with [`ReflectionSampler`] at the hit point, exactly
//! as the fragment stage would. Nothing is blended; a fragment that returns
//! transparent black is written as such.

use crate::assets::ImageData;
use crate::core::config::PreviewConfig;
use crate::foundation::math::{Point3, Vec2, Vec3};
use crate::reflection::{decode_reflection_shading, CubemapTextureSet, ReflectionSampler};

use super::backend::{RenderError, ShadingDescriptor};
use super::bounds::Aabb;
use super::camera::{Camera, Ray};
use super::headless::HeadlessBackend;

const HIT_EPSILON: f32 = 1e-6;

/// World-space triangle with per-vertex texture coordinates
#[derive(Debug, Clone, Copy)]
struct Triangle {
    vertices: [Vec3; 3],
    uvs: [Vec2; 3],
}

impl Triangle {
    /// Möller–Trumbore: ray parameter and barycentric (u, v) of the hit
    fn intersect(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        let [a, b, c] = self.vertices;
        let edge1 = b - a;
        let edge2 = c - a;
        let p = ray.direction.cross(&edge2);
        let det = edge1.dot(&p);
        if det.abs() < HIT_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = ray.origin - a;
        let u = s.dot(&p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(&edge1);
        let v = ray.direction.dot(&q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(&q) * inv_det;
        (t > HIT_EPSILON).then_some((t, u, v))
    }

    fn uv_at(&self, u: f32, v: f32) -> Vec2 {
        self.uvs[0] * (1.0 - u - v) + self.uvs[1] * u + self.uvs[2] * v
    }
}

enum PreparedShading<'a> {
    Emissive { texture: &'a ImageData, ambient: Vec3 },
    Reflection { sampler: ReflectionSampler, textures: CubemapTextureSet },
}

struct PreparedVisual<'a> {
    name: &'a str,
    bounds: Aabb,
    triangles: Vec<Triangle>,
    shading: PreparedShading<'a>,
}

struct Hit<'v, 'a> {
    visual: &'v PreparedVisual<'a>,
    triangle: Triangle,
    distance: f32,
    u: f32,
    v: f32,
}

fn prepare_shading<'a>(backend: &'a HeadlessBackend, shading: &'a ShadingDescriptor) -> Result<PreparedShading<'a>, RenderError> {
    match shading {
        ShadingDescriptor::Emissive { texture, ambient } => Ok(PreparedShading::Emissive {
            texture: backend.texture(*texture)?,
            ambient: *ambient,
        }),
        ShadingDescriptor::Custom(custom) => {
            let (sampler, bindings) = decode_reflection_shading(custom).ok_or_else(|| {
                RenderError::BackendError("preview can only run the reflection program".to_string())
            })?;
            let mut textures = CubemapTextureSet::new();
            for (face, texture) in bindings {
                textures.bind(face, backend.texture(texture)?.clone());
            }
            if let Some(face) = textures.missing().first() {
                return Err(RenderError::MissingBinding(face.sampler_name().to_string()));
            }
            Ok(PreparedShading::Reflection { sampler, textures })
        }
    }
}

fn prepare_scene<'a>(backend: &'a HeadlessBackend) -> Result<Vec<PreparedVisual<'a>>, RenderError> {
    backend
        .scene_visuals()
        .map(|(_, visual)| -> Result<PreparedVisual<'a>, RenderError> {
            let surface = backend.surface(visual.surface)?;
            let geometry = backend.geometry(surface.geometry)?;
            let model = visual.transform.to_matrix();

            let world: Vec<Vec3> = geometry
                .positions
                .chunks_exact(3)
                .map(|p| model.transform_point(&Point3::new(p[0], p[1], p[2])).coords)
                .collect();
            let uv = |i: usize| Vec2::new(geometry.texture_uv[i * 2], geometry.texture_uv[i * 2 + 1]);
            let triangles = geometry
                .triangles
                .chunks_exact(3)
                .map(|corners| {
                    let [a, b, c] = [0, 1, 2].map(|k| usize::from(corners[k]));
                    Triangle {
                        vertices: [world[a], world[b], world[c]],
                        uvs: [uv(a), uv(b), uv(c)],
                    }
                })
                .collect();
            let bounds = Aabb::from_points(world.iter().copied())
                .ok_or_else(|| RenderError::RenderingFailed(format!("visual '{}' has no vertices", visual.name)))?;

            Ok(PreparedVisual {
                name: &visual.name,
                bounds,
                triangles,
                shading: prepare_shading(backend, backend.shading(surface.shading)?)?,
            })
        })
        .collect()
}

fn trace<'v, 'a>(visuals: &'v [PreparedVisual<'a>], ray: &Ray) -> Option<Hit<'v, 'a>> {
    let mut nearest: Option<Hit<'v, 'a>> = None;
    for visual in visuals {
        let Some(entry) = visual.bounds.intersect_ray(ray.origin, ray.direction) else {
            continue;
        };
        if nearest.as_ref().is_some_and(|hit| entry > hit.distance) {
            continue;
        }
        for triangle in &visual.triangles {
            if let Some((distance, u, v)) = triangle.intersect(ray) {
                if nearest.as_ref().map_or(true, |hit| distance < hit.distance) {
                    nearest = Some(Hit { visual, triangle: *triangle, distance, u, v });
                }
            }
        }
    }
    nearest
}

fn shade(hit: &Hit<'_, '_>, ray: &Ray, camera: &Camera) -> [f32; 4] {
    match &hit.visual.shading {
        PreparedShading::Emissive { texture, ambient } => {
            let [r, g, b, a] = texture.sample_nearest(hit.triangle.uv_at(hit.u, hit.v));
            [r * ambient.x, g * ambient.y, b * ambient.z, a]
        }
        PreparedShading::Reflection { sampler, textures } => {
            sampler.shade(textures, &camera.position, &ray.at(hit.distance))
        }
    }
}

fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Render the scene registered in `backend` as seen from `camera`
pub fn render_preview(backend: &HeadlessBackend, camera: &Camera, config: &PreviewConfig) -> Result<ImageData, RenderError> {
    let visuals = prepare_scene(backend)?;
    log::info!(
        "Rendering {}x{} preview of {} visuals: {}",
        config.width,
        config.height,
        visuals.len(),
        visuals.iter().map(|visual| visual.name).collect::<Vec<_>>().join(", ")
    );

    let clear = to_rgba8(config.clear_color);
    let image = ImageData::from_fn(config.width, config.height, |x, y| {
        let ray = camera.pixel_ray(x, y, config.width, config.height);
        trace(&visuals, &ray).map_or(clear, |hit| to_rgba8(shade(&hit, &ray, camera)))
    });
    Ok(image)
}
