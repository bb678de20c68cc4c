//! Analytic cubemap reflection lookup
//!
//! For a point on the sphere, the view ray is reflected about the sphere
//! normal and traced to the enclosing cube. The face it leaves through, and
//! the texture coordinate on that face, are computed in closed form. No ray
//! marching is needed.
//!
//! The cube spans `[-scale, scale]` on every axis and the sphere is centered
//! at the origin, so the surface normal is the normalized surface position.
//!
//! # Face texture coordinates
//! With `u(c) = 0.5 · c / scale + 0.5` applied to the exit point `P`:
//!
//! | Face   | uv                     |
//! |--------|------------------------|
//! | `PosZ` | `(u(x), u(y))`         |
//! | `NegZ` | `(1 - u(x), u(y))`     |
//! | `PosX` | `(1 - u(z), u(y))`     |
//! | `NegX` | `(u(z), u(y))`         |
//! | `PosY` | `(u(x), 1 - u(z))`     |
//! | `NegY` | `(1 - u(x), 1 - u(z))` |

use serde::{Deserialize, Serialize};

use crate::foundation::math::{reflect, remap_axis, Vec2, Vec3};
use crate::geometry::CubeFace;

/// Ray direction components smaller than this never produce a face hit
pub const DIRECTION_EPSILON: f32 = 1e-6;

/// Largest `f32` strictly below 1.0; upper bound for clamped texture coordinates
pub const MAX_UV: f32 = 1.0 - f32::EPSILON / 2.0;

/// Slack allowed when the nearest-hit exit point lands just outside a face
const EXIT_TOLERANCE: f32 = 1e-4;

/// Axes in evaluation order: z, x, y
const AXIS_ORDER: [usize; 3] = [2, 0, 1];

/// Which candidate face wins when more than one is plausible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Smallest positive ray parameter wins; ties go to the earlier axis
    /// in z, x, y order
    #[default]
    NearestHit,
    /// Every branch is evaluated in order `+z/-z, +x/-x, +y/-y` and the last one
    /// whose uv lands in `[0, 1)²` wins
    LastMatch,
}

/// Per-fragment inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectionParameters {
    /// Cube half-extent
    pub scale: f32,
    /// Camera position in world space
    pub camera_position: Vec3,
    /// Point on the sphere surface in world space
    pub surface_position: Vec3,
}

/// Result of a cube exit lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeHit {
    /// Face the ray leaves through
    pub face: CubeFace,
    /// Texture coordinate on that face, in `[0, 1)²`
    pub uv: Vec2,
    /// Ray parameter of the exit point
    pub distance: f32,
}

/// Texture coordinate of `point` (on `face`'s plane) for that face
pub fn face_uv(face: CubeFace, point: &Vec3, scale: f32) -> Vec2 {
    let u = |c: f32| remap_axis(c, scale);
    match face {
        CubeFace::PosZ => Vec2::new(u(point.x), u(point.y)),
        CubeFace::NegZ => Vec2::new(1.0 - u(point.x), u(point.y)),
        CubeFace::PosX => Vec2::new(1.0 - u(point.z), u(point.y)),
        CubeFace::NegX => Vec2::new(u(point.z), u(point.y)),
        CubeFace::PosY => Vec2::new(u(point.x), 1.0 - u(point.z)),
        CubeFace::NegY => Vec2::new(1.0 - u(point.x), 1.0 - u(point.z)),
    }
}

/// `reflect(normalize(surface - camera), normalize(surface))`
///
/// `None` when either vector has no direction (surface at the origin or
/// camera on the surface point).
pub fn reflected_direction(camera_position: &Vec3, surface_position: &Vec3) -> Option<Vec3> {
    let incident = (surface_position - camera_position).try_normalize(DIRECTION_EPSILON)?;
    let normal = surface_position.try_normalize(DIRECTION_EPSILON)?;
    Some(reflect(&incident, &normal))
}

fn in_unit_square(uv: &Vec2) -> bool {
    (0.0..1.0).contains(&uv.x) && (0.0..1.0).contains(&uv.y)
}

/// Find the face a ray from `origin` along `direction` leaves the cube through
pub fn exit_face(origin: &Vec3, direction: &Vec3, scale: f32, policy: SelectionPolicy) -> Option<CubeHit> {
    match policy {
        SelectionPolicy::NearestHit => nearest_exit(origin, direction, scale),
        SelectionPolicy::LastMatch => last_matching_exit(origin, direction, scale),
    }
}

fn nearest_exit(origin: &Vec3, direction: &Vec3, scale: f32) -> Option<CubeHit> {
    let mut best: Option<(CubeFace, f32)> = None;
    for axis in AXIS_ORDER {
        let d = direction[axis];
        if d.abs() < DIRECTION_EPSILON {
            continue;
        }
        let bound = scale.copysign(d);
        let distance = (bound - origin[axis]) / d;
        if distance < 0.0 || best.is_some_and(|(_, nearest)| distance >= nearest) {
            continue;
        }
        best = CubeFace::from_axis(axis, d > 0.0).map(|face| (face, distance));
    }

    let (face, distance) = best?;
    let mut point = origin + direction * distance;
    point[face.axis()] = scale.copysign(direction[face.axis()]);

    let uv = face_uv(face, &point, scale);
    let range = -EXIT_TOLERANCE..=1.0 + EXIT_TOLERANCE;
    if !(range.contains(&uv.x) && range.contains(&uv.y)) {
        // Origin outside the cube: the nearest plane is not on the cube
        return None;
    }

    Some(CubeHit {
        face,
        uv: uv.map(|c| c.clamp(0.0, MAX_UV)),
        distance,
    })
}

fn last_matching_exit(origin: &Vec3, direction: &Vec3, scale: f32) -> Option<CubeHit> {
    let mut winner = None;
    for axis in AXIS_ORDER {
        let d = direction[axis];
        if d.abs() < DIRECTION_EPSILON {
            continue;
        }

        let towards_positive = (scale - origin[axis]) / d;
        let (face, distance) = if towards_positive > 0.0 {
            (CubeFace::from_axis(axis, true), towards_positive)
        } else if towards_positive < 0.0 {
            (CubeFace::from_axis(axis, false), -(scale + origin[axis]) / d)
        } else {
            continue;
        };
        let Some(face) = face else { continue };

        let point = origin + direction * distance;
        let uv = face_uv(face, &point, scale);
        if in_unit_square(&uv) {
            winner = Some(CubeHit { face, uv, distance });
        }
    }
    winner
}

/// Stateless per-fragment reflection lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectionSampler {
    /// Cube half-extent
    pub scale: f32,
    /// Winner selection
    pub policy: SelectionPolicy,
}

impl ReflectionSampler {
    /// Create a sampler for a cube of half-extent `scale`
    pub const fn new(scale: f32, policy: SelectionPolicy) -> Self {
        Self { scale, policy }
    }

    /// Face and uv seen in the sphere at `surface_position` from `camera_position`
    pub fn lookup(&self, camera_position: &Vec3, surface_position: &Vec3) -> Option<CubeHit> {
        let reflected = reflected_direction(camera_position, surface_position)?;
        exit_face(surface_position, &reflected, self.scale, self.policy)
    }

    /// Lookup driven by a full parameter set; `params.scale` overrides `self.scale`
    pub fn lookup_with(&self, params: &ReflectionParameters) -> Option<CubeHit> {
        Self::new(params.scale, self.policy).lookup(&params.camera_position, &params.surface_position)
    }

    /// Fragment color: the face texel, or transparent black when nothing is hit
    pub fn shade<T: FaceTextureSource + ?Sized>(
        &self,
        textures: &T,
        camera_position: &Vec3,
        surface_position: &Vec3,
    ) -> [f32; 4] {
        self.lookup(camera_position, surface_position)
            .map_or([0.0; 4], |hit| textures.sample(hit.face, hit.uv))
    }
}

/// Read-only access to the six bound face textures
pub trait FaceTextureSource {
    /// RGBA color of `face` at `uv`, channels in `[0, 1]`
    fn sample(&self, face: CubeFace, uv: Vec2) -> [f32; 4];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::unmap_axis;
    use approx::assert_relative_eq;

    const SCALE: f32 = 5.0;
    const POLICIES: [SelectionPolicy; 2] = [SelectionPolicy::NearestHit, SelectionPolicy::LastMatch];

    #[test]
    fn test_axis_directions_hit_face_centers() {
        let cases = [
            (Vec3::new(1.0, 0.0, 0.0), CubeFace::PosX),
            (Vec3::new(-1.0, 0.0, 0.0), CubeFace::NegX),
            (Vec3::new(0.0, 1.0, 0.0), CubeFace::PosY),
            (Vec3::new(0.0, -1.0, 0.0), CubeFace::NegY),
            (Vec3::new(0.0, 0.0, 1.0), CubeFace::PosZ),
            (Vec3::new(0.0, 0.0, -1.0), CubeFace::NegZ),
        ];
        for policy in POLICIES {
            for (direction, face) in cases {
                let hit = exit_face(&Vec3::zeros(), &direction, SCALE, policy)
                    .unwrap_or_else(|| panic!("{policy:?} missed {face:?}"));
                assert_eq!(hit.face, face, "{policy:?}");
                assert_relative_eq!(hit.uv, Vec2::new(0.5, 0.5));
                assert_relative_eq!(hit.distance, SCALE);
            }
        }
    }

    #[test]
    fn test_face_center_round_trips_through_remap() {
        for face in CubeFace::ALL {
            let mut center = Vec3::zeros();
            center[face.axis()] = SCALE.copysign(if face.is_positive() { 1.0 } else { -1.0 });
            let uv = face_uv(face, &center, SCALE);
            assert_relative_eq!(uv, Vec2::new(0.5, 0.5));
            assert_relative_eq!(unmap_axis(uv.x, SCALE), 0.0);
            assert_relative_eq!(unmap_axis(uv.y, SCALE), 0.0);
        }
    }

    // Edge directions are left unnormalized so exit points land exactly on the edge

    #[test]
    fn test_edge_tie_break_nearest_hit_prefers_z() {
        let direction = Vec3::new(1.0, 0.0, 1.0);
        let hit = exit_face(&Vec3::zeros(), &direction, SCALE, SelectionPolicy::NearestHit).unwrap();
        assert_eq!(hit.face, CubeFace::PosZ);
        assert_relative_eq!(hit.uv.x, MAX_UV, epsilon = 1e-6);
        assert_relative_eq!(hit.uv.y, 0.5);

        let direction = Vec3::new(0.0, 1.0, -1.0);
        let hit = exit_face(&Vec3::zeros(), &direction, SCALE, SelectionPolicy::NearestHit).unwrap();
        assert_eq!(hit.face, CubeFace::NegZ);

        let direction = Vec3::new(-1.0, 1.0, 0.0);
        let hit = exit_face(&Vec3::zeros(), &direction, SCALE, SelectionPolicy::NearestHit).unwrap();
        assert_eq!(hit.face, CubeFace::NegX);
    }

    #[test]
    fn test_edge_tie_break_last_match() {
        // +z/+x edge: +z lands on u = 1.0 (excluded), +x lands on u = 0.0
        let direction = Vec3::new(1.0, 0.0, 1.0);
        let hit = exit_face(&Vec3::zeros(), &direction, SCALE, SelectionPolicy::LastMatch).unwrap();
        assert_eq!(hit.face, CubeFace::PosX);
        assert_relative_eq!(hit.uv, Vec2::new(0.0, 0.5));
        assert_relative_eq!(hit.distance, SCALE);
    }

    #[test]
    fn test_edge_result_is_stable_across_calls() {
        let direction = Vec3::new(1.0, 1.0, 0.0);
        for policy in POLICIES {
            let first = exit_face(&Vec3::zeros(), &direction, SCALE, policy);
            for _ in 0..8 {
                assert_eq!(exit_face(&Vec3::zeros(), &direction, SCALE, policy), first);
            }
        }
    }

    #[test]
    fn test_policies_agree_away_from_edges() {
        let direction = Vec3::new(0.0, 0.5, 1.0).normalize();

        // Near the ceiling the +y exit comes first; the +z plane hit is off its face
        let origin = Vec3::new(0.0, 4.0, 0.0);
        let nearest = exit_face(&origin, &direction, SCALE, SelectionPolicy::NearestHit).unwrap();
        let legacy = exit_face(&origin, &direction, SCALE, SelectionPolicy::LastMatch).unwrap();
        assert_eq!(nearest.face, CubeFace::PosY);
        assert_eq!(legacy.face, CubeFace::PosY);
        assert_relative_eq!(nearest.uv, Vec2::new(0.5, 0.3), epsilon = 1e-5);
        assert_relative_eq!(nearest.uv, legacy.uv, epsilon = 1e-5);

        // Lower down the +z exit is nearer
        let origin = Vec3::new(0.0, -4.0, 0.0);
        let nearest = exit_face(&origin, &direction, SCALE, SelectionPolicy::NearestHit).unwrap();
        let legacy = exit_face(&origin, &direction, SCALE, SelectionPolicy::LastMatch).unwrap();
        assert_eq!(nearest.face, CubeFace::PosZ);
        assert_eq!(legacy.face, CubeFace::PosZ);
        assert_relative_eq!(nearest.uv, Vec2::new(0.5, 0.35), epsilon = 1e-5);
    }

    #[test]
    fn test_negative_branch_of_last_match() {
        // Moving towards -x from inside: the +x parameter is negative, so the -x plane is used
        let origin = Vec3::new(2.0, 0.0, 0.0);
        let hit = exit_face(&origin, &Vec3::new(-1.0, 0.0, 0.0), SCALE, SelectionPolicy::LastMatch).unwrap();
        assert_eq!(hit.face, CubeFace::NegX);
        assert_relative_eq!(hit.distance, 7.0);
        assert_relative_eq!(hit.uv, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_zero_direction_is_transparent() {
        for policy in POLICIES {
            assert_eq!(exit_face(&Vec3::zeros(), &Vec3::zeros(), SCALE, policy), None);
        }
    }

    #[test]
    fn test_parallel_component_never_yields_nan() {
        let direction = Vec3::new(1e-9, 0.0, 1.0).normalize();
        for policy in POLICIES {
            let hit = exit_face(&Vec3::new(0.0, 0.0, 1.0), &direction, SCALE, policy).unwrap();
            assert_eq!(hit.face, CubeFace::PosZ);
            assert!(hit.uv.iter().all(|c| c.is_finite()));
            assert!(hit.distance.is_finite());
        }
    }

    #[test]
    fn test_degenerate_surface_or_camera() {
        let sampler = ReflectionSampler::new(SCALE, SelectionPolicy::NearestHit);
        assert_eq!(sampler.lookup(&Vec3::new(3.0, 3.0, 1.0), &Vec3::zeros()), None);
        let surface = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(sampler.lookup(&surface, &surface), None);
    }

    #[test]
    fn test_head_on_view_reflects_back_to_camera_side() {
        // Looking straight down -z at the +z pole reflects the ray back to +z
        let sampler = ReflectionSampler::new(SCALE, SelectionPolicy::NearestHit);
        let hit = sampler
            .lookup(&Vec3::new(0.0, 0.0, 4.0), &Vec3::new(0.0, 0.0, 1.25))
            .unwrap();
        assert_eq!(hit.face, CubeFace::PosZ);
        assert_relative_eq!(hit.uv, Vec2::new(0.5, 0.5));
    }

    /// Scale 5, camera (3, 3, 1), surface (0, 0, 4.9)
    #[test]
    fn test_reference_scenario() {
        let params = ReflectionParameters {
            scale: SCALE,
            camera_position: Vec3::new(3.0, 3.0, 1.0),
            surface_position: Vec3::new(0.0, 0.0, 4.9),
        };

        let length = (3.0_f32 * 3.0 + 3.0 * 3.0 + 3.9 * 3.9).sqrt();
        let reflected = reflected_direction(&params.camera_position, &params.surface_position).unwrap();
        assert_relative_eq!(reflected, Vec3::new(-3.0, -3.0, -3.9) / length, epsilon = 1e-6);

        // The ray reaches x = -5 and y = -5 at the same parameter: 5·|r| / 3.
        // x is evaluated before y, so the -x face wins.
        let hit = ReflectionSampler::new(1.0, SelectionPolicy::NearestHit)
            .lookup_with(&params)
            .unwrap();
        assert_eq!(hit.face, CubeFace::NegX);
        assert_relative_eq!(hit.distance, 5.0 * length / 3.0, epsilon = 1e-4);

        // Exit point (-5, -5, 4.9 - 6.5) -> uv = (u(z), u(y)) = (0.34, 0.0)
        let exit_z = 4.9 - 5.0 * 3.9 / 3.0;
        assert_relative_eq!(hit.uv.x, remap_axis(exit_z, SCALE), epsilon = 1e-5);
        assert_relative_eq!(hit.uv.x, 0.34, epsilon = 1e-5);
        assert_relative_eq!(hit.uv.y, 0.0, epsilon = 1e-5);
    }

    struct FaceColors;

    impl FaceTextureSource for FaceColors {
        fn sample(&self, face: CubeFace, uv: Vec2) -> [f32; 4] {
            [face.index() as f32 / 10.0, uv.x, uv.y, 1.0]
        }
    }

    #[test]
    fn test_shade_samples_hit_face_or_transparent() {
        let sampler = ReflectionSampler::new(SCALE, SelectionPolicy::NearestHit);
        let color = sampler.shade(&FaceColors, &Vec3::new(0.0, 0.0, 4.0), &Vec3::new(0.0, 0.0, 1.25));
        assert_relative_eq!(color[0], CubeFace::PosZ.index() as f32 / 10.0);
        assert_relative_eq!(color[1], 0.5);
        assert_relative_eq!(color[3], 1.0);

        let none = sampler.shade(&FaceColors, &Vec3::new(1.0, 0.0, 0.0), &Vec3::zeros());
        assert_eq!(none, [0.0; 4]);
    }
}
