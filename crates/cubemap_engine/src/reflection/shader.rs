//! GLSL reflection program and its shading descriptor
//!
//! The GPU program mirrors [`ReflectionSampler`] line for line. Besides the
//! backend-provided `Model`, `View`, `Projection` and `CameraPosition`
//! uniforms it reads two float uniforms and six named face samplers.

use crate::geometry::{CubeFace, FACE_COUNT};
use crate::render::backend::{CustomShading, RenderError, ShadingDescriptor, TextureHandle};

use super::{ReflectionSampler, SelectionPolicy};

/// Vertex stage of the reflection program
pub const VERTEX_SOURCE: &str = include_str!("../../shaders/reflection.vert");

/// Fragment stage of the reflection program
pub const FRAGMENT_SOURCE: &str = include_str!("../../shaders/reflection.frag");

/// Float uniform carrying the cube half-extent
pub const SCALE_UNIFORM: &str = "scale";

/// Float uniform selecting the policy: `1.0` nearest hit, `0.0` last match
pub const POLICY_UNIFORM: &str = "nearestHit";

const fn policy_flag(policy: SelectionPolicy) -> f32 {
    match policy {
        SelectionPolicy::NearestHit => 1.0,
        SelectionPolicy::LastMatch => 0.0,
    }
}

/// Build the custom shading that binds `textures` to the six face samplers
///
/// Every face must be bound exactly once.
pub fn reflection_shading(
    textures: &[(CubeFace, TextureHandle)],
    sampler: &ReflectionSampler,
) -> Result<ShadingDescriptor, RenderError> {
    let mut slots: [Option<TextureHandle>; FACE_COUNT] = [None; FACE_COUNT];
    for &(face, texture) in textures {
        if slots[face.index()].replace(texture).is_some() {
            return Err(RenderError::InvalidBinding(format!(
                "sampler '{}' bound twice",
                face.sampler_name()
            )));
        }
    }

    let bindings = CubeFace::ALL
        .into_iter()
        .map(|face| {
            slots[face.index()]
                .map(|texture| (face.sampler_name().to_string(), texture))
                .ok_or_else(|| RenderError::MissingBinding(face.sampler_name().to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ShadingDescriptor::Custom(CustomShading {
        vertex_source: VERTEX_SOURCE.to_string(),
        fragment_source: FRAGMENT_SOURCE.to_string(),
        textures: bindings,
        uniforms: vec![
            (SCALE_UNIFORM.to_string(), sampler.scale),
            (POLICY_UNIFORM.to_string(), policy_flag(sampler.policy)),
        ],
    }))
}

/// Recover the CPU sampler and face bindings from a reflection shading
///
/// Returns `None` for custom programs that are not the reflection program.
pub fn decode_reflection_shading(
    shading: &CustomShading,
) -> Option<(ReflectionSampler, Vec<(CubeFace, TextureHandle)>)> {
    if shading.fragment_source != FRAGMENT_SOURCE {
        return None;
    }
    let scale = shading.uniform(SCALE_UNIFORM)?;
    let policy = match shading.uniform(POLICY_UNIFORM) {
        Some(flag) if flag < 0.5 => SelectionPolicy::LastMatch,
        _ => SelectionPolicy::NearestHit,
    };
    let bindings = CubeFace::ALL
        .into_iter()
        .filter_map(|face| shading.texture(face.sampler_name()).map(|texture| (face, texture)))
        .collect();
    Some((ReflectionSampler::new(scale, policy), bindings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::{HandleMap, TypedHandle};

    fn handles() -> Vec<(CubeFace, TextureHandle)> {
        let mut keys = HandleMap::new();
        CubeFace::ALL
            .into_iter()
            .map(|face| (face, TypedHandle::new(keys.insert(()))))
            .collect()
    }

    #[test]
    fn test_sources_declare_every_binding() {
        for face in CubeFace::ALL {
            let declaration = format!("uniform sampler2D {};", face.sampler_name());
            assert!(FRAGMENT_SOURCE.contains(&declaration), "missing {declaration}");
        }
        assert!(FRAGMENT_SOURCE.contains("uniform float scale;"));
        assert!(FRAGMENT_SOURCE.contains("uniform float nearestHit;"));
        assert!(VERTEX_SOURCE.contains("out vec3 surfacePosition;"));
    }

    #[test]
    fn test_descriptor_round_trips_through_decode() {
        let textures = handles();
        let sampler = ReflectionSampler::new(5.0, SelectionPolicy::LastMatch);
        let ShadingDescriptor::Custom(custom) = reflection_shading(&textures, &sampler).unwrap() else {
            panic!("expected custom shading");
        };

        let (decoded, bindings) = decode_reflection_shading(&custom).unwrap();
        assert_eq!(decoded, sampler);
        assert_eq!(bindings, textures);
    }

    #[test]
    fn test_missing_and_duplicate_bindings() {
        let mut textures = handles();
        let sampler = ReflectionSampler::new(5.0, SelectionPolicy::NearestHit);

        textures.pop();
        assert!(matches!(
            reflection_shading(&textures, &sampler),
            Err(RenderError::MissingBinding(name)) if name == "back"
        ));

        textures.push(textures[0]);
        assert!(matches!(
            reflection_shading(&textures, &sampler),
            Err(RenderError::InvalidBinding(_))
        ));
    }
}
