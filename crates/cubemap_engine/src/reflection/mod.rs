//! Cubemap reflection: the analytic sampler, its texture set and the GPU program

pub mod sampler;
pub mod shader;
pub mod texture_set;

pub use sampler::{
    exit_face, face_uv, reflected_direction, CubeHit, FaceTextureSource, ReflectionParameters,
    ReflectionSampler, SelectionPolicy, DIRECTION_EPSILON, MAX_UV,
};
pub use shader::{decode_reflection_shading, reflection_shading};
pub use texture_set::CubemapTextureSet;
