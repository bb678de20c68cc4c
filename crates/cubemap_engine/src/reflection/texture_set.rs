//! The six face textures bound to the reflection shader, keyed by cube face

use crate::assets::ImageData;
use crate::foundation::math::Vec2;
use crate::geometry::{CubeFace, FACE_COUNT};

use super::FaceTextureSource;

/// CPU-side copy of the face textures, one per [`CubeFace`]
///
/// Faces that were never bound sample as transparent black.
#[derive(Debug, Clone, Default)]
pub struct CubemapTextureSet {
    slots: [Option<ImageData>; FACE_COUNT],
}

impl CubemapTextureSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `image` to `face`, replacing any previous image
    pub fn bind(&mut self, face: CubeFace, image: ImageData) {
        self.slots[face.index()] = Some(image);
    }

    /// Image bound to `face`
    pub fn get(&self, face: CubeFace) -> Option<&ImageData> {
        self.slots[face.index()].as_ref()
    }

    /// Whether all six faces have an image
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Faces still missing an image
    pub fn missing(&self) -> Vec<CubeFace> {
        CubeFace::ALL
            .into_iter()
            .filter(|face| self.get(*face).is_none())
            .collect()
    }
}

impl FaceTextureSource for CubemapTextureSet {
    fn sample(&self, face: CubeFace, uv: Vec2) -> [f32; 4] {
        self.get(face).map_or([0.0; 4], |image| image.sample_nearest(uv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::ReflectionSampler;

    #[test]
    fn test_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CubemapTextureSet>();
        assert_send_sync::<ReflectionSampler>();
    }

    #[test]
    fn test_unbound_face_is_transparent() {
        let mut set = CubemapTextureSet::new();
        set.bind(CubeFace::PosZ, ImageData::solid_color(2, 2, [255, 0, 0, 255]));

        assert_eq!(set.sample(CubeFace::PosZ, Vec2::new(0.5, 0.5)), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(set.sample(CubeFace::NegZ, Vec2::new(0.5, 0.5)), [0.0; 4]);
        assert!(!set.is_complete());
        assert_eq!(set.missing().len(), 5);
    }

    #[test]
    fn test_rebinding_replaces_image() {
        let mut set = CubemapTextureSet::new();
        for face in CubeFace::ALL {
            set.bind(face, ImageData::solid_color(1, 1, [0, 0, 0, 255]));
        }
        set.bind(CubeFace::NegY, ImageData::solid_color(1, 1, [0, 255, 0, 255]));

        assert!(set.is_complete());
        assert!(set.missing().is_empty());
        assert_eq!(set.sample(CubeFace::NegY, Vec2::zeros()), [0.0, 1.0, 0.0, 1.0]);
    }
}
