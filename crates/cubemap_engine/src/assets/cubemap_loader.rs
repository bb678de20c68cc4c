//! Cubemap face set loading
//!
//! Two on-disk conventions are supported:
//! - six faces: `<root>/<Name>CubeMap/<Name><Face>.png`
//! - single texture: `<root>/<Name>.jpeg`, reused for every face

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::{AssetError, ImageData};
use crate::core::config::AssetConfig;
use crate::layout::FaceLabel;

/// Where the face images come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CubemapSource {
    /// One PNG per face inside `<Name>CubeMap/`
    #[default]
    SixFaces,
    /// A single JPEG shared by all six faces
    SingleImage,
}

/// Path of one face image in a six-face set
pub fn face_image_path(root: &Path, name: &str, label: FaceLabel) -> PathBuf {
    root.join(format!("{name}CubeMap"))
        .join(format!("{name}{}.png", label.file_suffix()))
}

/// Path of the shared image for the single-texture variant
pub fn single_image_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{name}.jpeg"))
}

/// Decoded images for all six face labels, as authored (not yet oriented)
#[derive(Debug, Clone)]
pub struct FaceImages {
    images: Vec<ImageData>,
}

impl FaceImages {
    /// Build the set by producing one image per label
    pub fn from_fn(mut image: impl FnMut(FaceLabel) -> ImageData) -> Self {
        Self {
            images: FaceLabel::ALL.iter().map(|&label| image(label)).collect(),
        }
    }

    /// Fallible variant of [`FaceImages::from_fn`]
    pub fn try_from_fn<E>(mut image: impl FnMut(FaceLabel) -> Result<ImageData, E>) -> Result<Self, E> {
        let images = FaceLabel::ALL
            .iter()
            .map(|&label| image(label))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Self { images })
    }

    /// Image authored for `label`
    pub fn get(&self, label: FaceLabel) -> &ImageData {
        &self.images[label.index()]
    }
}

/// Load every face image described by `config`
///
/// Fails with [`AssetError::NotFound`] on the first missing file.
pub fn load_face_images(config: &AssetConfig) -> Result<FaceImages, AssetError> {
    let root = Path::new(&config.asset_root);
    match config.source {
        CubemapSource::SixFaces => {
            log::info!("Loading six-face cubemap '{}' from {:?}", config.image_name, root);
            FaceImages::try_from_fn(|label| {
                ImageData::from_file(face_image_path(root, &config.image_name, label))
            })
        }
        CubemapSource::SingleImage => {
            log::info!("Loading single-texture cubemap '{}' from {:?}", config.image_name, root);
            let shared = ImageData::from_file(single_image_path(root, &config.image_name))?;
            Ok(FaceImages::from_fn(|_| shared.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cubemap_engine_{tag}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_face_path_convention() {
        let path = face_image_path(Path::new("assets"), "Field", FaceLabel::Top);
        assert_eq!(path, Path::new("assets").join("FieldCubeMap").join("FieldTop.png"));
        assert_eq!(single_image_path(Path::new("assets"), "Field"), Path::new("assets").join("Field.jpeg"));
    }

    #[test]
    fn test_load_six_faces() {
        let root = scratch_dir("six_faces");
        std::fs::create_dir_all(root.join("TestCubeMap")).unwrap();
        for (i, label) in FaceLabel::ALL.iter().enumerate() {
            ImageData::solid_color(2, 2, [i as u8, 0, 0, 255])
                .save_png(face_image_path(&root, "Test", *label))
                .unwrap();
        }

        let config = AssetConfig {
            asset_root: root.display().to_string(),
            image_name: "Test".to_string(),
            source: CubemapSource::SixFaces,
        };
        let images = load_face_images(&config).unwrap();
        std::fs::remove_dir_all(&root).ok();

        for (i, label) in FaceLabel::ALL.iter().enumerate() {
            assert_eq!(images.get(*label).pixel(0, 0), Some([i as u8, 0, 0, 255]));
        }
    }

    #[test]
    fn test_missing_face_is_not_found() {
        let root = scratch_dir("missing_face");
        let config = AssetConfig {
            asset_root: root.display().to_string(),
            image_name: "Absent".to_string(),
            source: CubemapSource::SixFaces,
        };
        let result = load_face_images(&config);
        std::fs::remove_dir_all(&root).ok();
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_missing_single_image_is_not_found() {
        let config = AssetConfig {
            asset_root: "does/not/exist".to_string(),
            image_name: "Field".to_string(),
            source: CubemapSource::SingleImage,
        };
        assert!(matches!(load_face_images(&config), Err(AssetError::NotFound(_))));
    }
}
