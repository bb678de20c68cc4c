//! Asset loading: decoded images and cubemap face sets

pub mod image_loader;
pub mod cubemap_loader;

pub use image_loader::ImageData;
pub use cubemap_loader::{CubemapSource, FaceImages, load_face_images};

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading, decoding or writing images
#[derive(Error, Debug)]
pub enum AssetError {
    /// The image path does not exist
    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but the `image` crate could not decode it
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Pixel buffer length disagrees with the stated dimensions
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// Encoding or writing an output image failed
    #[error("Failed to write {}: {reason}", .path.display())]
    WriteFailed {
        /// Destination path
        path: PathBuf,
        /// Encoder or filesystem message
        reason: String,
    },
}
