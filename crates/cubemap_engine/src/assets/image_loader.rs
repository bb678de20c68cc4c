//! Image loading utilities for texture data
//!
//! Provides PNG and JPEG loading plus the flip/rotate operations used to
//! orient cubemap faces before upload.

use std::path::Path;

use image::{imageops, RgbaImage};

use crate::assets::AssetError;
use crate::foundation::math::Vec2;

/// Loaded image data ready for GPU upload
///
/// Pixels are RGBA8, row-major, row 0 first. After upload, row 0 is sampled at
/// `v = 0` (the bottom of the texture in GL conventions). That is why face images
/// are flipped vertically before they are handed to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.to_path_buf()));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {e}", path_ref.display())))?;

        let image = Self::from_rgba_image(img.to_rgba8());
        log::info!("Loaded image {}x{} from {:?}", image.width, image.height, path_ref);
        Ok(image)
    }

    /// Wrap an RGBA buffer from the `image` crate
    pub fn from_rgba_image(rgba_img: RgbaImage) -> Self {
        let (width, height) = rgba_img.dimensions();
        Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        }
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Create an image by evaluating `pixel(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut pixel: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&pixel(x, y));
            }
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Copy into an `image` crate buffer
    pub fn to_rgba_image(&self) -> Result<RgbaImage, AssetError> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            AssetError::InvalidData(format!(
                "{} bytes do not describe a {}x{} RGBA image",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }

    /// RGBA value at pixel `(x, y)`, or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let texel = self.data.get(offset..offset + 4)?;
        Some([texel[0], texel[1], texel[2], texel[3]])
    }

    /// Mirror the image top-to-bottom
    pub fn flipped_vertical(&self) -> Result<Self, AssetError> {
        Ok(Self::from_rgba_image(imageops::flip_vertical(&self.to_rgba_image()?)))
    }

    /// Mirror the image left-to-right
    pub fn flipped_horizontal(&self) -> Result<Self, AssetError> {
        Ok(Self::from_rgba_image(imageops::flip_horizontal(&self.to_rgba_image()?)))
    }

    /// Rotate clockwise by `quarter_turns × 90°`
    pub fn rotated_clockwise(&self, quarter_turns: u8) -> Result<Self, AssetError> {
        let rgba = self.to_rgba_image()?;
        let rotated = match quarter_turns % 4 {
            0 => rgba,
            1 => imageops::rotate90(&rgba),
            2 => imageops::rotate180(&rgba),
            _ => imageops::rotate270(&rgba),
        };
        Ok(Self::from_rgba_image(rotated))
    }

    /// Nearest-texel lookup with GL texture conventions, normalized to `[0, 1]`
    ///
    /// `uv` is clamped to the image; `v = 0` addresses row 0.
    pub fn sample_nearest(&self, uv: Vec2) -> [f32; 4] {
        if self.width == 0 || self.height == 0 {
            return [0.0; 4];
        }
        let x = (uv.x * self.width as f32).floor().clamp(0.0, (self.width - 1) as f32) as u32;
        let y = (uv.y * self.height as f32).floor().clamp(0.0, (self.height - 1) as f32) as u32;
        self.pixel(x, y)
            .map_or([0.0; 4], |texel| texel.map(|channel| f32::from(channel) / 255.0))
    }

    /// Encode as PNG at `path`
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), AssetError> {
        let path_ref = path.as_ref();
        self.to_rgba_image()?
            .save_with_format(path_ref, image::ImageFormat::Png)
            .map_err(|e| AssetError::WriteFailed {
                path: path_ref.to_path_buf(),
                reason: e.to_string(),
            })?;
        log::info!("Wrote {}x{} image to {:?}", self.width, self.height, path_ref);
        Ok(())
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARK: [u8; 4] = [255, 0, 0, 255];
    const BLANK: [u8; 4] = [0, 0, 0, 255];

    /// 3x2 image with only the top-left pixel marked
    fn marked() -> ImageData {
        ImageData::from_fn(3, 2, |x, y| if (x, y) == (0, 0) { MARK } else { BLANK })
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.channels, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_flips_move_marked_corner() {
        let img = marked();
        assert_eq!(img.flipped_vertical().unwrap().pixel(0, 1), Some(MARK));
        assert_eq!(img.flipped_horizontal().unwrap().pixel(2, 0), Some(MARK));
    }

    #[test]
    fn test_rotations_swap_dimensions() {
        let img = marked();
        let quarter = img.rotated_clockwise(1).unwrap();
        assert_eq!((quarter.width, quarter.height), (2, 3));
        assert_eq!(quarter.pixel(1, 0), Some(MARK));

        let half = img.rotated_clockwise(2).unwrap();
        assert_eq!(half.pixel(2, 1), Some(MARK));

        let three = img.rotated_clockwise(3).unwrap();
        assert_eq!((three.width, three.height), (2, 3));
        assert_eq!(three.pixel(0, 2), Some(MARK));

        assert_eq!(img.rotated_clockwise(4).unwrap(), img);
    }

    #[test]
    fn test_sample_nearest_addresses_rows_from_v_zero() {
        let img = marked();
        assert_eq!(img.sample_nearest(Vec2::new(0.0, 0.0)), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(img.sample_nearest(Vec2::new(0.9, 0.9)), [0.0, 0.0, 0.0, 1.0]);
        // Clamped, not wrapped
        assert_eq!(img.sample_nearest(Vec2::new(-0.5, -3.0)), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_mismatched_buffer_is_invalid() {
        let img = ImageData { data: vec![0; 7], width: 2, height: 2, channels: 4 };
        assert!(matches!(img.to_rgba_image(), Err(AssetError::InvalidData(_))));
        assert_eq!(img.pixel(1, 1), None);
    }

    #[test]
    fn test_nonexistent_file() {
        let result = ImageData::from_file("nonexistent_file.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_png_round_trip_through_disk() {
        let path = std::env::temp_dir().join(format!("cubemap_engine_image_{}.png", std::process::id()));
        let img = marked();
        img.save_png(&path).unwrap();
        let loaded = ImageData::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, img);
    }
}
