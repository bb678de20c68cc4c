//! Per-face image transforms

use serde::{Deserialize, Serialize};

use crate::assets::{AssetError, ImageData};

/// A single image operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOp {
    /// Mirror left-to-right
    FlipHorizontal,
    /// Mirror top-to-bottom
    FlipVertical,
    /// Rotate 90° clockwise
    Rotate90,
    /// Rotate 180°
    Rotate180,
    /// Rotate 270° clockwise
    Rotate270,
}

impl ImageOp {
    /// Apply to an image
    pub fn apply(self, image: &ImageData) -> Result<ImageData, AssetError> {
        match self {
            Self::FlipHorizontal => image.flipped_horizontal(),
            Self::FlipVertical => image.flipped_vertical(),
            Self::Rotate90 => image.rotated_clockwise(1),
            Self::Rotate180 => image.rotated_clockwise(2),
            Self::Rotate270 => image.rotated_clockwise(3),
        }
    }

    /// Where pixel `(x, y)` of a `width × height` image ends up
    ///
    /// Returns the new dimensions and the new pixel position, or `None` when
    /// `(x, y)` is not inside the image.
    pub fn map_pixel(self, width: u32, height: u32, x: u32, y: u32) -> Option<((u32, u32), (u32, u32))> {
        let mirror_x = width.checked_sub(1)?.checked_sub(x)?;
        let mirror_y = height.checked_sub(1)?.checked_sub(y)?;
        Some(match self {
            Self::FlipHorizontal => ((width, height), (mirror_x, y)),
            Self::FlipVertical => ((width, height), (x, mirror_y)),
            Self::Rotate90 => ((height, width), (mirror_y, x)),
            Self::Rotate180 => ((width, height), (mirror_x, mirror_y)),
            Self::Rotate270 => ((height, width), (y, mirror_x)),
        })
    }
}

/// Ordered list of operations applied to one face image
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Operations, applied first to last
    pub ops: Vec<ImageOp>,
}

impl ImageTransform {
    /// Transform from a list of operations
    pub fn new(ops: impl Into<Vec<ImageOp>>) -> Self {
        Self { ops: ops.into() }
    }

    /// Apply every operation in order
    pub fn apply(&self, image: &ImageData) -> Result<ImageData, AssetError> {
        self.ops
            .iter()
            .try_fold(image.clone(), |current, op| op.apply(&current))
    }

    /// Predicted destination of pixel `(x, y)` after the whole sequence
    pub fn map_pixel(&self, width: u32, height: u32, x: u32, y: u32) -> Option<(u32, u32)> {
        if x >= width || y >= height {
            return None;
        }
        let mut dims = (width, height);
        let mut pos = (x, y);
        for op in &self.ops {
            (dims, pos) = op.map_pixel(dims.0, dims.1, pos.0, pos.1)?;
        }
        Some(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARK: [u8; 4] = [0, 255, 0, 255];

    fn marked(width: u32, height: u32, at: (u32, u32)) -> ImageData {
        ImageData::from_fn(width, height, |x, y| if (x, y) == at { MARK } else { [0, 0, 0, 255] })
    }

    #[test]
    fn test_map_pixel_agrees_with_image_ops() {
        let ops = [
            ImageOp::FlipHorizontal,
            ImageOp::FlipVertical,
            ImageOp::Rotate90,
            ImageOp::Rotate180,
            ImageOp::Rotate270,
        ];
        for op in ops {
            for at in [(0, 0), (3, 0), (1, 2)] {
                let image = marked(4, 3, at);
                let out = op.apply(&image).unwrap();
                let ((w, h), (x, y)) = op.map_pixel(4, 3, at.0, at.1).unwrap();
                assert_eq!((out.width, out.height), (w, h), "{op:?}");
                assert_eq!(out.pixel(x, y), Some(MARK), "{op:?} moved {at:?} elsewhere");
            }
        }
    }

    #[test]
    fn test_sequence_applies_in_order() {
        // Flip then rotate differs from rotate then flip on a non-square image
        let image = marked(4, 2, (0, 0));
        let flip_rotate = ImageTransform::new([ImageOp::FlipVertical, ImageOp::Rotate90]);
        let out = flip_rotate.apply(&image).unwrap();
        assert_eq!(flip_rotate.map_pixel(4, 2, 0, 0), Some((0, 0)));
        assert_eq!(out.pixel(0, 0), Some(MARK));

        let rotate_flip = ImageTransform::new([ImageOp::Rotate90, ImageOp::FlipVertical]);
        assert_eq!(rotate_flip.map_pixel(4, 2, 0, 0), Some((1, 3)));
    }

    #[test]
    fn test_pixel_outside_image_has_no_destination() {
        assert_eq!(ImageOp::FlipHorizontal.map_pixel(0, 0, 0, 0), None);
        assert_eq!(ImageOp::Rotate90.map_pixel(4, 3, 1, 3), None);
        assert_eq!(ImageOp::Rotate270.map_pixel(4, 3, 4, 0), None);

        let transform = ImageTransform::new([ImageOp::FlipVertical]);
        assert_eq!(transform.map_pixel(2, 2, 5, 0), None);
        assert_eq!(ImageTransform::default().map_pixel(0, 4, 0, 0), None);
        assert_eq!(ImageTransform::default().map_pixel(4, 4, 3, 3), Some((3, 3)));
    }

    #[test]
    fn test_empty_transform_is_identity() {
        let image = marked(2, 2, (1, 0));
        assert_eq!(ImageTransform::default().apply(&image).unwrap(), image);
    }
}
