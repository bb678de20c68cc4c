//! Face orientation normalization
//!
//! Six independently authored images only tile onto the cube once each one is
//! flipped/rotated and given the right texture coordinates. All of that is data:
//! a [`FaceLayout`] table indexed by extracted face, with one named preset per
//! known asset convention.

pub mod orientation;
pub mod face_layout;

pub use orientation::{ImageOp, ImageTransform};
pub use face_layout::{FaceLabel, FaceLayout, FaceEntry, LayoutPreset, BOTTOM_FACE_UV, TOP_FACE_UV};
