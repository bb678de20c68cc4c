//! Face index ↔ image label table and the named presets

use serde::{Deserialize, Serialize};

use super::orientation::{ImageOp, ImageTransform};
use crate::config::ConfigError;
use crate::geometry::face::DEFAULT_FACE_UV;
use crate::geometry::FACE_COUNT;

/// Top face texture coordinates: the unit quad mirrored horizontally
pub const TOP_FACE_UV: [f32; 8] = [
    1.0, 0.0,
    1.0, 1.0,
    0.0, 1.0,
    0.0, 0.0,
];

/// Bottom face texture coordinates: the unit quad with reversed winding
pub const BOTTOM_FACE_UV: [f32; 8] = [
    0.0, 1.0,
    0.0, 0.0,
    1.0, 0.0,
    1.0, 1.0,
];

/// Semantic name of an authored face image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceLabel {
    /// Front image
    Front,
    /// Back image
    Back,
    /// Left image
    Left,
    /// Right image
    Right,
    /// Top image
    Top,
    /// Bottom image
    Bottom,
}

impl FaceLabel {
    /// All labels in storage order
    pub const ALL: [Self; FACE_COUNT] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
    ];

    /// Dense index in `0..6`, matching [`FaceLabel::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Front => 0,
            Self::Back => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::Top => 4,
            Self::Bottom => 5,
        }
    }

    /// File name suffix, e.g. `Front` in `FieldFront.png`
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }

    /// Lowercase name, used for visual names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// How one extracted face is dressed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceEntry {
    /// Which authored image goes on this face
    pub label: FaceLabel,
    /// Orientation fix applied to the image before upload
    pub transform: ImageTransform,
    /// Texture coordinates for the face's 4 vertices
    pub texture_uv: [f32; 8],
}

impl FaceEntry {
    fn new(label: FaceLabel, ops: &[ImageOp], texture_uv: [f32; 8]) -> Self {
        Self {
            label,
            transform: ImageTransform::new(ops),
            texture_uv,
        }
    }
}

/// Named orientation conventions found in existing asset sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutPreset {
    /// Face 0 carries the left image; sides flipped vertically, top
    /// flipped horizontally, bottom flipped vertically
    #[default]
    Field,
    /// As `Field`, with extra flip/rotation on the poles
    RotatedPoles,
    /// Face 0 carries the front image, then right, back, left, top, bottom
    Sequential,
}

/// Configuration table: one [`FaceEntry`] per extracted face index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceLayout {
    /// Entry `i` describes extracted face `i`
    pub faces: Vec<FaceEntry>,
}

impl FaceLayout {
    /// Build the table for a preset
    pub fn from_preset(preset: LayoutPreset) -> Self {
        use FaceLabel::{Back, Bottom, Front, Left, Right, Top};
        use ImageOp::{FlipHorizontal, FlipVertical, Rotate90};

        let side = |label| FaceEntry::new(label, &[FlipVertical], DEFAULT_FACE_UV);
        let faces = match preset {
            LayoutPreset::Field => vec![
                side(Left),
                side(Front),
                side(Right),
                side(Back),
                FaceEntry::new(Top, &[FlipHorizontal], TOP_FACE_UV),
                FaceEntry::new(Bottom, &[FlipVertical], BOTTOM_FACE_UV),
            ],
            LayoutPreset::RotatedPoles => vec![
                side(Left),
                side(Front),
                side(Right),
                side(Back),
                FaceEntry::new(Top, &[FlipHorizontal, FlipVertical, Rotate90], TOP_FACE_UV),
                FaceEntry::new(Bottom, &[FlipVertical, Rotate90], BOTTOM_FACE_UV),
            ],
            LayoutPreset::Sequential => vec![
                side(Front),
                side(Right),
                side(Back),
                side(Left),
                FaceEntry::new(Top, &[FlipHorizontal], TOP_FACE_UV),
                FaceEntry::new(Bottom, &[FlipVertical], BOTTOM_FACE_UV),
            ],
        };
        Self { faces }
    }

    /// Check there is one entry per face and every label is used exactly once
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.faces.len() != FACE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "face layout needs {FACE_COUNT} entries, got {}",
                self.faces.len()
            )));
        }
        for label in FaceLabel::ALL {
            let uses = self.faces.iter().filter(|entry| entry.label == label).count();
            if uses != 1 {
                return Err(ConfigError::Invalid(format!(
                    "face label {label:?} used {uses} times in layout"
                )));
            }
        }
        Ok(())
    }

    /// Entry for extracted face `index`
    pub fn face(&self, index: usize) -> Option<&FaceEntry> {
        self.faces.get(index)
    }
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self::from_preset(LayoutPreset::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageData;

    const PRESETS: [LayoutPreset; 3] = [
        LayoutPreset::Field,
        LayoutPreset::RotatedPoles,
        LayoutPreset::Sequential,
    ];

    #[test]
    fn test_presets_are_valid() {
        for preset in PRESETS {
            FaceLayout::from_preset(preset).validate().unwrap();
        }
    }

    #[test]
    fn test_field_preset_label_order() {
        let labels: Vec<_> = FaceLayout::from_preset(LayoutPreset::Field)
            .faces
            .iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                FaceLabel::Left,
                FaceLabel::Front,
                FaceLabel::Right,
                FaceLabel::Back,
                FaceLabel::Top,
                FaceLabel::Bottom,
            ]
        );
    }

    #[test]
    fn test_uv_overrides_only_on_poles() {
        for preset in PRESETS {
            for entry in FaceLayout::from_preset(preset).faces {
                let expected = match entry.label {
                    FaceLabel::Top => TOP_FACE_UV,
                    FaceLabel::Bottom => BOTTOM_FACE_UV,
                    _ => DEFAULT_FACE_UV,
                };
                assert_eq!(entry.texture_uv, expected, "{preset:?} {:?}", entry.label);
            }
        }
    }

    /// Top-left marked pixel of a square image lands on the predicted corner
    #[test]
    fn test_marked_corner_lands_on_predicted_corner() {
        const MARK: [u8; 4] = [255, 255, 0, 255];
        let size = 4;
        let source = ImageData::from_fn(size, size, |x, y| if (x, y) == (0, 0) { MARK } else { [0, 0, 0, 255] });

        // Expected corner of the mark, per preset and label
        let expected = |preset: LayoutPreset, label: FaceLabel| -> (u32, u32) {
            match (preset, label) {
                (LayoutPreset::RotatedPoles, FaceLabel::Top) => (0, 3),
                (LayoutPreset::RotatedPoles, FaceLabel::Bottom) => (0, 0),
                (_, FaceLabel::Top) => (3, 0),
                _ => (0, 3),
            }
        };

        for preset in PRESETS {
            for entry in FaceLayout::from_preset(preset).faces {
                let oriented = entry.transform.apply(&source).unwrap();
                let corner = expected(preset, entry.label);
                assert_eq!(entry.transform.map_pixel(size, size, 0, 0), Some(corner));
                assert_eq!(
                    oriented.pixel(corner.0, corner.1),
                    Some(MARK),
                    "{preset:?} {:?}",
                    entry.label
                );
            }
        }
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let mut layout = FaceLayout::default();
        layout.faces[1].label = FaceLabel::Left;
        assert!(matches!(layout.validate(), Err(ConfigError::Invalid(_))));

        layout.faces.truncate(5);
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_layout_survives_toml() {
        let layout = FaceLayout::from_preset(LayoutPreset::RotatedPoles);
        let text = toml::to_string(&layout).unwrap();
        let parsed: FaceLayout = toml::from_str(&text).unwrap();
        assert_eq!(parsed, layout);
    }
}
