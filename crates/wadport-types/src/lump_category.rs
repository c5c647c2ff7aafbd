use serde::Serialize;
use strum::{AsRefStr, Display, EnumCount, EnumIter};

/// Semantic category assigned to a lump by the classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumCount, Display, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum LumpCategory {
    Palette,
    Colormap,
    Endoom,
    PatchNames,
    Texture,
    /// Map marker; the geometry lumps of its block are not decoded.
    Map,
    Flat,
    Sprite,
    Patch,
    /// Picture-format lump found outside any marker range.
    Graphic,
    /// PNG file stored as a lump, exported unchanged.
    Png,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count() {
        assert_eq!(LumpCategory::COUNT, 12);
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(LumpCategory::PatchNames.to_string(), "patch_names");
        assert_eq!(LumpCategory::Png.as_ref(), "png");
    }
}
