use serde::Serialize;

/// Number of colors in one palette.
pub const PALETTE_COLORS: usize = 256;
/// Size of one palette inside a `PLAYPAL` lump.
pub const PALETTE_BYTES: usize = PALETTE_COLORS * 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// An ordered table of up to 256 colors indexed by pixel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette from packed RGB triples. A trailing partial triple is
    /// dropped.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Self {
        let colors = bytes
            .chunks_exact(3)
            .take(PALETTE_COLORS)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self { colors }
    }

    /// Linear grayscale ramp, used when neither the archive nor the
    /// configuration provides a palette.
    pub fn grayscale() -> Self {
        let colors = (0..PALETTE_COLORS)
            .map(|i| {
                let v = i as u8;
                Rgb::new(v, v, v)
            })
            .collect();
        Self { colors }
    }

    /// Color for a pixel index. Indices past the end of a short palette map
    /// to black.
    pub fn color(&self, index: u8) -> Rgb {
        self.colors.get(index as usize).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
