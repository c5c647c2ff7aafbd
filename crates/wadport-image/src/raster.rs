use std::collections::HashMap;

use wadport_types::{Palette, Picture, Rgb};

/// True-color image with straight alpha, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

/// Palette-indexed version of an [`RgbaImage`]: `palette` holds only the
/// colors in use, `transparent` is the index reserved for transparency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<Rgb>,
    pub transparent: Option<u8>,
    pub indices: Vec<u8>,
}

impl RgbaImage {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn has_transparency(&self) -> bool {
        self.pixels.iter().any(|p| p[3] == 0)
    }

    /// Re-index the image. Colors keep their order of first appearance;
    /// the transparent entry, when needed, is index 0. Returns `None` when
    /// more than 256 entries would be needed.
    pub fn to_indexed(&self) -> Option<IndexedImage> {
        let transparent = self.has_transparency().then_some(0u8);
        let mut palette = Vec::new();
        if transparent.is_some() {
            palette.push(Rgb::default());
        }

        let mut lookup: HashMap<[u8; 3], u8> = HashMap::new();
        let mut indices = Vec::with_capacity(self.pixels.len());
        for &[r, g, b, a] in &self.pixels {
            if a == 0 {
                indices.push(0);
                continue;
            }
            let index = match lookup.get(&[r, g, b]) {
                Some(&index) => index,
                None => {
                    let index = u8::try_from(palette.len()).ok()?;
                    palette.push(Rgb::new(r, g, b));
                    lookup.insert([r, g, b], index);
                    index
                }
            };
            indices.push(index);
        }

        Some(IndexedImage {
            width: self.width,
            height: self.height,
            palette,
            transparent,
            indices,
        })
    }
}

/// Draw every post through `palette`; uncovered pixels stay transparent.
pub fn rasterize(picture: &Picture, palette: &Palette) -> RgbaImage {
    let width = u32::from(picture.width);
    let height = u32::from(picture.height);
    let mut pixels = vec![[0u8; 4]; (width * height) as usize];

    for post in &picture.posts {
        let x = u32::from(post.column);
        if x >= width {
            continue;
        }
        for (i, &index) in post.pixels.iter().enumerate() {
            let y = u32::from(post.row_start) + i as u32;
            if y >= height {
                break;
            }
            let Rgb { r, g, b } = palette.color(index);
            pixels[(y * width + x) as usize] = [r, g, b, 255];
        }
    }

    RgbaImage {
        width,
        height,
        pixels,
    }
}
