use serde::Serialize;

/// Flats are always 64×64.
pub const FLAT_SIZE: usize = 64;

/// A vertical run of opaque pixels within one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub column: u16,
    pub row_start: u16,
    /// Palette indices, top to bottom.
    pub pixels: Vec<u8>,
}

/// Sparse pixel model shared by pictures and flats. Pixels not covered by
/// any post are transparent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    pub width: u16,
    pub height: u16,
    pub left_offset: i16,
    pub top_offset: i16,
    pub posts: Vec<Post>,
}

impl Picture {
    pub fn has_offset(&self) -> bool {
        self.left_offset != 0 || self.top_offset != 0
    }

    /// Total number of opaque pixels in `column`.
    pub fn column_pixels(&self, column: u16) -> usize {
        self.posts
            .iter()
            .filter(|p| p.column == column)
            .map(|p| p.pixels.len())
            .sum()
    }
}
