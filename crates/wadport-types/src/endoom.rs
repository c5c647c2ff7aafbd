use serde::Serialize;

pub const ENDOOM_COLS: usize = 80;
pub const ENDOOM_ROWS: usize = 25;

/// One character cell of the text-mode exit screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndoomCell {
    /// Raw code page 437 byte.
    pub raw: u8,
    /// `raw` mapped to Unicode.
    pub ch: char,
    /// Foreground color, 0..16.
    pub fg: u8,
    /// Background color, 0..8.
    pub bg: u8,
    pub blink: bool,
}

impl EndoomCell {
    /// Split a VGA attribute byte: low nibble foreground, bits 4-6
    /// background, bit 7 blink.
    pub fn from_attribute(raw: u8, ch: char, attr: u8) -> Self {
        Self {
            raw,
            ch,
            fg: attr & 0x0F,
            bg: (attr >> 4) & 0x07,
            blink: attr & 0x80 != 0,
        }
    }
}

/// 25 rows of 80 cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endoom {
    pub rows: Vec<Vec<EndoomCell>>,
}
