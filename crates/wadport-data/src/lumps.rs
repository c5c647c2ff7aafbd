//! Decoders for the fixed-format system lumps.

use wadport_image::reader::{ReadError, Reader};
use wadport_types::{
    ENDOOM_COLS, ENDOOM_ROWS, Endoom, EndoomCell, PALETTE_BYTES, Palette, PatchPlacement,
    TextureDef,
};

use crate::endoom::cp437_to_char;

const COLORMAP_SIZE: usize = 256;
const TEXTURE_HEADER_SIZE: usize = 22;

/// `PLAYPAL`: consecutive 768-byte palettes.
pub fn read_palettes(lump: &[u8]) -> Vec<Palette> {
    lump.chunks(PALETTE_BYTES)
        .map(Palette::from_rgb_bytes)
        .filter(|p| !p.is_empty())
        .collect()
}

/// `COLORMAP`: consecutive 256-byte light level maps.
pub fn read_colormaps(lump: &[u8]) -> Vec<Vec<u8>> {
    lump.chunks(COLORMAP_SIZE).map(<[u8]>::to_vec).collect()
}

/// `PNAMES`: `count: i32` followed by `count` 8-byte names.
pub fn read_patch_names(lump: &[u8]) -> Result<Vec<String>, ReadError> {
    let mut r = Reader::new(lump);
    let count = r.read_i32()?.max(0) as usize;
    (0..count).map(|_| r.read_name8()).collect()
}

/// `TEXTURE1`/`TEXTURE2`: a count, an offset table, and at each offset a
/// 22-byte header followed by `patchcount` 10-byte placements.
pub fn read_textures(lump: &[u8]) -> Result<Vec<TextureDef>, ReadError> {
    let mut r = Reader::new(lump);
    let count = r.read_i32()?.max(0) as usize;
    let mut offsets = Vec::with_capacity(count.min(lump.len() / 4));
    for _ in 0..count {
        offsets.push(r.read_i32()?);
    }

    offsets
        .into_iter()
        .map(|offset| {
            let offset = usize::try_from(offset)
                .map_err(|_| ReadError::UnexpectedEof { offset: lump.len() })?;
            read_texture(&mut Reader::at(lump, offset))
        })
        .collect()
}

fn read_texture(r: &mut Reader<'_>) -> Result<TextureDef, ReadError> {
    let start = r.pos();
    let name = r.read_name8()?;
    let masked = r.read_i32()?;
    let width = r.read_i16()?;
    let height = r.read_i16()?;
    let column_directory = r.read_i32()?;
    let patch_count = r.read_i16()?.max(0) as usize;
    debug_assert_eq!(r.pos() - start, TEXTURE_HEADER_SIZE);

    let mut patches = Vec::with_capacity(patch_count);
    for _ in 0..patch_count {
        patches.push(PatchPlacement {
            origin_x: r.read_i16()?,
            origin_y: r.read_i16()?,
            patch: r.read_i16()?,
            step_dir: r.read_i16()?,
            colormap: r.read_i16()?,
        });
    }

    Ok(TextureDef {
        name,
        masked,
        width,
        height,
        column_directory,
        patches,
    })
}

/// `ENDOOM`: 80×25 cells of `(character, attribute)` byte pairs. Missing
/// trailing bytes read as blank cells.
pub fn read_endoom(lump: &[u8]) -> Endoom {
    let rows = (0..ENDOOM_ROWS)
        .map(|row| {
            (0..ENDOOM_COLS)
                .map(|col| {
                    let i = (row * ENDOOM_COLS + col) * 2;
                    let raw = lump.get(i).copied().unwrap_or(0);
                    let attr = lump.get(i + 1).copied().unwrap_or(0x07);
                    EndoomCell::from_attribute(raw, cp437_to_char(raw), attr)
                })
                .collect()
        })
        .collect();
    Endoom { rows }
}
