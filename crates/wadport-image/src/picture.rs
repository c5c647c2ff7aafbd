//! Decoders for the two Doom raster encodings.
//!
//! A picture is column-major run-length data: an 8-byte header, one
//! 32-bit offset per column, and per column a list of posts
//! `row_start, count, pad, pixels[count], pad` terminated by `0xFF`.
//! The format has no magic number, so decoding doubles as detection.

use wadport_types::{FLAT_SIZE, Picture, Post};

use crate::reader::Reader;

const PICTURE_HEADER_SIZE: usize = 8;
const END_OF_COLUMN: u8 = 0xFF;

/// Decode a picture lump, or `None` if the bytes are not a picture.
///
/// Rejected when the header declares a non-positive size, when a post
/// declares zero pixels, or when any offset points outside the lump.
/// The pixels decoded for one column never exceed the picture height.
pub fn decode_picture(lump: &[u8]) -> Option<Picture> {
    let mut r = Reader::new(lump);
    let width = r.read_i16().ok()?;
    let height = r.read_i16().ok()?;
    let left_offset = r.read_i16().ok()?;
    let top_offset = r.read_i16().ok()?;
    if width <= 0 || height <= 0 {
        return None;
    }

    let mut posts = Vec::new();
    for column in 0..width as u16 {
        r.seek(PICTURE_HEADER_SIZE + column as usize * 4);
        let offset = usize::try_from(r.read_i32().ok()?).ok()?;
        decode_column(lump, column, offset, height as usize, &mut posts)?;
    }

    Some(Picture {
        width: width as u16,
        height: height as u16,
        left_offset,
        top_offset,
        posts,
    })
}

fn decode_column(
    lump: &[u8],
    column: u16,
    offset: usize,
    height: usize,
    posts: &mut Vec<Post>,
) -> Option<()> {
    let mut r = Reader::at(lump, offset);
    let mut total = 0usize;

    loop {
        let row_start = r.read_u8().ok()?;
        if row_start == END_OF_COLUMN {
            return Some(());
        }
        let count = r.read_u8().ok()? as usize;
        if count == 0 {
            return None;
        }
        r.skip(1).ok()?;
        let pixels = r.read_bytes(count).ok()?;
        r.skip(1).ok()?;

        let room = height - total;
        let take = count.min(room);
        posts.push(Post {
            column,
            row_start: u16::from(row_start),
            pixels: pixels[..take].to_vec(),
        });
        total += take;

        // Malformed offset tables can make a column run forever.
        if take < count || total == height {
            return Some(());
        }
    }
}

/// Decode a 64×64 flat. Short lumps are padded with index 0, extra bytes
/// are ignored.
pub fn decode_flat(lump: &[u8]) -> Picture {
    let posts = (0..FLAT_SIZE)
        .map(|column| Post {
            column: column as u16,
            row_start: 0,
            pixels: (0..FLAT_SIZE)
                .map(|row| lump.get(row * FLAT_SIZE + column).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    Picture {
        width: FLAT_SIZE as u16,
        height: FLAT_SIZE as u16,
        left_offset: 0,
        top_offset: 0,
        posts,
    }
}
