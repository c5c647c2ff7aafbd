//! PNG output for decoded pictures.
//!
//! Pictures are written as 8-bit indexed PNGs holding only the colors they
//! use, with a `tRNS` entry for transparency. Sprite offsets go into a
//! `grAb` chunk, which ZDoom-family ports read as the image origin.

use std::io::Write;

use png::chunk::ChunkType;
use wadport_types::{Palette, Picture};

use crate::raster::{IndexedImage, RgbaImage, rasterize};

const GRAB_CHUNK: ChunkType = ChunkType(*b"grAb");

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] png::EncodingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Rasterize `picture` through `palette` and encode it as PNG into `out`.
pub fn write_png<W: Write>(out: W, picture: &Picture, palette: &Palette) -> Result<(), ExportError> {
    let raster = rasterize(picture, palette);
    let grab = picture
        .has_offset()
        .then(|| (i32::from(picture.left_offset), i32::from(picture.top_offset)));

    match raster.to_indexed() {
        Some(indexed) => write_indexed(out, &indexed, grab),
        None => {
            log::debug!(
                "{}x{} picture needs more than 256 colors, writing RGBA",
                raster.width,
                raster.height
            );
            write_rgba(out, &raster, grab)
        }
    }
}

fn write_indexed<W: Write>(
    out: W,
    image: &IndexedImage,
    grab: Option<(i32, i32)>,
) -> Result<(), ExportError> {
    let mut encoder = png::Encoder::new(out, image.width, image.height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    let palette: Vec<u8> = image
        .palette
        .iter()
        .flat_map(|c| [c.r, c.g, c.b])
        .collect();
    encoder.set_palette(palette);
    if let Some(index) = image.transparent {
        // tRNS lists alpha for the leading palette entries; the rest stay opaque.
        let mut trns = vec![255u8; index as usize + 1];
        trns[index as usize] = 0;
        encoder.set_trns(trns);
    }

    let mut writer = encoder.write_header()?;
    if let Some(grab) = grab {
        writer.write_chunk(GRAB_CHUNK, &grab_payload(grab))?;
    }
    writer.write_image_data(&image.indices)?;
    writer.finish()?;
    Ok(())
}

fn write_rgba<W: Write>(
    out: W,
    image: &RgbaImage,
    grab: Option<(i32, i32)>,
) -> Result<(), ExportError> {
    let mut encoder = png::Encoder::new(out, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    if let Some(grab) = grab {
        writer.write_chunk(GRAB_CHUNK, &grab_payload(grab))?;
    }
    let data: Vec<u8> = image.pixels.iter().flatten().copied().collect();
    writer.write_image_data(&data)?;
    writer.finish()?;
    Ok(())
}

fn grab_payload((x, y): (i32, i32)) -> [u8; 8] {
    let mut payload = [0u8; 8];
    payload[..4].copy_from_slice(&x.to_be_bytes());
    payload[4..].copy_from_slice(&y.to_be_bytes());
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use wadport_types::Post;

    fn picture(offsets: (i16, i16)) -> Picture {
        Picture {
            width: 2,
            height: 2,
            left_offset: offsets.0,
            top_offset: offsets.1,
            posts: vec![Post {
                column: 0,
                row_start: 0,
                pixels: vec![1, 2],
            }],
        }
    }

    fn palette() -> Palette {
        Palette::from_rgb_bytes(&[0, 0, 0, 200, 10, 10, 10, 200, 10])
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn writes_png_signature_and_palette() {
        let mut out = Vec::new();
        write_png(&mut out, &picture((0, 0)), &palette()).expect("encode");
        assert_eq!(&out[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert!(contains(&out, b"PLTE"));
        assert!(contains(&out, b"tRNS"));
        assert!(!contains(&out, b"grAb"));
    }

    #[test]
    fn offset_goes_into_grab_chunk() {
        let mut out = Vec::new();
        write_png(&mut out, &picture((-3, 7)), &palette()).expect("encode");
        let mut chunk = b"grAb".to_vec();
        chunk.extend_from_slice(&(-3i32).to_be_bytes());
        chunk.extend_from_slice(&7i32.to_be_bytes());
        assert!(contains(&out, &chunk));
    }

    #[test]
    fn decodes_back_to_same_pixels() {
        let mut out = Vec::new();
        write_png(&mut out, &picture((0, 0)), &palette()).expect("encode");

        let mut decoder = png::Decoder::new(out.as_slice());
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder.read_info().expect("header");
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).expect("frame");
        assert_eq!(info.color_type, png::ColorType::Rgba);
        let px = &buf[..info.buffer_size()];
        assert_eq!(&px[0..4], &[200, 10, 10, 255]);
        assert_eq!(px[7], 0);
        assert_eq!(&px[8..12], &[10, 200, 10, 255]);
    }
}
