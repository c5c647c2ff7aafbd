//! Reader for the WAD container.
//!
//! Layout (little-endian):
//! - 4-byte magic, `IWAD` or `PWAD`
//! - `numlumps: i32`, `infotableofs: i32`
//! - at `infotableofs`, `numlumps` records of `filepos: i32, size: i32,
//!   name: [u8; 8]`

use wadport_image::reader::{ReadError, Reader};
use wadport_types::DirectoryEntry;

const HEADER_SIZE: usize = 12;
const DIRECTORY_RECORD_SIZE: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum WadError {
    #[error("not a WAD file: magic {0:?}")]
    BadMagic(String),
    #[error("truncated WAD header")]
    TruncatedHeader,
    #[error("negative {field} in WAD header: {value}")]
    NegativeHeaderField { field: &'static str, value: i32 },
    #[error("directory of {numlumps} lumps at offset {offset} runs past end of file ({len} bytes)")]
    DirectoryOutOfBounds {
        numlumps: usize,
        offset: usize,
        len: usize,
    },
    #[error("directory entry {index}: {source}")]
    BadEntry { index: usize, source: ReadError },
    #[error("lump {index} ('{name}') lies outside the file")]
    LumpOutOfBounds { index: usize, name: String },
    #[error("no lump with index {0}")]
    NoSuchLump(usize),
}

/// A WAD file held in memory.
#[derive(Debug, Clone)]
pub struct WadFile {
    data: Vec<u8>,
    directory: Vec<DirectoryEntry>,
}

impl WadFile {
    /// Parse header and directory. Lump bytes are sliced lazily by
    /// [`WadFile::lump`].
    pub fn parse(data: Vec<u8>) -> Result<Self, WadError> {
        if data.len() < HEADER_SIZE {
            return Err(WadError::TruncatedHeader);
        }
        let kind = match &data[..4] {
            b"IWAD" => "IWAD",
            b"PWAD" => "PWAD",
            other => return Err(WadError::BadMagic(String::from_utf8_lossy(other).into_owned())),
        };

        let mut r = Reader::at(&data, 4);
        let numlumps = header_field(&mut r, "numlumps")?;
        let offset = header_field(&mut r, "infotableofs")?;

        let dir_end = numlumps
            .checked_mul(DIRECTORY_RECORD_SIZE)
            .and_then(|size| size.checked_add(offset));
        if dir_end.is_none_or(|end| end > data.len()) {
            return Err(WadError::DirectoryOutOfBounds {
                numlumps,
                offset,
                len: data.len(),
            });
        }

        r.seek(offset);
        let mut directory = Vec::with_capacity(numlumps);
        for index in 0..numlumps {
            let entry = read_entry(&mut r).map_err(|source| WadError::BadEntry { index, source })?;
            directory.push(entry);
        }

        log::debug!("{kind} with {numlumps} lumps, directory at {offset}");
        Ok(Self {
            data,
            directory,
        })
    }

    pub fn directory(&self) -> &[DirectoryEntry] {
        &self.directory
    }

    /// Bytes `[filepos, filepos + size)` of lump `index`.
    pub fn lump(&self, index: usize) -> Result<&[u8], WadError> {
        let entry = self.directory.get(index).ok_or(WadError::NoSuchLump(index))?;
        self.data
            .get(entry.byte_range())
            .ok_or_else(|| WadError::LumpOutOfBounds {
                index,
                name: entry.name.clone(),
            })
    }
}

fn header_field(r: &mut Reader<'_>, field: &'static str) -> Result<usize, WadError> {
    let value = r.read_i32().map_err(|_| WadError::TruncatedHeader)?;
    usize::try_from(value).map_err(|_| WadError::NegativeHeaderField { field, value })
}

fn read_entry(r: &mut Reader<'_>) -> Result<DirectoryEntry, ReadError> {
    // Negative positions and sizes are reinterpreted; they then fail the
    // bounds check in `lump`.
    let file_pos = r.read_i32()? as u32;
    let size = r.read_i32()? as u32;
    let name = r.read_name8()?;
    Ok(DirectoryEntry::new(name, file_pos, size))
}
