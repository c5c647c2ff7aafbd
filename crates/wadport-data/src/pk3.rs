//! Reader for ZIP-based PK3 archives.
//!
//! Lump names follow the GZDoom rule: the file name up to the first dot,
//! upper-cased and cut to 8 characters. The top-level folder is kept as
//! the entry's namespace.

use std::io::{Cursor, Read};

use wadport_types::{DirectoryEntry, LUMP_NAME_LEN};
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug, thiserror::Error)]
pub enum Pk3Error {
    #[error("invalid PK3 archive: {0}")]
    Zip(#[from] ZipError),
    #[error("reading PK3 entry '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("no lump with index {0}")]
    NoSuchLump(usize),
}

#[derive(Debug)]
struct Pk3Entry {
    zip_index: usize,
    path: String,
}

pub struct Pk3File {
    zip: ZipArchive<Cursor<Vec<u8>>>,
    entries: Vec<Pk3Entry>,
    directory: Vec<DirectoryEntry>,
}

impl Pk3File {
    pub fn parse(data: Vec<u8>) -> Result<Self, Pk3Error> {
        let mut zip = ZipArchive::new(Cursor::new(data))?;
        let mut entries = Vec::new();
        let mut directory = Vec::new();

        for zip_index in 0..zip.len() {
            let file = zip.by_index_raw(zip_index)?;
            if file.is_dir() {
                continue;
            }
            let path = file.name().to_string();
            let size = u32::try_from(file.size()).unwrap_or(u32::MAX);
            directory.push(DirectoryEntry::new(lump_name(&path), 0, size));
            entries.push(Pk3Entry { zip_index, path });
        }

        log::debug!("PK3 with {} files", directory.len());
        Ok(Self {
            zip,
            entries,
            directory,
        })
    }

    pub fn directory(&self) -> &[DirectoryEntry] {
        &self.directory
    }

    /// Top-level folder of entry `index` (`flats`, `sprites`, ...), lower-cased.
    pub fn namespace(&self, index: usize) -> Option<String> {
        let path = &self.entries.get(index)?.path;
        let (folder, _) = path.split_once('/')?;
        Some(folder.to_ascii_lowercase())
    }

    /// Extract entry `index`.
    pub fn lump(&mut self, index: usize) -> Result<Vec<u8>, Pk3Error> {
        let entry = self.entries.get(index).ok_or(Pk3Error::NoSuchLump(index))?;
        let mut file = self.zip.by_index(entry.zip_index)?;
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes).map_err(|source| Pk3Error::Read {
            path: entry.path.clone(),
            source,
        })?;
        Ok(bytes)
    }
}

/// `graphics/wimap0.png` → `WIMAP0`.
pub fn lump_name(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let stem = file_name.split('.').next().unwrap_or(file_name);
    stem.chars()
        .take(LUMP_NAME_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
}
