use std::borrow::Cow;
use std::path::Path;

use wadport_types::DirectoryEntry;

use crate::pk3::{Pk3Error, Pk3File};
use crate::wad::{WadError, WadFile};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Wad(#[from] WadError),
    #[error(transparent)]
    Pk3(#[from] Pk3Error),
}

/// A resource container: a WAD, or a PK3 whose entries are treated as lumps.
pub enum Archive {
    Wad(WadFile),
    Pk3(Pk3File),
}

impl Archive {
    /// Open by extension (`.wad`, `.pk3`), falling back to sniffing the
    /// ZIP signature.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let data = std::fs::read(path).map_err(|source| ArchiveError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        let archive = match extension.as_deref() {
            Some("pk3" | "zip") => Self::Pk3(Pk3File::parse(data)?),
            Some("wad") => Self::Wad(WadFile::parse(data)?),
            _ => Self::from_bytes(data)?,
        };
        log::info!(
            "opened {} ({} lumps)",
            path.display(),
            archive.directory().len()
        );
        Ok(archive)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ArchiveError> {
        if data.starts_with(ZIP_MAGIC) {
            Ok(Self::Pk3(Pk3File::parse(data)?))
        } else {
            Ok(Self::Wad(WadFile::parse(data)?))
        }
    }

    pub fn directory(&self) -> &[DirectoryEntry] {
        match self {
            Self::Wad(wad) => wad.directory(),
            Self::Pk3(pk3) => pk3.directory(),
        }
    }

    /// Name and bytes of lump `index`.
    pub fn by_index(&mut self, index: usize) -> Result<(String, Cow<'_, [u8]>), ArchiveError> {
        let name = self
            .directory()
            .get(index)
            .map(|e| e.name.clone())
            .ok_or(WadError::NoSuchLump(index))?;
        let bytes = match self {
            Self::Wad(wad) => Cow::Borrowed(wad.lump(index)?),
            Self::Pk3(pk3) => Cow::Owned(pk3.lump(index)?),
        };
        Ok((name, bytes))
    }

    /// Bytes of the last lump called `name`; later lumps override earlier
    /// ones, as in the engine.
    pub fn lump_by_name(&mut self, name: &str) -> Result<Option<Vec<u8>>, ArchiveError> {
        let index = self
            .directory()
            .iter()
            .rposition(|e| e.name.eq_ignore_ascii_case(name));
        match index {
            Some(index) => Ok(Some(self.by_index(index)?.1.into_owned())),
            None => Ok(None),
        }
    }

    /// PK3 folder of entry `index`; WADs have none.
    pub fn namespace(&self, index: usize) -> Option<String> {
        match self {
            Self::Wad(_) => None,
            Self::Pk3(pk3) => pk3.namespace(index),
        }
    }
}
