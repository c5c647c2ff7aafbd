//! On-disk cache of raw lump bytes.
//!
//! Entries are files named after the lump inside a scratch directory.
//! There is no invalidation: delete the directory after the source archive
//! changes.

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LumpCache {
    dir: PathBuf,
}

impl LumpCache {
    /// Use `dir` as the cache, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        let file: String = name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '^' } else { c })
            .collect();
        self.dir.join(file)
    }

    /// Cached bytes of `name`, if present.
    pub fn get(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn put(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(self.path(name), bytes)
    }
}
