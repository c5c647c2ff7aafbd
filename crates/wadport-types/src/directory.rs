use serde::Serialize;

/// Lump names are stored as fixed 8-byte fields, NUL or space padded.
pub const LUMP_NAME_LEN: usize = 8;

/// One record of a container directory.
///
/// The position of the entry in the directory is its identity; names are
/// not unique (map blocks repeat `THINGS`, `LINEDEFS`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// Byte offset of the lump. Always 0 for entries of a ZIP-based archive,
    /// whose bytes are fetched by extraction instead of slicing.
    pub file_pos: u32,
    pub size: u32,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, file_pos: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            file_pos,
            size,
        }
    }

    /// Byte range `[file_pos, file_pos + size)` inside the container.
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        let start = self.file_pos as usize;
        start..start + self.size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_range_spans_size() {
        let entry = DirectoryEntry::new("PLAYPAL", 12, 768);
        assert_eq!(entry.byte_range(), 12..780);
    }

    #[test]
    fn empty_marker_range() {
        let entry = DirectoryEntry::new("S_START", 400, 0);
        assert!(entry.byte_range().is_empty());
    }
}
