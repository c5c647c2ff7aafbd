//! Single-pass lump classification.
//!
//! Every directory entry is visited once, in order. Marker ranges
//! (`S_START` .. `S_END`, ...) may nest; open ranges are kept on an explicit
//! stack of pending terminators. Outside ranges, [`rule_for`] decides what a
//! name is, first matching rule wins.

use std::collections::{HashMap, HashSet};

use wadport_image::{decode_flat, decode_picture};
use wadport_types::{Endoom, LumpCategory, Palette, Picture, TextureDef};

use crate::archive::Archive;
use crate::lumps;

/// Start marker → terminator. `FF_START` shares `F_END` with `F_START`.
pub const MARKERS: [(&str, &str); 11] = [
    ("S_START", "S_END"),
    ("F_START", "F_END"),
    ("F1_START", "F1_END"),
    ("F2_START", "F2_END"),
    ("P_START", "P_END"),
    ("P1_START", "P1_END"),
    ("P2_START", "P2_END"),
    ("P3_START", "P3_END"),
    ("SS_START", "SS_END"),
    ("PP_START", "PP_END"),
    ("FF_START", "F_END"),
];

/// Lumps that follow a map marker, in canonical order.
pub const GEOMETRY_LUMPS: [&str; 10] = [
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS", "REJECT",
    "BLOCKMAP",
];

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Sprite,
    Flat,
    /// Only entries named in `PNAMES` are decoded inside a patch range.
    Patch,
}

impl RangeKind {
    fn of_marker(start: &str) -> Self {
        match start.as_bytes().first() {
            Some(b'F') => Self::Flat,
            Some(b'P') => Self::Patch,
            _ => Self::Sprite,
        }
    }

    fn category(self) -> LumpCategory {
        match self {
            Self::Sprite => LumpCategory::Sprite,
            Self::Flat => LumpCategory::Flat,
            Self::Patch => LumpCategory::Patch,
        }
    }
}

/// What to do with a lump found outside any marker range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Palette,
    Colormap,
    Endoom,
    PatchNames,
    /// Known lump kinds that are deliberately not decoded (music, sounds,
    /// demos).
    Unparsed,
    /// PK3 entry whose folder fixes its kind.
    Namespaced(RangeKind),
    OpenRange(RangeKind, &'static str),
    Patch,
    MapBlock,
    Texture,
    Other,
}

/// Ordered name rules. `patch_names` is the `PNAMES` table read so far;
/// `namespace` is the PK3 folder of the entry, if any.
pub fn rule_for(name: &str, patch_names: &HashSet<String>, namespace: Option<&str>) -> Rule {
    match name {
        "PLAYPAL" => return Rule::Palette,
        "COLORMAP" => return Rule::Colormap,
        "ENDOOM" => return Rule::Endoom,
        "PNAMES" => return Rule::PatchNames,
        "GENMIDI" | "DMXGUS" => return Rule::Unparsed,
        _ => {}
    }
    if ["DP", "DS", "D_"].iter().any(|p| name.starts_with(p)) {
        return Rule::Unparsed;
    }
    match namespace {
        Some("flats") => return Rule::Namespaced(RangeKind::Flat),
        Some("sprites") => return Rule::Namespaced(RangeKind::Sprite),
        Some("patches") => return Rule::Namespaced(RangeKind::Patch),
        _ => {}
    }
    if let Some(end) = end_marker_for(name) {
        return Rule::OpenRange(RangeKind::of_marker(name), end);
    }
    if patch_names.contains(name) {
        return Rule::Patch;
    }
    if is_map_name(name) {
        return Rule::MapBlock;
    }
    if is_demo_name(name) {
        return Rule::Unparsed;
    }
    if name == "TEXTURE1" || name == "TEXTURE2" {
        return Rule::Texture;
    }
    Rule::Other
}

pub fn end_marker_for(start: &str) -> Option<&'static str> {
    MARKERS.iter().find(|(s, _)| *s == start).map(|(_, e)| *e)
}

fn is_end_marker(name: &str) -> bool {
    MARKERS.iter().any(|(_, e)| *e == name)
}

fn is_geometry(name: &str) -> bool {
    GEOMETRY_LUMPS.contains(&name)
}

/// `E[1-4]M[1-9]` or `MAP01`..`MAP99`.
pub fn is_map_name(name: &str) -> bool {
    match name.as_bytes() {
        [b'E', e, b'M', m] => (b'1'..=b'4').contains(e) && (b'1'..=b'9').contains(m),
        [b'M', b'A', b'P', a, b] => {
            a.is_ascii_digit() && b.is_ascii_digit() && !(*a == b'0' && *b == b'0')
        }
        _ => false,
    }
}

fn is_demo_name(name: &str) -> bool {
    matches!(name.as_bytes(), [b'D', b'E', b'M', b'O', d] if d.is_ascii_digit())
}

/// A decoded image lump.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageLump {
    Picture {
        category: LumpCategory,
        picture: Picture,
    },
    /// Raw PNG bytes, exported unchanged.
    Png(Vec<u8>),
}

/// Result of classification: decoded system lumps plus per-name images and
/// raw unclassified lumps.
#[derive(Debug, Default)]
pub struct LumpTable {
    pub palettes: Vec<Palette>,
    pub colormaps: Vec<Vec<u8>>,
    pub endoom: Option<Endoom>,
    pub patch_names: Vec<String>,
    pub textures: Vec<TextureDef>,
    pub maps: Vec<String>,
    images: HashMap<String, ImageLump>,
    unknown: HashMap<String, Vec<u8>>,
    categories: HashMap<String, LumpCategory>,
    entry_categories: Vec<Option<LumpCategory>>,
}

impl LumpTable {
    /// The palette used for rendering: the first one in the archive, or
    /// the fallback.
    pub fn palette(&self) -> Option<&Palette> {
        self.palettes.first()
    }

    pub fn category(&self, name: &str) -> Option<LumpCategory> {
        self.categories.get(name).copied()
    }

    /// Category of directory entry `index`; `None` for skipped entries.
    pub fn entry_category(&self, index: usize) -> Option<LumpCategory> {
        self.entry_categories.get(index).copied().flatten()
    }

    pub fn image(&self, name: &str) -> Option<&ImageLump> {
        self.images.get(name)
    }

    /// Raw bytes of an unclassified lump, such as a text lump.
    pub fn unknown(&self, name: &str) -> Option<&[u8]> {
        self.unknown.get(name).map(Vec::as_slice)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    #[cfg(test)]
    pub(crate) fn insert_image(&mut self, name: &str, image: ImageLump) {
        self.images.insert(name.to_string(), image);
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenRange {
    kind: RangeKind,
    terminator: &'static str,
}

/// Walks a directory once and fills a [`LumpTable`].
pub struct Classifier {
    table: LumpTable,
    patch_lookup: HashSet<String>,
    ranges: Vec<OpenRange>,
    fallback_palette: Option<Palette>,
}

impl Classifier {
    pub fn new(fallback_palette: Option<Palette>) -> Self {
        Self {
            table: LumpTable::default(),
            patch_lookup: HashSet::new(),
            ranges: Vec::new(),
            fallback_palette,
        }
    }

    pub fn classify(mut self, archive: &mut Archive) -> LumpTable {
        let len = archive.directory().len();
        self.table.entry_categories = vec![None; len];

        let mut index = 0;
        while index < len {
            index += self.visit(archive, index);
        }

        for range in &self.ranges {
            log::warn!("marker range ending at {} was never closed", range.terminator);
        }
        if self.table.palettes.is_empty() {
            let palette = self.fallback_palette.take().unwrap_or_else(|| {
                log::warn!("no PLAYPAL in archive and no fallback palette, using grayscale");
                Palette::grayscale()
            });
            self.table.palettes.push(palette);
        }

        log::info!(
            "classified {len} lumps: {} images, {} unknown, {} maps",
            self.table.image_count(),
            self.table.unknown.len(),
            self.table.maps.len()
        );
        self.table
    }

    /// Handle entry `index`; returns how many entries were consumed.
    fn visit(&mut self, archive: &mut Archive, index: usize) -> usize {
        let name = archive.directory()[index].name.clone();

        if let Some(range) = self.ranges.last().copied() {
            if range.terminator == name {
                self.ranges.pop();
            } else if let Some(terminator) = end_marker_for(&name) {
                self.open_range(&name, terminator);
            } else {
                self.read_range_entry(archive, index, &name, range.kind);
            }
            return 1;
        }

        if self.table.categories.contains_key(&name) || is_geometry(&name) || is_end_marker(&name) {
            return 1;
        }

        let namespace = archive.namespace(index);
        match rule_for(&name, &self.patch_lookup, namespace.as_deref()) {
            Rule::Palette => {
                if let Some(bytes) = read(archive, index) {
                    self.table.palettes.extend(lumps::read_palettes(&bytes));
                    self.assign(index, &name, LumpCategory::Palette);
                }
            }
            Rule::Colormap => {
                if let Some(bytes) = read(archive, index) {
                    self.table.colormaps.extend(lumps::read_colormaps(&bytes));
                    self.assign(index, &name, LumpCategory::Colormap);
                }
            }
            Rule::Endoom => {
                if let Some(bytes) = read(archive, index) {
                    self.table.endoom = Some(lumps::read_endoom(&bytes));
                    self.assign(index, &name, LumpCategory::Endoom);
                }
            }
            Rule::PatchNames => {
                let names = read(archive, index).map(|bytes| lumps::read_patch_names(&bytes));
                match names {
                    Some(Ok(names)) => {
                        self.patch_lookup.extend(names.iter().map(|n| n.to_ascii_uppercase()));
                        self.table.patch_names.extend(names);
                        self.assign(index, &name, LumpCategory::PatchNames);
                    }
                    Some(Err(e)) => log::warn!("PNAMES: {e}"),
                    None => {}
                }
            }
            Rule::Unparsed => log::trace!("{name}: not decoded"),
            Rule::Namespaced(kind) => self.decode_entry(archive, index, &name, kind),
            Rule::OpenRange(kind, terminator) => {
                log::debug!("{name}: {kind:?} range until {terminator}");
                self.open_range(&name, terminator);
            }
            Rule::Patch => {
                if let Some(bytes) = read(archive, index) {
                    match decode_picture(&bytes) {
                        Some(picture) => self.store_picture(index, &name, LumpCategory::Patch, picture),
                        None => self.store_other(index, &name, bytes.into_owned()),
                    }
                }
            }
            Rule::MapBlock => {
                self.table.maps.push(name.clone());
                self.assign(index, &name, LumpCategory::Map);
                let block = archive.directory()[index + 1..]
                    .iter()
                    .zip(GEOMETRY_LUMPS)
                    .take_while(|(entry, expected)| entry.name == *expected)
                    .count();
                if block < GEOMETRY_LUMPS.len() {
                    log::warn!("{name}: only {block} of {} map lumps", GEOMETRY_LUMPS.len());
                }
                return 1 + block;
            }
            Rule::Texture => {
                if let Some(bytes) = read(archive, index) {
                    match lumps::read_textures(&bytes) {
                        Ok(textures) => {
                            self.table.textures.extend(textures);
                            self.assign(index, &name, LumpCategory::Texture);
                        }
                        Err(e) => {
                            log::warn!("{name}: {e}");
                            self.store_other(index, &name, bytes.into_owned());
                        }
                    }
                }
            }
            Rule::Other => {
                if let Some(bytes) = read(archive, index) {
                    self.store_other(index, &name, bytes.into_owned());
                }
            }
        }
        1
    }

    fn open_range(&mut self, start: &str, terminator: &'static str) {
        self.ranges.push(OpenRange {
            kind: RangeKind::of_marker(start),
            terminator,
        });
    }

    fn read_range_entry(&mut self, archive: &mut Archive, index: usize, name: &str, kind: RangeKind) {
        if archive.directory()[index].size == 0 || self.table.categories.contains_key(name) {
            return;
        }
        if kind == RangeKind::Patch && !self.patch_lookup.contains(&name.to_ascii_uppercase()) {
            log::trace!("{name}: not in PNAMES, skipped");
            return;
        }
        self.decode_entry(archive, index, name, kind);
    }

    /// PNG passthrough, else the picture format of `kind`, else raw bytes.
    fn decode_entry(&mut self, archive: &mut Archive, index: usize, name: &str, kind: RangeKind) {
        let Some(bytes) = read(archive, index) else {
            return;
        };
        if bytes.starts_with(&PNG_SIGNATURE) {
            self.store_png(index, name, bytes.into_owned());
            return;
        }
        let picture = match kind {
            RangeKind::Flat => Some(decode_flat(&bytes)),
            _ => decode_picture(&bytes),
        };
        match picture {
            Some(picture) => self.store_picture(index, name, kind.category(), picture),
            None => self.store_other(index, name, bytes.into_owned()),
        }
    }

    /// PNG passthrough, then picture, then raw bytes.
    fn store_other(&mut self, index: usize, name: &str, bytes: Vec<u8>) {
        if bytes.starts_with(&PNG_SIGNATURE) {
            self.store_png(index, name, bytes);
        } else if let Some(picture) = decode_picture(&bytes) {
            self.store_picture(index, name, LumpCategory::Graphic, picture);
        } else {
            self.table.unknown.insert(name.to_string(), bytes);
            self.assign(index, name, LumpCategory::Unknown);
        }
    }

    fn store_picture(&mut self, index: usize, name: &str, category: LumpCategory, picture: Picture) {
        self.table
            .images
            .insert(name.to_string(), ImageLump::Picture { category, picture });
        self.assign(index, name, category);
    }

    fn store_png(&mut self, index: usize, name: &str, bytes: Vec<u8>) {
        self.table.images.insert(name.to_string(), ImageLump::Png(bytes));
        self.assign(index, name, LumpCategory::Png);
    }

    fn assign(&mut self, index: usize, name: &str, category: LumpCategory) {
        log::trace!("{name}: {category}");
        self.table.categories.insert(name.to_string(), category);
        self.table.entry_categories[index] = Some(category);
    }
}

fn read(archive: &mut Archive, index: usize) -> Option<std::borrow::Cow<'_, [u8]>> {
    match archive.by_index(index) {
        Ok((_, bytes)) => Some(bytes),
        Err(e) => {
            log::warn!("skipping lump {index}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lumps::tests::build_pnames;
    use crate::pk3::tests::build_pk3;
    use crate::wad::tests::build_wad;
    use wadport_types::PALETTE_BYTES;

    /// Single-column-table picture lump, one entry per column.
    fn build_picture(width: i16, height: i16, offsets: (i16, i16), columns: &[Vec<(u8, Vec<u8>)>]) -> Vec<u8> {
        let mut out = Vec::new();
        for v in [width, height, offsets.0, offsets.1] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        let table = out.len();
        out.resize(table + columns.len() * 4, 0);
        for (i, posts) in columns.iter().enumerate() {
            let offset = out.len() as i32;
            out[table + i * 4..table + i * 4 + 4].copy_from_slice(&offset.to_le_bytes());
            for (row, pixels) in posts {
                out.extend_from_slice(&[*row, pixels.len() as u8, 0]);
                out.extend_from_slice(pixels);
                out.push(0);
            }
            out.push(0xFF);
        }
        out
    }

    fn classify(lumps: &[(&str, &[u8])]) -> LumpTable {
        let mut archive = Archive::from_bytes(build_wad(lumps)).expect("wad");
        Classifier::new(None).classify(&mut archive)
    }

    fn sprite() -> Vec<u8> {
        build_picture(1, 2, (0, 0), &[vec![(0, vec![1, 2])]])
    }

    #[test]
    fn rule_order() {
        let none = HashSet::new();
        assert_eq!(rule_for("PLAYPAL", &none, None), Rule::Palette);
        assert_eq!(rule_for("D_E1M1", &none, None), Rule::Unparsed);
        assert_eq!(rule_for("DSPISTOL", &none, None), Rule::Unparsed);
        assert_eq!(rule_for("S_START", &none, None), Rule::OpenRange(RangeKind::Sprite, "S_END"));
        assert_eq!(rule_for("FF_START", &none, None), Rule::OpenRange(RangeKind::Flat, "F_END"));
        assert_eq!(rule_for("P1_START", &none, None), Rule::OpenRange(RangeKind::Patch, "P1_END"));
        assert_eq!(rule_for("E1M1", &none, None), Rule::MapBlock);
        assert_eq!(rule_for("MAP07", &none, None), Rule::MapBlock);
        assert_eq!(rule_for("DEMO1", &none, None), Rule::Unparsed);
        assert_eq!(rule_for("TEXTURE2", &none, None), Rule::Texture);
        assert_eq!(rule_for("WIMAP0", &none, None), Rule::Other);
        assert_eq!(rule_for("WIMAP0", &none, Some("flats")), Rule::Namespaced(RangeKind::Flat));

        let patches: HashSet<String> = ["WALL00_1".to_string()].into();
        assert_eq!(rule_for("WALL00_1", &patches, None), Rule::Patch);
    }

    #[test]
    fn map_names() {
        for name in ["E1M1", "E4M9", "MAP01", "MAP10", "MAP99"] {
            assert!(is_map_name(name), "{name}");
        }
        for name in ["E5M1", "E1M0", "MAP00", "MAP1", "MAP100", "MAPINFO", "E1M10"] {
            assert!(!is_map_name(name), "{name}");
        }
    }

    #[test]
    fn system_lumps() {
        let playpal = vec![5u8; PALETTE_BYTES * 3];
        let table = classify(&[("PLAYPAL", &playpal), ("COLORMAP", &[0u8; 256 * 34])]);
        assert_eq!(table.palettes.len(), 3);
        assert_eq!(table.colormaps.len(), 34);
        assert_eq!(table.category("PLAYPAL"), Some(LumpCategory::Palette));
    }

    #[test]
    fn fallback_palette_when_missing() {
        let table = classify(&[("WHATEVER", b"text")]);
        assert_eq!(table.palettes.len(), 1);
        assert_eq!(table.palette(), Some(&Palette::grayscale()));

        let mut archive = Archive::from_bytes(build_wad(&[("X", b"y")])).unwrap();
        let custom = Palette::from_rgb_bytes(&[1, 2, 3]);
        let table = Classifier::new(Some(custom.clone())).classify(&mut archive);
        assert_eq!(table.palette(), Some(&custom));
    }

    #[test]
    fn sprite_and_flat_ranges() {
        let sprite = sprite();
        let flat = vec![4u8; 4096];
        let table = classify(&[
            ("S_START", &[]),
            ("TROOA1", &sprite),
            ("S_END", &[]),
            ("F_START", &[]),
            ("F1_START", &[]),
            ("FLOOR0_1", &flat),
            ("F1_END", &[]),
            ("NUKAGE1", &flat),
            ("F_END", &[]),
        ]);
        assert_eq!(table.category("TROOA1"), Some(LumpCategory::Sprite));
        assert_eq!(table.category("FLOOR0_1"), Some(LumpCategory::Flat));
        assert_eq!(table.category("NUKAGE1"), Some(LumpCategory::Flat));
        assert_eq!(table.category("F1_START"), None);
        assert!(matches!(
            table.image("NUKAGE1"),
            Some(ImageLump::Picture { picture, .. }) if picture.width == 64
        ));
    }

    #[test]
    fn lumps_after_range_are_classified_normally() {
        let sprite = sprite();
        let table = classify(&[
            ("S_START", &[]),
            ("TROOA1", &sprite),
            ("S_END", &[]),
            ("TITLEPIC", &sprite),
        ]);
        assert_eq!(table.category("TITLEPIC"), Some(LumpCategory::Graphic));
    }

    #[test]
    fn patch_range_uses_pnames() {
        let patch = sprite();
        let pnames = build_pnames(&["WALL00_1"]);
        let table = classify(&[
            ("PNAMES", &pnames),
            ("P_START", &[]),
            ("WALL00_1", &patch),
            ("P_END", &[]),
            ("WALL00_1", &patch),
        ]);
        assert_eq!(table.patch_names, vec!["WALL00_1"]);
        assert_eq!(table.category("WALL00_1"), Some(LumpCategory::Patch));
        assert_eq!(table.entry_category(2), Some(LumpCategory::Patch));
        assert_eq!(table.entry_category(4), None);
    }

    #[test]
    fn patch_only_inside_range_is_found() {
        let patch = sprite();
        let pnames = build_pnames(&["WALL00_1"]);
        let table = classify(&[
            ("PNAMES", &pnames),
            ("P_START", &[]),
            ("WALL00_1", &patch),
            ("STRAY", &patch),
            ("P_END", &[]),
        ]);
        assert_eq!(table.category("WALL00_1"), Some(LumpCategory::Patch));
        assert_eq!(table.entry_category(2), Some(LumpCategory::Patch));
        assert!(matches!(table.image("WALL00_1"), Some(ImageLump::Picture { .. })));
        assert_eq!(table.entry_category(3), None);
        assert_eq!(table.image("STRAY"), None);
    }

    #[test]
    fn map_block_is_consumed() {
        let mut lumps: Vec<(&str, &[u8])> = vec![("MAP01", &[])];
        for name in GEOMETRY_LUMPS {
            lumps.push((name, b"\x01\x02"));
        }
        lumps.push(("MAPINFO", b"map MAP01 {}"));
        let table = classify(&lumps);
        assert_eq!(table.maps, vec!["MAP01"]);
        for index in 1..=10 {
            assert_eq!(table.entry_category(index), None);
        }
        assert_eq!(table.unknown("MAPINFO"), Some(b"map MAP01 {}".as_slice()));
    }

    #[test]
    fn short_map_block_stops_at_first_other_lump() {
        let table = classify(&[
            ("MAP01", &[]),
            ("THINGS", b"\x01"),
            ("LINEDEFS", b"\x02"),
            ("BEHAVIOR", b"\x03"),
            ("MAPINFO", b"map MAP01 {}"),
        ]);
        assert_eq!(table.maps, vec!["MAP01"]);
        assert_eq!(table.entry_category(1), None);
        assert_eq!(table.entry_category(2), None);
        assert_eq!(table.entry_category(3), Some(LumpCategory::Unknown));
        assert_eq!(table.unknown("MAPINFO"), Some(b"map MAP01 {}".as_slice()));
    }

    #[test]
    fn classification_is_idempotent() {
        let table = classify(&[("INTERA", b"first text"), ("INTERA", b"second text")]);
        assert_eq!(table.unknown("INTERA"), Some(b"first text".as_slice()));
        assert_eq!(table.entry_category(1), None);
    }

    #[test]
    fn stray_end_marker_ignored() {
        let table = classify(&[("S_END", &[]), ("F_END", &[]), ("TEXT", b"abc")]);
        assert_eq!(table.category("S_END"), None);
        assert_eq!(table.category("TEXT"), Some(LumpCategory::Unknown));
    }

    #[test]
    fn png_passthrough_and_bad_picture() {
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend_from_slice(b"rest");
        let bad = build_picture(1, 2, (0, 0), &[vec![(0, vec![])]]);
        let table = classify(&[("WIMAP0", &png), ("BROKEN", &bad)]);
        assert_eq!(table.image("WIMAP0"), Some(&ImageLump::Png(png.clone())));
        assert_eq!(table.category("BROKEN"), Some(LumpCategory::Unknown));
    }

    #[test]
    fn unclosed_range_swallows_rest() {
        let sprite = sprite();
        let table = classify(&[("S_START", &[]), ("TROOA1", &sprite), ("TEXT", b"abc")]);
        assert_eq!(table.category("TROOA1"), Some(LumpCategory::Sprite));
        assert_eq!(table.category("TEXT"), Some(LumpCategory::Unknown));
    }

    #[test]
    fn pk3_namespaces() {
        let flat = vec![1u8; 4096];
        let sprite = sprite();
        let data = build_pk3(&[
            ("flats/floor0_1.lmp", &flat),
            ("sprites/trooa1.lmp", &sprite),
            ("mapinfo.txt", b"map MAP01 {}"),
        ]);
        let mut archive = Archive::from_bytes(data).unwrap();
        let table = Classifier::new(None).classify(&mut archive);
        assert_eq!(table.category("FLOOR0_1"), Some(LumpCategory::Flat));
        assert_eq!(table.category("TROOA1"), Some(LumpCategory::Sprite));
        assert_eq!(table.unknown("MAPINFO"), Some(b"map MAP01 {}".as_slice()));
    }
}
