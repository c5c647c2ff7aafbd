//! The conversion pipeline: archive in, UMAPINFO, CREDITS, interlevel
//! documents and PNGs out.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use wadport_image::{ExportError, write_png};
use wadport_types::{IntermissionScript, MapTable, OrdinalOrder, PALETTE_BYTES, Palette};

use crate::archive::{Archive, ArchiveError};
use crate::classifier::{Classifier, ImageLump, LumpTable};
use crate::interlevel_builder::build_interlevel;
use crate::interlevel_json::{Metadata, to_json};
use crate::intermission_parser::{EMPTY_PATCH, parse_intermission};
use crate::lump_cache::LumpCache;
use crate::mapinfo_parser::parse_mapinfo;
use crate::umapinfo::{render_credits, render_umapinfo};

pub const DEFAULT_MAPINFO_LUMP: &str = "MAPINFO";
pub const APPLICATION: &str = "wadport";
pub const UMAPINFO_FILE: &str = "UMAPINFO.txt";
pub const CREDITS_FILE: &str = "CREDITS.txt";
/// Scratch directory of the lump cache, inside the output directory.
pub const CACHE_DIR: &str = "_tmp";

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("{path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("{script}.json: {source}")]
    Json {
        script: String,
        source: serde_json::Error,
    },
    #[error("{image}.png: {source}")]
    Image { image: String, source: ExportError },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ConvertError + '_ {
    move |source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Settings of one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub archive: PathBuf,
    pub output: PathBuf,
    /// Name of the ported mod, used in the document comment.
    pub title: String,
    /// Author of the original mod.
    pub author: String,
    /// Author recorded in the document metadata.
    pub porter: String,
    /// Music lump played on the intermission screen.
    pub music: Option<String>,
    pub mapinfo_lump: String,
    pub ordinal_order: OrdinalOrder,
    pub save_graphics: bool,
    /// Keep raw text lumps under `<output>/_tmp` for later runs.
    pub cache: bool,
    /// PLAYPAL-format file used when the archive has no palette.
    pub fallback_palette: Option<PathBuf>,
    /// Fixed metadata timestamp; the current time when unset.
    pub timestamp: Option<String>,
}

impl ConvertOptions {
    pub fn new(archive: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let archive = archive.into();
        let title = archive
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            archive,
            output: output.into(),
            title,
            author: String::new(),
            porter: APPLICATION.to_string(),
            music: None,
            mapinfo_lump: DEFAULT_MAPINFO_LUMP.to_string(),
            ordinal_order: OrdinalOrder::default(),
            save_graphics: true,
            cache: false,
            fallback_palette: None,
            timestamp: None,
        }
    }
}

/// What a run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub maps: usize,
    /// Scripts converted, in output order.
    pub scripts: Vec<String>,
    pub images: Vec<String>,
    /// Referenced images that were not written: already on disk, or not
    /// in this archive.
    pub skipped_images: Vec<String>,
}

/// One conversion run. The archive is opened and classified on first use
/// only, so a warm cache and `save_graphics = false` never touch it.
pub struct Converter {
    options: ConvertOptions,
    cache: Option<LumpCache>,
    table: Option<LumpTable>,
    exported: HashSet<String>,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Result<Self, ConvertError> {
        std::fs::create_dir_all(&options.output).map_err(io_error(&options.output))?;
        let cache = if options.cache {
            let dir = options.output.join(CACHE_DIR);
            Some(LumpCache::open(&dir).map_err(io_error(&dir))?)
        } else {
            None
        };
        Ok(Self {
            options,
            cache,
            table: None,
            exported: HashSet::new(),
        })
    }

    pub fn run(mut self) -> Result<ConvertReport, ConvertError> {
        let mut report = ConvertReport::default();

        let maps = self.read_maps()?;
        report.maps = maps.len();
        let scripts = self.read_scripts(&maps)?;

        self.write_text(UMAPINFO_FILE, &render_umapinfo(&maps))?;
        self.write_text(CREDITS_FILE, &render_credits(&self.options.author))?;

        let timestamp = self.options.timestamp.clone().unwrap_or_else(|| {
            chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
        });
        let metadata = Metadata::new(
            &self.options.porter,
            APPLICATION,
            &timestamp,
            &self.options.title,
            &self.options.author,
        );
        for script in &scripts {
            let data = build_interlevel(script, &maps, self.options.music.as_deref());
            let json = to_json(&data, &metadata).map_err(|source| ConvertError::Json {
                script: script.name.clone(),
                source,
            })?;
            self.write_text(&format!("{}.json", script.name), &json)?;
            report.scripts.push(script.name.clone());
        }

        if self.options.save_graphics {
            for script in &scripts {
                let external = [
                    script.splat.as_deref(),
                    script.pointers.as_ref().map(|p| p.0.as_str()),
                    script.pointers.as_ref().map(|p| p.1.as_str()),
                    Some(EMPTY_PATCH),
                ];
                for image in script.images() {
                    let may_be_external = external.contains(&Some(image));
                    self.export_image(image, may_be_external, &mut report)?;
                }
                // Literal enter/exit pictures replace splats and pointers.
                let literals = script
                    .spots
                    .iter()
                    .filter_map(|(map, _)| maps.find(map))
                    .flat_map(|info| [info.enterpic.as_deref(), info.exitpic.as_deref()])
                    .flatten();
                for image in literals {
                    self.export_image(image, false, &mut report)?;
                }
            }
            if let Some(endpic) = maps.end_picture() {
                self.export_image(endpic, false, &mut report)?;
            }
        }

        log::info!(
            "{}: {} maps, {} scripts, {} images written",
            self.options.archive.display(),
            report.maps,
            report.scripts.len(),
            report.images.len()
        );
        Ok(report)
    }

    fn read_maps(&mut self) -> Result<MapTable, ConvertError> {
        let lump = self.options.mapinfo_lump.clone();
        match self.text_lump(&lump)? {
            Some(bytes) => Ok(parse_mapinfo(
                &String::from_utf8_lossy(&bytes),
                self.options.ordinal_order,
            )),
            None => {
                log::warn!("no {lump} lump, UMAPINFO will be empty");
                Ok(MapTable::default())
            }
        }
    }

    fn read_scripts(&mut self, maps: &MapTable) -> Result<Vec<IntermissionScript>, ConvertError> {
        let mut scripts = Vec::new();
        for name in maps.scripts() {
            let text = match self.text_lump(name)? {
                Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                None => {
                    log::warn!("intermission script {name} not found");
                    String::new()
                }
            };
            scripts.push(parse_intermission(name, &text));
        }
        Ok(scripts)
    }

    /// Raw bytes of an unclassified lump, through the cache when enabled.
    fn text_lump(&mut self, name: &str) -> Result<Option<Vec<u8>>, ConvertError> {
        let key = name.to_ascii_uppercase();
        if let Some(cache) = &self.cache {
            let cached = cache.get(&key).map_err(io_error(cache.dir()))?;
            if cached.is_some() {
                log::debug!("{key}: from cache");
                return Ok(cached);
            }
        }

        let bytes = self
            .table()?
            .unknown(&key)
            .filter(|b| !b.is_empty())
            .map(<[u8]>::to_vec);
        if let (Some(cache), Some(bytes)) = (&self.cache, &bytes) {
            cache.put(&key, bytes).map_err(io_error(cache.dir()))?;
        }
        Ok(bytes)
    }

    fn table(&mut self) -> Result<&LumpTable, ConvertError> {
        let table = match self.table.take() {
            Some(table) => table,
            None => {
                let mut archive = Archive::open(&self.options.archive)?;
                Classifier::new(self.fallback_palette()?).classify(&mut archive)
            }
        };
        Ok(self.table.insert(table))
    }

    fn fallback_palette(&self) -> Result<Option<Palette>, ConvertError> {
        let Some(path) = &self.options.fallback_palette else {
            return Ok(None);
        };
        let bytes = std::fs::read(path).map_err(io_error(path))?;
        let len = bytes.len().min(PALETTE_BYTES);
        Ok(Some(Palette::from_rgb_bytes(&bytes[..len])))
    }

    fn write_text(&self, file: &str, text: &str) -> Result<(), ConvertError> {
        let path = self.options.output.join(file);
        std::fs::write(&path, text).map_err(io_error(&path))?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    fn export_image(
        &mut self,
        name: &str,
        may_be_external: bool,
        report: &mut ConvertReport,
    ) -> Result<(), ConvertError> {
        if !self.exported.insert(name.to_string()) {
            return Ok(());
        }
        let path = self.options.output.join(format!("{name}.png"));
        if path.exists() {
            log::debug!("{}: already exported", path.display());
            report.skipped_images.push(name.to_string());
            return Ok(());
        }

        let table = self.table()?;
        let Some(image) = table.image(&name.to_ascii_uppercase()) else {
            if may_be_external {
                log::debug!("{name}: not in archive, expected in the IWAD");
            } else {
                log::warn!("{name}: no such image in archive");
            }
            report.skipped_images.push(name.to_string());
            return Ok(());
        };

        // A failed encode must not leave a partial file behind.
        let encoded;
        let bytes = match image {
            ImageLump::Png(bytes) => bytes.as_slice(),
            ImageLump::Picture { picture, .. } => {
                let grayscale;
                let palette = match table.palette() {
                    Some(palette) => palette,
                    None => {
                        grayscale = Palette::grayscale();
                        &grayscale
                    }
                };
                let mut out = Vec::new();
                write_png(&mut out, picture, palette).map_err(|source| ConvertError::Image {
                    image: name.to_string(),
                    source,
                })?;
                encoded = out;
                encoded.as_slice()
            }
        };
        std::fs::write(&path, bytes).map_err(io_error(&path))?;

        log::debug!("exported {name}");
        report.images.push(name.to_string());
        Ok(())
    }
}

/// Run one conversion.
pub fn convert(options: ConvertOptions) -> Result<ConvertReport, ConvertError> {
    Converter::new(options)?.run()
}
