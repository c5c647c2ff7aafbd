//! Batch configuration: a TOML file of `[[conversion]]` tables plus
//! top-level defaults, with `WADPORT_*` environment overrides for the
//! defaults.
//!
//! ```toml
//! author = "Someone"
//! music = "D_INTER"
//!
//! [[conversion]]
//! archive = "mods/intermission.pk3"
//! output = "out/intermission"
//! title = "Fancy Intermissions"
//! ordinal_order = "sorted_by_token"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use wadport_data::ConvertOptions;
use wadport_types::OrdinalOrder;

pub const ENV_PREFIX: &str = "WADPORT";

/// Values shared by every conversion unless the conversion sets its own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    pub porter: Option<String>,
    pub music: Option<String>,
    pub mapinfo_lump: Option<String>,
    pub ordinal_order: Option<OrdinalOrder>,
    pub save_graphics: Option<bool>,
    pub cache: Option<bool>,
    /// PLAYPAL-format file for archives without a palette.
    pub palette: Option<PathBuf>,
}

impl Defaults {
    /// Fill `options` from `self` where `overrides` leaves a value unset.
    fn apply(&self, overrides: &Defaults, options: &mut ConvertOptions) {
        if let Some(author) = overrides.author.as_ref().or(self.author.as_ref()) {
            options.author = author.clone();
        }
        if let Some(porter) = overrides.porter.as_ref().or(self.porter.as_ref()) {
            options.porter = porter.clone();
        }
        if let Some(lump) = overrides.mapinfo_lump.as_ref().or(self.mapinfo_lump.as_ref()) {
            options.mapinfo_lump = lump.clone();
        }
        if let Some(order) = overrides.ordinal_order.or(self.ordinal_order) {
            options.ordinal_order = order;
        }
        if let Some(save) = overrides.save_graphics.or(self.save_graphics) {
            options.save_graphics = save;
        }
        if let Some(cache) = overrides.cache.or(self.cache) {
            options.cache = cache;
        }
        options.music = overrides.music.clone().or_else(|| self.music.clone());
        options.fallback_palette = overrides.palette.clone().or_else(|| self.palette.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversion {
    pub archive: PathBuf,
    pub output: PathBuf,
    pub title: Option<String>,
    #[serde(flatten)]
    pub overrides: Defaults,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub defaults: Defaults,
    #[serde(default)]
    pub conversion: Vec<Conversion>,
}

impl Settings {
    /// Load `path` (if any) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Parse settings from TOML text, without the environment.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Options for an archive named on the command line.
    pub fn options_for(&self, archive: PathBuf, output: PathBuf) -> ConvertOptions {
        let mut options = ConvertOptions::new(archive, output);
        self.defaults.apply(&Defaults::default(), &mut options);
        options
    }

    /// Options for every `[[conversion]]` table, in file order.
    pub fn conversions(&self) -> Vec<ConvertOptions> {
        self.conversion
            .iter()
            .map(|conversion| {
                let mut options =
                    ConvertOptions::new(conversion.archive.clone(), conversion.output.clone());
                if let Some(title) = &conversion.title {
                    options.title = title.clone();
                }
                self.defaults.apply(&conversion.overrides, &mut options);
                options
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = r#"
author = "Someone"
music = "D_INTER"
cache = true

[[conversion]]
archive = "a.wad"
output = "out/a"

[[conversion]]
archive = "b.pk3"
output = "out/b"
title = "Bee"
author = "Someone Else"
ordinal_order = "sorted_by_token"
save_graphics = false
"#;

    #[test]
    fn batch_file() {
        let settings = Settings::from_toml(BATCH).expect("parse");
        assert_eq!(settings.defaults.author.as_deref(), Some("Someone"));
        assert_eq!(settings.conversion.len(), 2);

        let runs = settings.conversions();
        assert_eq!(runs[0].archive, PathBuf::from("a.wad"));
        assert_eq!(runs[0].title, "a");
        assert_eq!(runs[0].author, "Someone");
        assert_eq!(runs[0].music.as_deref(), Some("D_INTER"));
        assert!(runs[0].cache);
        assert!(runs[0].save_graphics);

        assert_eq!(runs[1].title, "Bee");
        assert_eq!(runs[1].author, "Someone Else");
        assert_eq!(runs[1].ordinal_order, OrdinalOrder::SortedByToken);
        assert!(!runs[1].save_graphics);
        assert!(runs[1].cache);
    }

    #[test]
    fn empty_file() {
        let settings = Settings::from_toml("").expect("parse");
        assert!(settings.conversion.is_empty());
        let options = settings.options_for("mod.wad".into(), "out".into());
        assert_eq!(options, ConvertOptions::new("mod.wad", "out"));
    }
}
