mod settings;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use log::LevelFilter;
use wadport_data::endoom::{render_ansi, render_plain};
use wadport_data::{Archive, Classifier, ConvertOptions, LumpTable, convert};
use wadport_types::OrdinalOrder;

use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// More log output; repeat for trace. `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Port the intermission screens and MAPINFO of an archive.
    Convert(ConvertArgs),
    /// Print the ENDOOM exit screen.
    Endoom {
        archive: PathBuf,
        /// Characters only, no ANSI colors.
        #[arg(long)]
        plain: bool,
    },
    /// List the lump directory with the category of each lump.
    Lumps { archive: PathBuf },
}

#[derive(Debug, clap::Args)]
struct ConvertArgs {
    /// WAD or PK3 to convert; without it, every `[[conversion]]` in the
    /// config file runs.
    archive: Option<PathBuf>,

    /// TOML file with defaults and `[[conversion]]` tables.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory [default: archive name without extension]
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Mod name used in the document comment [default: archive name]
    #[arg(long)]
    title: Option<String>,

    /// Author of the original mod.
    #[arg(long)]
    author: Option<String>,

    /// Author recorded in the document metadata.
    #[arg(long)]
    porter: Option<String>,

    /// Music lump of the intermission screen.
    #[arg(long)]
    music: Option<String>,

    /// Lump holding the map definitions.
    #[arg(long)]
    mapinfo_lump: Option<String>,

    /// How map ordinals are numbered: `declaration` or `sorted_by_token`.
    #[arg(long)]
    ordinal_order: Option<OrdinalOrder>,

    /// PLAYPAL file for archives without a palette.
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Skip PNG export.
    #[arg(long)]
    no_graphics: bool,

    /// Keep text lumps under `<out>/_tmp` and reuse them on later runs.
    #[arg(long)]
    cache: bool,
}

impl ConvertArgs {
    fn options(&self, settings: &Settings, archive: &Path) -> ConvertOptions {
        let output = self
            .out
            .clone()
            .unwrap_or_else(|| archive.with_extension(""));
        let mut options = settings.options_for(archive.to_path_buf(), output);
        if let Some(title) = &self.title {
            options.title = title.clone();
        }
        if let Some(author) = &self.author {
            options.author = author.clone();
        }
        if let Some(porter) = &self.porter {
            options.porter = porter.clone();
        }
        if let Some(music) = &self.music {
            options.music = Some(music.clone());
        }
        if let Some(lump) = &self.mapinfo_lump {
            options.mapinfo_lump = lump.clone();
        }
        if let Some(order) = self.ordinal_order {
            options.ordinal_order = order;
        }
        if let Some(palette) = &self.palette {
            options.fallback_palette = Some(palette.clone());
        }
        if self.no_graphics {
            options.save_graphics = false;
        }
        if self.cache {
            options.cache = true;
        }
        options
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Convert(args) => run_convert(&args),
        Command::Endoom { archive, plain } => run_endoom(&archive, plain),
        Command::Lumps { archive } => run_lumps(&archive),
    }
}

fn run_convert(args: &ConvertArgs) -> Result<()> {
    let settings = Settings::load(args.config.as_deref()).wrap_err("loading configuration")?;

    let runs = match &args.archive {
        Some(archive) => vec![args.options(&settings, archive)],
        None if settings.conversion.is_empty() => {
            bail!("nothing to convert: give an archive or a config file with [[conversion]] tables")
        }
        None => settings.conversions(),
    };

    for options in runs {
        let archive = options.archive.display().to_string();
        let output = options.output.display().to_string();
        let report = convert(options).wrap_err_with(|| format!("converting {archive}"))?;
        println!(
            "{archive} -> {output}: {} maps, {} scripts, {} images",
            report.maps,
            report.scripts.len(),
            report.images.len()
        );
    }
    Ok(())
}

fn classify(path: &Path) -> Result<(Archive, LumpTable)> {
    let mut archive =
        Archive::open(path).wrap_err_with(|| format!("opening {}", path.display()))?;
    let table = Classifier::new(None).classify(&mut archive);
    Ok((archive, table))
}

fn run_endoom(path: &Path, plain: bool) -> Result<()> {
    let (_, table) = classify(path)?;
    let endoom = table
        .endoom
        .as_ref()
        .ok_or_else(|| eyre!("{}: no ENDOOM lump", path.display()))?;
    if plain {
        print!("{}", render_plain(endoom));
    } else {
        print!("{}", render_ansi(endoom));
    }
    Ok(())
}

fn run_lumps(path: &Path) -> Result<()> {
    let (archive, table) = classify(path)?;
    for (index, entry) in archive.directory().iter().enumerate() {
        let category = table
            .entry_category(index)
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        println!("{index:5} {:<8} {:>9} {category}", entry.name, entry.size);
    }
    Ok(())
}
