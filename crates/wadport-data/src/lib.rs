pub mod archive;
pub mod classifier;
pub mod converter;
pub mod endoom;
pub mod interlevel_builder;
pub mod interlevel_json;
pub mod intermission_parser;
pub mod lump_cache;
pub mod lumps;
pub mod mapinfo_parser;
pub mod pk3;
pub mod umapinfo;
pub mod wad;

pub use archive::{Archive, ArchiveError};
pub use classifier::{Classifier, ImageLump, LumpTable};
pub use converter::{ConvertError, ConvertOptions, ConvertReport, Converter, convert};
pub use interlevel_builder::build_interlevel;
pub use interlevel_json::{Metadata, to_json};
pub use intermission_parser::parse_intermission;
pub use mapinfo_parser::parse_mapinfo;
pub use umapinfo::{render_credits, render_umapinfo};
