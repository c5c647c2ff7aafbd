pub mod directory;
pub mod endoom;
pub mod interlevel;
pub mod intermission;
pub mod lump_category;
pub mod mapinfo;
pub mod palette;
pub mod picture;
pub mod texture;

pub use directory::{DirectoryEntry, LUMP_NAME_LEN};
pub use endoom::{ENDOOM_COLS, ENDOOM_ROWS, Endoom, EndoomCell};
pub use interlevel::{
    Anim, Condition, ConditionCode, DurationKind, Frame, InterlevelData, Layer, TICS_PER_SECOND,
};
pub use intermission::{Guard, IntermissionScript, ScriptAnimation, Spot};
pub use lump_category::LumpCategory;
pub use mapinfo::{MapInfo, MapTable, OrdinalOrder};
pub use palette::{PALETTE_BYTES, PALETTE_COLORS, Palette, Rgb};
pub use picture::{FLAT_SIZE, Picture, Post};
pub use texture::{PatchPlacement, TextureDef};
