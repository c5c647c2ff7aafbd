use serde::Serialize;

/// One patch placed on a composite wall texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchPlacement {
    pub origin_x: i16,
    pub origin_y: i16,
    /// Index into the `PNAMES` table.
    pub patch: i16,
    pub step_dir: i16,
    pub colormap: i16,
}

/// A composite texture from a `TEXTURE1`/`TEXTURE2` lump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureDef {
    pub name: String,
    pub masked: i32,
    pub width: i16,
    pub height: i16,
    pub column_directory: i32,
    pub patches: Vec<PatchPlacement>,
}
