pub mod picture;
pub mod png_export;
pub mod raster;
pub mod reader;

pub use picture::{decode_flat, decode_picture};
pub use png_export::{ExportError, write_png};
pub use raster::{RgbaImage, rasterize};
pub use reader::{ReadError, Reader};
