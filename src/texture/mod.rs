//! Texture images and the texture cache.
//!
//! Face texture references are resolved through the definition's texture
//! map to literal paths, and each distinct path is loaded exactly once.

pub mod cache;
pub mod raster;
pub mod source;

pub use raster::{buffer_len, RasterImage};
pub use cache::{resolve, resolve_reference, TextureCache, TextureId, ALIAS_MARKER};
pub use source::{DirectoryTextureSource, MemoryTextureSource, TextureSource};
