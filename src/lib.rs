//! # Block Raster
//!
//! A Rust library for rendering block model definitions to 2D images.
//!
//! ## Overview
//!
//! A definition is a tree of axis-aligned cuboids with per-face textures,
//! inherited through a parent chain. This library resolves the chain,
//! builds textured quads, applies the model's GUI transform, projects the
//! quads to screen space and rasterizes them into an RGBA8 buffer.
//!
//! ## Quick Start
//!
//! ```ignore
//! use block_raster::{DirectorySource, DirectoryTextureSource, RenderContext, encode_png};
//!
//! let mut ctx = RenderContext::new(
//!     DirectorySource::new("models"),
//!     DirectoryTextureSource::new("textures"),
//! );
//!
//! let image = ctx.render("block/stone")?;
//! std::fs::write("stone.png", encode_png(&image)?)?;
//! ```
//!
//! ## External Renderers
//!
//! [`RenderContext::build_model`] exposes the transformed faces, and
//! [`export_raw`] flattens them with their textures for a GPU renderer.

pub mod error;
pub mod types;
pub mod definition;
pub mod texture;
pub mod mesher;
pub mod render;
pub mod export;

// Re-export main types for convenience
pub use error::{RasterError, Result};
pub use types::{Direction, Transform, BoundingBox};
pub use definition::{Definition, DefinitionSource, DefinitionStore, DirectorySource, Element, FaceSpec, MemorySource};
pub use texture::{DirectoryTextureSource, MemoryTextureSource, RasterImage, TextureCache, TextureId, TextureSource};
pub use mesher::{Face, Model};
pub use render::{OutputRaster, Projection, RenderConfig, RenderContext};
pub use export::{encode_png, export_raw, RawModelData};

/// Render a model from on-disk definitions and textures with the given
/// configuration.
pub fn render_from_directories<P: AsRef<std::path::Path>, Q: AsRef<std::path::Path>>(
    models_root: P,
    textures_root: Q,
    id: &str,
    config: RenderConfig,
) -> Result<OutputRaster> {
    let mut ctx = RenderContext::with_config(
        DirectorySource::new(models_root),
        DirectoryTextureSource::new(textures_root),
        config,
    );
    ctx.render(id)
}
