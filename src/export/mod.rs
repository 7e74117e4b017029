//! Output formats.
//!
//! PNG encoding of a rendered image, and a flat geometry export for
//! handing a model to an external (GPU) renderer.

pub mod png;
pub mod raw;

pub use png::encode_png;
pub use raw::{export_raw, RawModelData, RawTexture};
