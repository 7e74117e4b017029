//! Where texture images come from.

use super::RasterImage;
use crate::error::{RasterError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads raster images by resolved texture path.
///
/// Must be `Sync`: the texture cache calls `load` from several threads
/// at once when loading a batch.
pub trait TextureSource: Sync {
    fn load(&self, path: &str) -> Result<RasterImage>;
}

/// In-memory textures.
#[derive(Debug, Default, Clone)]
pub struct MemoryTextureSource {
    textures: HashMap<String, RasterImage>,
}

impl MemoryTextureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a texture.
    pub fn add(&mut self, path: &str, image: RasterImage) {
        self.textures.insert(path.to_string(), image);
    }

    pub fn with(mut self, path: &str, image: RasterImage) -> Self {
        self.add(path, image);
        self
    }
}

impl TextureSource for MemoryTextureSource {
    fn load(&self, path: &str) -> Result<RasterImage> {
        self.textures
            .get(path)
            .cloned()
            .ok_or_else(|| RasterError::TextureLoad {
                path: path.to_string(),
                reason: "no such texture".to_string(),
            })
    }
}

/// Textures stored as `<root>/<path>.png` files.
#[derive(Debug, Clone)]
pub struct DirectoryTextureSource {
    root: PathBuf,
}

impl DirectoryTextureSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureSource for DirectoryTextureSource {
    fn load(&self, path: &str) -> Result<RasterImage> {
        let file = self.root.join(format!("{}.png", path));
        let data = std::fs::read(&file)?;
        Ok(RasterImage::from_encoded(&data)?)
    }
}
