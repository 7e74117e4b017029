//! Texture reference resolution and the content-addressed image cache.

use super::{RasterImage, TextureSource};
use crate::error::{RasterError, Result};
use crate::types::strip_namespace;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Marker prefix for texture aliases ("#side").
pub const ALIAS_MARKER: char = '#';

/// Index of an image owned by a [`TextureCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(usize);

/// Resolve a texture name through its alias chain to a literal path.
///
/// `textures["a"] = "#b"`, `textures["b"] = "block/stone"` resolves "a" to
/// "block/stone". A name recurring in the chain is a cycle.
pub fn resolve(name: &str, textures: &BTreeMap<String, String>) -> Result<String> {
    let mut visited = HashSet::new();
    let mut current = name;

    loop {
        if !visited.insert(current) {
            return Err(RasterError::TextureAliasCycle(current.to_string()));
        }

        let value = textures
            .get(current)
            .ok_or_else(|| RasterError::UnresolvedTexture(current.to_string()))?;

        match value.strip_prefix(ALIAS_MARKER) {
            Some(next) => current = next,
            None => return Ok(strip_namespace(value).to_string()),
        }
    }
}

/// Resolve a face texture reference through the texture map.
///
/// "#name" must be a key of the map. A bare name is looked up as a key too,
/// and only taken as a literal path when the map has no such entry.
pub fn resolve_reference(reference: &str, textures: &BTreeMap<String, String>) -> Result<String> {
    match reference.strip_prefix(ALIAS_MARKER) {
        Some(name) => resolve(name, textures),
        None if textures.contains_key(reference) => resolve(reference, textures),
        None => Ok(strip_namespace(reference).to_string()),
    }
}

/// Owns every loaded texture image, one entry per distinct resolved path.
#[derive(Debug, Default)]
pub struct TextureCache {
    images: Vec<RasterImage>,
    paths: Vec<String>,
    index: HashMap<String, TextureId>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the id of an already-loaded path.
    pub fn id(&self, path: &str) -> Option<TextureId> {
        self.index.get(path).copied()
    }

    /// Get an image by id.
    pub fn get(&self, id: TextureId) -> &RasterImage {
        &self.images[id.0]
    }

    /// Get the resolved path an id was loaded from.
    pub fn path(&self, id: TextureId) -> &str {
        &self.paths[id.0]
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Get the total number of cached images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Insert an already-decoded image, replacing nothing if present.
    pub fn insert(&mut self, path: &str, image: RasterImage) -> TextureId {
        if let Some(id) = self.id(path) {
            return id;
        }
        let id = TextureId(self.images.len());
        self.images.push(image);
        self.paths.push(path.to_string());
        self.index.insert(path.to_string(), id);
        id
    }

    /// Return the cached image id, loading and inserting it on a miss.
    pub fn load(&mut self, path: &str, source: &dyn TextureSource) -> Result<TextureId> {
        if let Some(id) = self.id(path) {
            return Ok(id);
        }
        let image = load_one(path, source)?;
        Ok(self.insert(path, image))
    }

    /// Load every uncached path in the batch concurrently and wait for all
    /// of them. Any failure fails the whole batch and nothing from it is
    /// inserted.
    pub fn load_batch<'p>(
        &mut self,
        paths: impl IntoIterator<Item = &'p str>,
        source: &dyn TextureSource,
    ) -> Result<()> {
        let pending: BTreeSet<&str> = paths
            .into_iter()
            .filter(|path| !self.contains(path))
            .collect();

        if pending.is_empty() {
            return Ok(());
        }

        log::debug!("Loading {} textures", pending.len());

        let results: Vec<(&str, Result<RasterImage>)> = std::thread::scope(|scope| {
            let handles: Vec<_> = pending
                .iter()
                .map(|&path| (path, scope.spawn(move || load_one(path, source))))
                .collect();

            handles
                .into_iter()
                .map(|(path, handle)| {
                    let result = handle.join().unwrap_or_else(|_| {
                        Err(RasterError::TextureLoad {
                            path: path.to_string(),
                            reason: "loader thread panicked".to_string(),
                        })
                    });
                    (path, result)
                })
                .collect()
        });

        // Paths are in sorted order, so the first error is deterministic.
        let mut loaded = Vec::with_capacity(results.len());
        for (path, result) in results {
            loaded.push((path, result?));
        }

        for (path, image) in loaded {
            self.insert(path, image);
        }

        Ok(())
    }
}

fn load_one(path: &str, source: &dyn TextureSource) -> Result<RasterImage> {
    log::trace!("Loading texture {}", path);
    source.load(path).map_err(|e| match e {
        RasterError::TextureLoad { .. } => e,
        other => RasterError::TextureLoad {
            path: path.to_string(),
            reason: other.to_string(),
        },
    })
}
