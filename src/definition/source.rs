//! Where definition documents come from.

use super::Definition;
use crate::error::{RasterError, Result};
use crate::types::strip_namespace;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A store of raw (unmerged) definition documents addressed by identifier.
pub trait DefinitionSource {
    /// Load the definition for `id` (namespace already stripped).
    ///
    /// Returns `DefinitionNotFound` when no document exists.
    fn load(&self, id: &str) -> Result<Definition>;
}

/// In-memory definitions, mostly for tests and embedders.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    definitions: HashMap<String, Definition>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    pub fn add(&mut self, id: &str, definition: Definition) {
        self.definitions
            .insert(strip_namespace(id).to_string(), definition);
    }

    /// Parse and add a definition document.
    pub fn add_json(&mut self, id: &str, json: &str) -> Result<()> {
        self.add(id, Definition::from_json(json)?);
        Ok(())
    }

    pub fn with(mut self, id: &str, definition: Definition) -> Self {
        self.add(id, definition);
        self
    }

    /// Get the total number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl DefinitionSource for MemorySource {
    fn load(&self, id: &str) -> Result<Definition> {
        self.definitions
            .get(id)
            .cloned()
            .ok_or_else(|| RasterError::DefinitionNotFound(id.to_string()))
    }
}

/// Definitions stored as `<root>/<id>.json` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }
}

impl DefinitionSource for DirectorySource {
    fn load(&self, id: &str) -> Result<Definition> {
        let path = self.path_for(id);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RasterError::DefinitionNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        log::trace!("Read definition {} from {:?}", id, path);
        Definition::from_json(&contents)
    }
}
