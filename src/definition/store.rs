//! Definition loading and parent-chain resolution.

use super::{Definition, DefinitionSource};
use crate::error::{RasterError, Result};
use crate::types::strip_namespace;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Loads definitions and resolves their inheritance chains.
pub struct DefinitionStore<S> {
    source: S,
    cache: RefCell<HashMap<String, Definition>>,
}

impl<S: DefinitionSource> DefinitionStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load a single definition without touching its parents.
    pub fn load(&self, id: &str) -> Result<Definition> {
        self.source.load(strip_namespace(id))
    }

    /// Resolve a definition with all inherited properties.
    pub fn resolve(&self, id: &str) -> Result<Definition> {
        let id = strip_namespace(id);

        if let Some(cached) = self.cache.borrow().get(id) {
            return Ok(cached.clone());
        }

        let chain = self.load_chain(id)?;
        let resolved = chain
            .into_iter()
            .rev()
            .map(|(_, definition)| definition)
            .reduce(|parent, child| merge(&child, &parent))
            .map(|mut merged| {
                merged.parent = None;
                merged
            })
            .ok_or_else(|| RasterError::DefinitionNotFound(id.to_string()))?;

        self.cache
            .borrow_mut()
            .insert(id.to_string(), resolved.clone());

        Ok(resolved)
    }

    /// Identifiers of the parent chain, leaf first.
    pub fn ancestry(&self, id: &str) -> Result<Vec<String>> {
        Ok(self
            .load_chain(strip_namespace(id))?
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }

    /// Walk the parent chain from the leaf upwards, failing on repetition.
    fn load_chain(&self, id: &str) -> Result<Vec<(String, Definition)>> {
        let mut chain: Vec<(String, Definition)> = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(id.to_string());

        while let Some(current) = next.take() {
            if !visited.insert(current.clone()) {
                let mut ids: Vec<String> = chain.into_iter().map(|(id, _)| id).collect();
                ids.push(current.clone());
                return Err(RasterError::CyclicDefinition { id: current, chain: ids });
            }

            let definition = self.source.load(&current)?;
            next = definition.parent_id().map(str::to_string);
            chain.push((current, definition));
        }

        log::debug!(
            "Resolved chain for {}: {}",
            id,
            chain.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>().join(" -> ")
        );

        Ok(chain)
    }
}

/// Merge a child definition onto its (already resolved) parent.
///
/// Textures are unioned with the child winning collisions, parent elements
/// precede the child's, and the child's transform block replaces the
/// parent's wholesale when present.
pub fn merge(child: &Definition, parent: &Definition) -> Definition {
    let mut textures = parent.textures.clone();
    for (key, value) in &child.textures {
        textures.insert(key.clone(), value.clone());
    }

    let mut elements = parent.elements.clone();
    elements.extend(child.elements.iter().cloned());

    Definition {
        parent: child.parent.clone(),
        textures,
        elements,
        transform: child.transform.or(parent.transform),
    }
}
