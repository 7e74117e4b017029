//! Definition documents and inheritance resolution.
//!
//! This module handles loading block model definitions by identifier and
//! merging each one with its parent chain into a single definition.

pub mod model;
pub mod source;
pub mod store;

pub use model::{Definition, DefinitionDocument, Element, FaceSpec, GuiTransform, DEFAULT_UV};
pub use source::{DefinitionSource, DirectorySource, MemorySource};
pub use store::{merge, DefinitionStore};
