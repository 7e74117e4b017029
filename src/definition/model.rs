//! Block model definition parsing.
//!
//! A definition describes a model as a list of cuboid elements with
//! per-face texture references, a texture variable map and an optional
//! GUI display transform.

use crate::error::{RasterError, Result};
use crate::types::{strip_namespace, Direction, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default UV rectangle in the model's 16-unit tile convention.
pub const DEFAULT_UV: [f32; 4] = [0.0, 0.0, 16.0, 16.0];

/// Prefix marking a parent chain terminal (e.g. "builtin/generated").
const BUILTIN_PREFIX: &str = "builtin/";

/// A model definition.
///
/// A freshly loaded definition carries its own `parent` reference; a
/// resolved one has the whole chain merged in and `parent` cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition {
    /// Parent definition to inherit from.
    pub parent: Option<String>,
    /// Texture variable definitions (name -> literal path or "#alias").
    pub textures: BTreeMap<String, String>,
    /// Model elements (cuboids), in paint order.
    pub elements: Vec<Element>,
    /// GUI transform block, if this definition (or an ancestor) declares one.
    pub transform: Option<Transform>,
}

impl Definition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a definition document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: DefinitionDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Build a definition from a parsed document.
    pub fn from_document(document: DefinitionDocument) -> Result<Self> {
        let transform = document.transform_block();
        let definition = Self {
            parent: document.parent,
            textures: document.textures,
            elements: document.elements,
            transform,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// Parent identifier with namespace stripped.
    /// Builtin parents terminate the chain and yield None.
    pub fn parent_id(&self) -> Option<&str> {
        let parent = strip_namespace(self.parent.as_deref()?);
        if parent.starts_with(BUILTIN_PREFIX) {
            None
        } else {
            Some(parent)
        }
    }

    /// The transform to apply, with defaults when no block was declared.
    pub fn effective_transform(&self) -> Transform {
        self.transform.unwrap_or_default()
    }

    /// Count of faces across all elements.
    pub fn face_count(&self) -> usize {
        self.elements.iter().map(|e| e.faces.len()).sum()
    }

    /// Check the fields serde cannot: finite numbers, non-empty references.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.textures {
            if value.is_empty() {
                return Err(RasterError::validation(
                    format!("textures.{}", name),
                    "empty texture reference",
                ));
            }
        }

        if let Some(transform) = &self.transform {
            for (field, values) in [
                ("translation", transform.translate),
                ("rotation", transform.rotate),
                ("scale", transform.scale),
            ] {
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(RasterError::validation(
                        format!("display.gui.{}", field),
                        "non-finite value",
                    ));
                }
            }
        }

        for (i, element) in self.elements.iter().enumerate() {
            element.validate(&format!("elements[{}]", i))?;
        }

        Ok(())
    }
}

/// A cuboid element within a definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// First corner.
    pub from: [f32; 3],
    /// Opposite corner.
    pub to: [f32; 3],
    /// Face definitions; absent keys produce no geometry.
    #[serde(default)]
    pub faces: BTreeMap<Direction, FaceSpec>,
}

impl Element {
    pub fn new(from: [f32; 3], to: [f32; 3]) -> Self {
        Self {
            from,
            to,
            faces: BTreeMap::new(),
        }
    }

    pub fn with_face(mut self, direction: Direction, face: FaceSpec) -> Self {
        self.faces.insert(direction, face);
        self
    }

    fn validate(&self, path: &str) -> Result<()> {
        if self.from.iter().chain(self.to.iter()).any(|v| !v.is_finite()) {
            return Err(RasterError::validation(
                format!("{}.from/to", path),
                "non-finite coordinate",
            ));
        }

        for (direction, face) in &self.faces {
            let face_path = format!("{}.faces.{}", path, direction);
            if face.texture.is_empty() || face.texture == "#" {
                return Err(RasterError::validation(
                    format!("{}.texture", face_path),
                    "empty texture reference",
                ));
            }
            if let Some(uv) = face.uv {
                if uv.iter().any(|v| !v.is_finite()) {
                    return Err(RasterError::validation(
                        format!("{}.uv", face_path),
                        "non-finite uv",
                    ));
                }
            }
        }

        Ok(())
    }
}

/// A face of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceSpec {
    /// Texture reference ("#name" or a literal path).
    pub texture: String,
    /// UV rectangle [u0, v0, u1, v1] in 0-16 tile units.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
}

impl FaceSpec {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            uv: None,
        }
    }

    pub fn with_uv(mut self, uv: [f32; 4]) -> Self {
        self.uv = Some(uv);
        self
    }

    /// Get the UV rectangle, defaulting to the full tile if not specified.
    pub fn uv_or_default(&self) -> [f32; 4] {
        self.uv.unwrap_or(DEFAULT_UV)
    }
}

/// Raw definition document as found on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinitionDocument {
    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub textures: BTreeMap<String, String>,

    #[serde(default)]
    pub elements: Vec<Element>,

    /// Display contexts; only `gui` is consumed.
    #[serde(default)]
    pub display: Option<DisplayDocument>,

    /// Root-level transform fields, used when `display.gui` is absent.
    #[serde(flatten)]
    pub root_transform: GuiTransform,
}

impl DefinitionDocument {
    /// Select this document's transform block: `display.gui` first, then
    /// root-level fields. Missing fields inside the block take defaults.
    pub fn transform_block(&self) -> Option<Transform> {
        let gui = self.display.as_ref().and_then(|d| d.gui.as_ref());
        gui.or(Some(&self.root_transform).filter(|t| !t.is_empty()))
            .map(GuiTransform::to_transform)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayDocument {
    #[serde(default)]
    pub gui: Option<GuiTransform>,
}

/// A transform block with optional fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuiTransform {
    #[serde(default)]
    pub translation: Option<[f32; 3]>,
    #[serde(default)]
    pub rotation: Option<[f32; 3]>,
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
}

impl GuiTransform {
    pub fn is_empty(&self) -> bool {
        self.translation.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    pub fn to_transform(&self) -> Transform {
        let defaults = Transform::default();
        Transform {
            translate: self.translation.unwrap_or(defaults.translate),
            rotate: self.rotation.unwrap_or(defaults.rotate),
            scale: self.scale.unwrap_or(defaults.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_definition() {
        let json = r#"{
            "parent": "minecraft:block/cube_all",
            "textures": {
                "all": "block/stone"
            }
        }"#;

        let def = Definition::from_json(json).unwrap();
        assert_eq!(def.parent.as_deref(), Some("minecraft:block/cube_all"));
        assert_eq!(def.parent_id(), Some("block/cube_all"));
        assert_eq!(def.textures.get("all"), Some(&"block/stone".to_string()));
        assert!(def.elements.is_empty());
        assert!(def.transform.is_none());
        assert!(def.effective_transform().is_identity());
    }

    #[test]
    fn test_parse_elements_with_partial_faces() {
        let json = r##"{
            "textures": { "top": "block/grass_top", "side": "block/grass_side" },
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 8, 16],
                    "faces": {
                        "up":    { "texture": "#top", "uv": [0, 0, 8, 8] },
                        "north": { "texture": "#side" }
                    }
                }
            ]
        }"##;

        let def = Definition::from_json(json).unwrap();
        assert_eq!(def.elements.len(), 1);

        let element = &def.elements[0];
        assert_eq!((element.from, element.to), ([0.0; 3], [16.0, 8.0, 16.0]));
        assert_eq!(element.faces.len(), 2);
        assert_eq!(
            element.faces.keys().copied().collect::<Vec<_>>(),
            vec![Direction::North, Direction::Up]
        );
        assert_eq!(element.faces[&Direction::Up].uv_or_default(), [0.0, 0.0, 8.0, 8.0]);
        assert_eq!(element.faces[&Direction::North].uv_or_default(), DEFAULT_UV);
        assert_eq!(def.face_count(), 2);
    }

    #[test]
    fn test_gui_block_preferred_over_root_fields() {
        let json = r#"{
            "translation": [9, 9, 9],
            "display": {
                "gui": { "rotation": [30, 225, 0] },
                "ground": { "scale": [0.25, 0.25, 0.25] }
            }
        }"#;

        let def = Definition::from_json(json).unwrap();
        let t = def.transform.unwrap();
        assert_eq!(t.rotate, [30.0, 225.0, 0.0]);
        // Missing fields default, they do not leak in from root level.
        assert_eq!(t.translate, [0.0, 0.0, 0.0]);
        assert_eq!(t.scale, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_root_level_transform_fields() {
        let json = r#"{ "scale": [2, 2, 2] }"#;
        let def = Definition::from_json(json).unwrap();
        let t = def.transform.unwrap();
        assert_eq!(t.scale, [2.0, 2.0, 2.0]);
        assert_eq!(t.rotate, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_builtin_parent_terminates() {
        let def = Definition {
            parent: Some("builtin/generated".to_string()),
            ..Default::default()
        };
        assert_eq!(def.parent_id(), None);
    }

    #[test]
    fn test_validation_rejects_empty_face_texture() {
        let json = r#"{
            "elements": [
                { "from": [0, 0, 0], "to": [1, 1, 1], "faces": { "up": { "texture": "" } } }
            ]
        }"#;

        match Definition::from_json(json) {
            Err(RasterError::Validation { field, .. }) => {
                assert_eq!(field, "elements[0].faces.up.texture");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects_empty_texture_value() {
        let json = r#"{ "textures": { "side": "" } }"#;
        assert!(matches!(
            Definition::from_json(json),
            Err(RasterError::Validation { .. })
        ));
    }

    #[test]
    fn test_missing_required_element_field_is_parse_error() {
        let json = r#"{ "elements": [ { "from": [0, 0, 0] } ] }"#;
        assert!(matches!(Definition::from_json(json), Err(RasterError::Json(_))));
    }
}
