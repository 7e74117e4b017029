//! Projection and rasterization of models into an output image.

pub mod projection;
pub mod rasterizer;

pub use projection::{project, project_quad, Projection};
pub use rasterizer::{rasterize, OutputRaster};

use crate::definition::{DefinitionSource, DefinitionStore};
use crate::error::Result;
use crate::mesher::{self, Face, Model};
use crate::texture::{TextureCache, TextureSource};

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Projection mode.
    pub projection: Projection,
    /// Camera distance along z (perspective only).
    pub camera_z: f32,
    /// Initial color of every output pixel.
    pub fill: [u8; 4],
    /// Apply the definition's GUI transform before projecting.
    pub apply_transform: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            projection: Projection::Orthographic,
            camera_z: 500.0,
            fill: [0, 0, 0, 0],
            apply_transform: true,
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_camera_z(mut self, camera_z: f32) -> Self {
        self.camera_z = camera_z;
        self
    }

    pub fn with_fill(mut self, fill: [u8; 4]) -> Self {
        self.fill = fill;
        self
    }
}

/// Owns everything one caller needs to render models: definitions,
/// texture source and the texture cache shared across renders.
pub struct RenderContext<D, T> {
    store: DefinitionStore<D>,
    textures: T,
    cache: TextureCache,
    config: RenderConfig,
}

impl<D: DefinitionSource, T: TextureSource> RenderContext<D, T> {
    /// Create a new context with default configuration.
    pub fn new(definitions: D, textures: T) -> Self {
        Self::with_config(definitions, textures, RenderConfig::default())
    }

    /// Create a new context with custom configuration.
    pub fn with_config(definitions: D, textures: T, config: RenderConfig) -> Self {
        Self {
            store: DefinitionStore::new(definitions),
            textures,
            cache: TextureCache::new(),
            config,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// Get a reference to the definition store.
    pub fn store(&self) -> &DefinitionStore<D> {
        &self.store
    }

    /// Get a reference to the texture cache.
    pub fn cache(&self) -> &TextureCache {
        &self.cache
    }

    /// Resolve a model and build its (transformed) faces.
    ///
    /// The result can be handed to an external renderer together with
    /// [`cache`](Self::cache).
    pub fn build_model(&mut self, id: &str) -> Result<Model> {
        let definition = self.store.resolve(id)?;
        let faces = mesher::build_faces(&definition, &mut self.cache, &self.textures)?;

        let mut model = Model { definition, faces };
        if self.config.apply_transform {
            model.apply_transform();
        }
        Ok(model)
    }

    /// Render a model by identifier into a fresh output raster.
    pub fn render(&mut self, id: &str) -> Result<OutputRaster> {
        let model = self.build_model(id)?;
        self.render_model(&model)
    }

    /// Render an already-built model into a fresh output raster.
    pub fn render_model(&self, model: &Model) -> Result<OutputRaster> {
        let mut output = OutputRaster::new(self.config.width, self.config.height, self.config.fill)?;
        render_faces(&model.faces, &self.cache, &self.config, &mut output);
        Ok(output)
    }
}

/// Project and rasterize faces in order into `output`. Returns the number
/// of pixels written.
pub fn render_faces(
    faces: &[Face],
    cache: &TextureCache,
    config: &RenderConfig,
    output: &mut OutputRaster,
) -> usize {
    let mut written = 0;
    for face in faces {
        let projected = project_quad(&face.vertices, config.projection, config.camera_z);
        written += rasterize(face, &projected, cache.get(face.texture), output);
    }
    log::debug!("Rasterized {} faces, {} pixels written", faces.len(), written);
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::MemorySource;
    use crate::error::RasterError;
    use crate::texture::{MemoryTextureSource, RasterImage};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const FILL: [u8; 4] = [0, 0, 0, 0];

    fn up_face_context() -> RenderContext<MemorySource, MemoryTextureSource> {
        let mut definitions = MemorySource::new();
        definitions
            .add_json(
                "block/red",
                r##"{
                    "textures": { "top": "block/red" },
                    "elements": [
                        {
                            "from": [0, 0, 0],
                            "to": [16, 16, 16],
                            "faces": { "up": { "texture": "#top", "uv": [0, 0, 16, 16] } }
                        }
                    ]
                }"##,
            )
            .unwrap();
        definitions
            .add_json("block/broken", r##"{ "parent": "block/red", "textures": { "top": "block/missing" } }"##)
            .unwrap();

        let textures = MemoryTextureSource::new().with("block/red", RasterImage::filled(16, 16, RED));
        RenderContext::new(definitions, textures)
    }

    #[test]
    fn test_end_to_end_single_up_face() {
        let mut ctx = up_face_context();
        let output = ctx.render("block/red").unwrap();

        assert_eq!((output.width, output.height), (64, 64));

        // The up face projects to x in [1, 17], y in [0, 16]; interior
        // pixels are red, everything else keeps the fill.
        for y in 0..64 {
            for x in 0..64 {
                let expected = if (1..=16).contains(&x) && (0..=15).contains(&y) {
                    RED
                } else {
                    FILL
                };
                assert_eq!(output.get_pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_render_twice_identical() {
        let mut ctx = up_face_context();
        let first = ctx.render("block/red").unwrap();
        let second = ctx.render("block/red").unwrap();
        assert_eq!(first, second);
        assert_eq!(ctx.cache().len(), 1);
    }

    #[test]
    fn test_failed_model_does_not_affect_others() {
        let mut ctx = up_face_context();
        assert!(matches!(
            ctx.render("block/broken"),
            Err(RasterError::TextureLoad { .. })
        ));
        assert!(ctx.cache().is_empty());
        assert!(ctx.render("block/red").is_ok());
    }

    #[test]
    fn test_transform_moves_output() {
        let mut definitions = MemorySource::new();
        definitions
            .add_json(
                "moved",
                r##"{
                    "textures": { "t": "red" },
                    "display": { "gui": { "translation": [20, 20, 0], "scale": [0.5, 0.5, 0.5] } },
                    "elements": [
                        { "from": [0, 0, 0], "to": [16, 16, 16], "faces": { "up": { "texture": "#t" } } }
                    ]
                }"##,
            )
            .unwrap();
        let textures = MemoryTextureSource::new().with("red", RasterImage::filled(16, 16, RED));
        let mut ctx = RenderContext::new(definitions, textures);

        let output = ctx.render("moved").unwrap();
        // Scaled to 8x8 then shifted: x in [21, 29], y in [20, 28].
        assert_eq!(output.get_pixel(25, 24), RED);
        assert_eq!(output.get_pixel(5, 5), FILL);

        ctx.config_mut().apply_transform = false;
        let untransformed = ctx.render("moved").unwrap();
        assert_eq!(untransformed.get_pixel(5, 5), RED);
    }

    #[test]
    fn test_perspective_render() {
        let mut ctx = up_face_context();
        *ctx.config_mut() = RenderConfig::default()
            .with_projection(Projection::Perspective)
            .with_camera_z(500.0)
            .with_fill([0, 0, 0, 255]);

        // z = 0 plane at camera distance 500 maps 1:1.
        let output = ctx.render("block/red").unwrap();
        assert_eq!(output.get_pixel(8, 8), RED);
        assert_eq!(output.get_pixel(40, 40), [0, 0, 0, 255]);
    }

    #[test]
    fn test_bare_texture_key_in_face() {
        let mut definitions = MemorySource::new();
        definitions
            .add_json(
                "bare",
                r##"{
                    "textures": { "top": "block/red" },
                    "elements": [
                        { "from": [0, 0, 0], "to": [16, 16, 16], "faces": { "up": { "texture": "top" } } }
                    ]
                }"##,
            )
            .unwrap();
        let textures = MemoryTextureSource::new().with("block/red", RasterImage::filled(16, 16, RED));
        let mut ctx = RenderContext::new(definitions, textures);

        let output = ctx.render("bare").unwrap();
        assert_eq!(output.get_pixel(8, 8), RED);
        assert!(ctx.cache().contains("block/red"));
    }

    #[test]
    fn test_oversized_config_is_error() {
        let mut ctx = up_face_context();
        ctx.config_mut().width = 65536;
        ctx.config_mut().height = 65536;
        assert!(matches!(
            ctx.render("block/red"),
            Err(RasterError::Validation { .. })
        ));
    }

    #[test]
    fn test_missing_model() {
        let mut ctx = up_face_context();
        assert!(matches!(
            ctx.render("block/none"),
            Err(RasterError::DefinitionNotFound(_))
        ));
    }

    #[test]
    fn test_config_builders() {
        let config = RenderConfig::default()
            .with_size(128, 32)
            .with_projection(Projection::Perspective)
            .with_camera_z(100.0)
            .with_fill([1, 2, 3, 4]);
        assert_eq!((config.width, config.height), (128, 32));
        assert_eq!(config.projection, Projection::Perspective);
        assert_eq!(config.camera_z, 100.0);
        assert_eq!(config.fill, [1, 2, 3, 4]);
        assert!(config.apply_transform);
    }
}
