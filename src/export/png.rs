//! PNG encoding of render output.

use crate::error::{RasterError, Result};
use crate::render::OutputRaster;
use image::ImageEncoder;

/// Encode an output raster as PNG bytes.
pub fn encode_png(output: &OutputRaster) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);

    encoder
        .write_image(
            &output.pixels,
            output.width,
            output.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| RasterError::Export(format!("Failed to encode PNG: {}", e)))?;

    Ok(bytes)
}
