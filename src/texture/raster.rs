//! RGBA8 raster image data.

/// Byte length of a `width` x `height` RGBA8 buffer, or None when it does
/// not fit in `u32`.
pub fn buffer_len(width: u32, height: u32) -> Option<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .map(|n| n as usize)
}

/// Decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel, row-major).
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create an image from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode an image from encoded bytes (any format the `image` crate
    /// was built with) into RGBA8.
    pub fn from_encoded(data: &[u8]) -> Result<Self, image::ImageError> {
        let rgba = image::load_from_memory(data)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Check if this image has transparency.
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks(4).any(|pixel| pixel[3] < 255)
    }

    /// Check whether (x, y) lies inside the image.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled() {
        let img = RasterImage::filled(2, 3, [10, 20, 30, 255]);
        assert_eq!(img.pixels.len(), 2 * 3 * 4);
        assert_eq!(img.get_pixel(1, 2), [10, 20, 30, 255]);
        assert!(!img.has_transparency());
    }

    #[test]
    fn test_get_pixel() {
        let img = RasterImage::new(
            2,
            2,
            vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 128],
        );

        assert_eq!(img.get_pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0), [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(0, 1), [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(1, 1), [255, 255, 255, 128]);
        assert!(img.has_transparency());
    }

    #[test]
    fn test_buffer_len() {
        assert_eq!(buffer_len(2, 3), Some(24));
        assert_eq!(buffer_len(0, 100), Some(0));
        assert_eq!(buffer_len(32768, 32768), None);
        assert_eq!(buffer_len(u32::MAX, 2), None);
    }

    #[test]
    fn test_contains() {
        let img = RasterImage::filled(4, 2, [0; 4]);
        assert!(img.contains(0, 0));
        assert!(img.contains(3, 1));
        assert!(!img.contains(4, 0));
        assert!(!img.contains(0, 2));
        assert!(!img.contains(-1, 0));
    }

    #[test]
    fn test_from_encoded_png() {
        let source = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let mut bytes = Vec::new();
        source
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let img = RasterImage::from_encoded(&bytes).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.get_pixel(2, 1), [1, 2, 3, 4]);
    }
}
