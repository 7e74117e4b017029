//! Software rasterizer for projected quads.
//!
//! There is no depth buffer. Faces are drawn in the order they are given
//! and a later face always covers an earlier one where they overlap
//! (painter's algorithm).

use crate::error::{RasterError, Result};
use crate::mesher::Face;
use crate::texture::{buffer_len, RasterImage};
use glam::Vec2;

/// Destination RGBA8 buffer for a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRaster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel, row-major).
    pub pixels: Vec<u8>,
}

impl OutputRaster {
    /// Create a raster with every pixel set to `fill`.
    ///
    /// Fails when the pixel buffer would exceed `u32::MAX` bytes.
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Result<Self> {
        if buffer_len(width, height).is_none() {
            return Err(RasterError::validation(
                "size",
                format!("{}x{} output is too large", width, height),
            ));
        }
        let image = RasterImage::filled(width, height, fill);
        Ok(Self {
            width,
            height,
            pixels: image.pixels,
        })
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = self.index(x, y);
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Composite `color` over the pixel at (x, y) using its alpha.
    ///
    /// RGB is blended as `src * a + dst * (1 - a)` and the result alpha is
    /// forced opaque. A fully transparent source writes nothing. Returns
    /// whether the pixel was written.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) -> bool {
        if x >= self.width || y >= self.height || color[3] == 0 {
            return false;
        }

        let idx = self.index(x, y);
        let alpha = color[3] as f32 / 255.0;
        for channel in 0..3 {
            let src = color[channel] as f32;
            let dst = self.pixels[idx + channel] as f32;
            self.pixels[idx + channel] = (src * alpha + dst * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[idx + 3] = 255;
        true
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Unsigned area of a 2D triangle.
pub fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    ((b.x * c.y - c.x * b.y) - (a.x * c.y - c.x * a.y) + (a.x * b.y - b.x * a.y)).abs() / 2.0
}

/// Even-odd ray casting test. Points exactly on an edge fall on whichever
/// side the half-open crossing rule puts them.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Interpolate a texture coordinate for `point` inside quad ABCD.
///
/// `uv` is the normalized [u0, v0, u1, v1] rectangle. The weights are the
/// areas of ABP and ACP relative to the whole quad; U and V use mirrored
/// formulas so each axis leads with its own delta.
pub fn interpolate_uv(point: Vec2, quad: &[Vec2; 4], quad_area: f32, uv: [f32; 4]) -> Vec2 {
    let [a, b, c, _] = *quad;
    let w_abc = triangle_area(a, b, point) / quad_area;
    let w_acd = triangle_area(a, c, point) / quad_area;

    let du = uv[2] - uv[0];
    let dv = uv[3] - uv[1];

    Vec2::new(
        uv[0] + w_abc * du + w_acd * dv,
        uv[1] + w_abc * dv + w_acd * du,
    )
}

/// Nearest-neighbour texel lookup for a normalized coordinate.
/// Returns None when the sample falls outside the texture.
pub fn sample(texture: &RasterImage, uv: Vec2) -> Option<[u8; 4]> {
    let x = (uv.x * texture.width.saturating_sub(1) as f32).floor() as i64;
    let y = (uv.y * texture.height.saturating_sub(1) as f32).floor() as i64;
    if texture.contains(x, y) {
        Some(texture.get_pixel(x as u32, y as u32))
    } else {
        None
    }
}

/// Fill one projected face into `output`. Returns the number of pixels
/// written.
pub fn rasterize(
    face: &Face,
    projected: &[Vec2; 4],
    texture: &RasterImage,
    output: &mut OutputRaster,
) -> usize {
    let [a, b, c, d] = *projected;
    let quad_area = triangle_area(a, b, c) + triangle_area(a, c, d);
    if !(quad_area > 0.0) || !quad_area.is_finite() {
        log::warn!("Skipping degenerate {} face (projected area {})", face.direction, quad_area);
        return 0;
    }
    if output.width == 0 || output.height == 0 {
        return 0;
    }

    let (min, max) = projected
        .iter()
        .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(min, max), p| {
            (min.min(*p), max.max(*p))
        });

    let x0 = (min.x.floor() as i64).max(0);
    let y0 = (min.y.floor() as i64).max(0);
    let x1 = (max.x.ceil() as i64).min(output.width as i64 - 1);
    let y1 = (max.y.ceil() as i64).min(output.height as i64 - 1);

    let uv = face.normalized_uv();
    let mut written = 0;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let point = Vec2::new(x as f32, y as f32);
            if !point_in_polygon(point, projected) {
                continue;
            }

            let tex_coord = interpolate_uv(point, projected, quad_area, uv);
            // Outside the texture is a valid partial-coverage state, not an error.
            let Some(color) = sample(texture, tex_coord) else {
                continue;
            };

            if output.blend_pixel(x as u32, y as u32, color) {
                written += 1;
            }
        }
    }

    written
}
