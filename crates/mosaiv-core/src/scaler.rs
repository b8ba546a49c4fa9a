use rayon::prelude::*;

use crate::buffer::{Pixel, PixelBuffer};
use crate::error::{CoreError, Result};

/// Bounds of the on-screen area available to the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    max_width: u32,
    max_height: u32,
}

impl Viewport {
    pub fn new(max_width: u32, max_height: u32) -> Result<Self> {
        if max_width == 0 || max_height == 0 {
            return Err(CoreError::InvalidViewport {
                max_width,
                max_height,
            });
        }
        Ok(Self {
            max_width,
            max_height,
        })
    }

    pub fn max_width(self) -> u32 {
        self.max_width
    }

    pub fn max_height(self) -> u32 {
        self.max_height
    }
}

/// A display-ready RGBA8 bitmap. Alpha is 255 for every pixel; the scaler
/// overwrites the whole surface on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    fn zeroed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA bytes of the pixel at (x, y).
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// Render a pixel buffer onto a surface bounded by the viewport.
///
/// Images strictly smaller than the viewport in both dimensions are
/// magnified by replicating each source pixel into a `scale x scale` block
/// (nearest-neighbor, no blending), using the tightest integer scale that
/// keeps the surface within bounds. Everything else is minified: each
/// output pixel is the per-channel mean of its source block, truncating
/// division by the number of in-bounds samples. An image that exactly
/// matches a viewport bound takes the minification path with scale 1, an
/// unscaled copy.
pub fn resample(source: &PixelBuffer, viewport: Viewport) -> Bitmap {
    let (w, h) = (source.width(), source.height());
    let (max_w, max_h) = (viewport.max_width(), viewport.max_height());

    if w < max_w && h < max_h {
        let scale = (max_w / w).min(max_h / h).max(1);
        log::debug!("resample: magnify {w}x{h} by {scale} into {max_w}x{max_h}");
        magnify(source, scale)
    } else {
        let scale = w.div_ceil(max_w).max(h.div_ceil(max_h));
        log::debug!("resample: minify {w}x{h} by {scale} into {max_w}x{max_h}");
        minify(source, scale)
    }
}

fn magnify(source: &PixelBuffer, scale: u32) -> Bitmap {
    let out_w = source.width() * scale;
    let out_h = source.height() * scale;
    let mut out = Bitmap::zeroed(out_w, out_h);

    let row_bytes = (out_w as usize) * 4;
    let scale = scale as usize;
    out.data
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(oy, row)| {
            let sy = (oy / scale) as u32;
            for sx in 0..source.width() {
                let mut rgba = [0u8; 4];
                source.pixel(sx, sy).write_rgba(&mut rgba);
                let base = (sx as usize) * scale * 4;
                for i in 0..scale {
                    let at = base + i * 4;
                    row[at..at + 4].copy_from_slice(&rgba);
                }
            }
        });

    out
}

fn minify(source: &PixelBuffer, scale: u32) -> Bitmap {
    // Floor the output dimensions, but never below one pixel: extreme
    // aspect ratios (a 1x1000 strip in a square viewport) would otherwise
    // collapse the short axis to zero.
    let out_w = (source.width() / scale).max(1);
    let out_h = (source.height() / scale).max(1);
    let mut out = Bitmap::zeroed(out_w, out_h);

    let row_bytes = (out_w as usize) * 4;
    out.data
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(oy, row)| {
            for ox in 0..out_w {
                let mean = block_mean(source, ox * scale, (oy as u32) * scale, scale);
                mean.write_rgba(&mut row[(ox as usize) * 4..(ox as usize) * 4 + 4]);
            }
        });

    out
}

/// Mean of the up-to `scale x scale` block anchored at (x0, y0), per
/// channel, truncating division by the actual number of in-bounds samples.
fn block_mean(source: &PixelBuffer, x0: u32, y0: u32, scale: u32) -> Pixel {
    let x1 = (x0 + scale).min(source.width());
    let y1 = (y0 + scale).min(source.height());

    // u64 sums: a tiny viewport can put many megapixels into one block.
    let mut sum_r = 0u64;
    let mut sum_g = 0u64;
    let mut sum_b = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            let p = source.pixel(x, y);
            sum_r += p.r() as u64;
            sum_g += p.g() as u64;
            sum_b += p.b() as u64;
        }
    }

    let count = ((x1 - x0) as u64) * ((y1 - y0) as u64);
    Pixel::from_rgb(
        (sum_r / count) as u8,
        (sum_g / count) as u8,
        (sum_b / count) as u8,
    )
}
