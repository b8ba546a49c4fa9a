use mosaiv_core::buffer::{Pixel, PixelBuffer};

/// Builder for test pixel buffers with sensible defaults.
pub struct PixelBufferBuilder {
    width: u32,
    height: u32,
    pattern: Pattern,
}

#[derive(Clone, Copy)]
enum Pattern {
    Solid(Pixel),
    Checkerboard(Pixel, Pixel),
    HorizontalRamp,
}

impl PixelBufferBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pattern: Pattern::Solid(Pixel::BLACK),
        }
    }

    pub fn solid(mut self, fill: Pixel) -> Self {
        self.pattern = Pattern::Solid(fill);
        self
    }

    /// Alternate `a` and `b` per pixel, flipping each row.
    pub fn checkerboard(mut self, a: Pixel, b: Pixel) -> Self {
        self.pattern = Pattern::Checkerboard(a, b);
        self
    }

    /// Gray ramp increasing left to right, wrapping at 256 columns.
    pub fn horizontal_ramp(mut self) -> Self {
        self.pattern = Pattern::HorizontalRamp;
        self
    }

    pub fn build(self) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((self.width as usize) * (self.height as usize));
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.push(match self.pattern {
                    Pattern::Solid(fill) => fill,
                    Pattern::Checkerboard(a, b) => {
                        if (x + y) % 2 == 0 {
                            a
                        } else {
                            b
                        }
                    }
                    Pattern::HorizontalRamp => {
                        let v = (x % 256) as u8;
                        Pixel::from_rgb(v, v, v)
                    }
                });
            }
        }
        PixelBuffer::from_pixels(self.width, self.height, pixels)
            .expect("builder dimensions are valid")
    }
}
